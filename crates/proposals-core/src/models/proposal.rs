use std::fmt;

use serde::{Deserialize, Serialize};

use super::Activity;

/// A named collection of activities, as returned by the proposals API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Proposal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Proposal {
    pub fn activity_count_display(&self) -> String {
        match self.activities.len() {
            1 => "1 activity".to_string(),
            n => format!("{} activities", n),
        }
    }
}

impl fmt::Display for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.id,
            self.name,
            self.activity_count_display()
        )
    }
}

/// Request body for creating a proposal. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewProposal {
    pub name: String,
    pub activities: Vec<Activity>,
}

impl NewProposal {
    pub fn new(name: impl Into<String>, activities: Vec<Activity>) -> Self {
        Self {
            name: name.into(),
            activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proposal_without_activities() {
        let proposal: Proposal = serde_json::from_str(r#"{"id":"1","name":"Trip"}"#).unwrap();
        assert_eq!(proposal.id, "1");
        assert_eq!(proposal.name, "Trip");
        assert!(proposal.activities.is_empty());
        assert_eq!(proposal.to_string(), "[1] Trip (0 activities)");
    }

    #[test]
    fn test_parse_nested_activities() {
        let json = r#"{"id":"p","name":"Camp","activities":[{"id":1},{"id":2,"name":"Canoe"}]}"#;
        let proposal: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.activities[1].name.as_deref(), Some("Canoe"));
        assert_eq!(proposal.activity_count_display(), "2 activities");
    }

    #[test]
    fn test_new_proposal_body_shape() {
        let body = NewProposal::new("Trip", vec![Activity::new(5)]);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Trip", "activities": [{"id": 5}]})
        );
    }
}
