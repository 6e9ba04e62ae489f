use std::fmt;

use serde::{Deserialize, Serialize};

/// A task or item belonging to a single proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Activity {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Activity {
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn display_name(&self) -> String {
        match self.name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => format!("Activity {}", self.id),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.display_name())
    }
}
