use serde::{Deserialize, Serialize};

use super::Proposal;

/// A proposal being played by a set of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Game {
    pub id: i64,
    pub proposal: Proposal,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub active: bool,
}
