use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{EventId, PlayerId, TeamId};

/// Kind of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchEventKind {
    Goal,
    Assist,
}

/// A scoring event. Assist data is attached to the goal it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEvent {
    pub id: EventId,
    pub kind: MatchEventKind,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
    pub minute: u32,
    pub timestamp: DateTime<Utc>,
    pub assist_player_id: Option<PlayerId>,
    pub assist_player_name: Option<String>,
}

impl MatchEvent {
    pub fn is_goal(&self) -> bool {
        self.kind == MatchEventKind::Goal
    }
}
