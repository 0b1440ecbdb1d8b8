use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::EnumString;

use super::common::{MatchId, Side};
use super::event::MatchEvent;
use super::team::Team;

/// Phase of the live-match flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    TeamDraw,
    MatchSelection,
    LiveMatch,
    MatchEnded,
}

/// Goals per contestant slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::TeamA => self.team_a,
            Side::TeamB => self.team_b,
        }
    }

    pub(crate) fn increment(&mut self, side: Side) -> u32 {
        let slot = self.slot_mut(side);
        *slot += 1;
        *slot
    }

    pub(crate) fn decrement(&mut self, side: Side) -> u32 {
        let slot = self.slot_mut(side);
        *slot = slot.saturating_sub(1);
        *slot
    }

    fn slot_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::TeamA => &mut self.team_a,
            Side::TeamB => &mut self.team_b,
        }
    }
}

/// Immutable record of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedMatch {
    pub id: MatchId,
    pub team_a: Team,
    pub team_b: Team,
    pub final_score: Score,
    pub winner: Option<Team>,
    pub events: Vec<MatchEvent>,
    pub duration_secs: u32,
    pub timestamp: DateTime<Utc>,
}
