use serde::Serialize;
use tracing::{debug, info};

use crate::model::{EventId, MatchId, PlayerId, Score, TeamId};

/// Something that happened in a session, as told to a [`SessionObserver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionNotice {
    TeamsDrawn {
        team_ids: Vec<TeamId>,
        used_demo_roster: bool,
    },
    MatchStarted {
        team_a: TeamId,
        team_b: TeamId,
        waiting: TeamId,
    },
    GoalRecorded {
        event_id: EventId,
        player_id: PlayerId,
        team_id: TeamId,
        minute: u32,
        score: Score,
    },
    AssistAttached {
        event_id: EventId,
        assist_player_id: Option<PlayerId>,
    },
    GoalUndone {
        event_id: EventId,
        team_id: TeamId,
        score: Score,
    },
    WinRetracted {
        team_id: TeamId,
    },
    TimerExpired,
    MatchEnded {
        winner: Option<TeamId>,
        score: Score,
    },
    MatchArchived {
        match_id: MatchId,
    },
    DrawDiscarded,
}

/// Receives session notices. Injected through
/// [`MatchSessionBuilder::observer`](crate::MatchSessionBuilder::observer).
pub trait SessionObserver: Send + Sync {
    fn notify(&self, notice: &SessionNotice);
}

/// Writes every notice as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn notify(&self, notice: &SessionNotice) {
        match notice {
            SessionNotice::TeamsDrawn {
                team_ids,
                used_demo_roster,
            } => info!(?team_ids, used_demo_roster, "teams drawn"),
            SessionNotice::MatchStarted {
                team_a,
                team_b,
                waiting,
            } => info!(team_a, team_b, waiting, "match started"),
            SessionNotice::GoalRecorded {
                event_id,
                player_id,
                team_id,
                minute,
                score,
            } => info!(
                event_id,
                player_id,
                team_id,
                minute,
                team_a = score.team_a,
                team_b = score.team_b,
                "goal"
            ),
            SessionNotice::AssistAttached {
                event_id,
                assist_player_id,
            } => debug!(event_id, ?assist_player_id, "assist resolved"),
            SessionNotice::GoalUndone {
                event_id,
                team_id,
                score,
            } => info!(
                event_id,
                team_id,
                team_a = score.team_a,
                team_b = score.team_b,
                "goal undone"
            ),
            SessionNotice::WinRetracted { team_id } => info!(team_id, "win retracted"),
            SessionNotice::TimerExpired => info!("match clock expired"),
            SessionNotice::MatchEnded { winner, score } => info!(
                ?winner,
                team_a = score.team_a,
                team_b = score.team_b,
                "match ended"
            ),
            SessionNotice::MatchArchived { match_id } => debug!(match_id, "match archived"),
            SessionNotice::DrawDiscarded => info!("draw discarded"),
        }
    }
}

/// Collects notices in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub notices: std::sync::Mutex<Vec<SessionNotice>>,
}

#[cfg(test)]
impl SessionObserver for RecordingObserver {
    fn notify(&self, notice: &SessionNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_serializes_tagged() {
        let notice = SessionNotice::MatchEnded {
            winner: Some(2),
            score: Score {
                team_a: 0,
                team_b: 2,
            },
        };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["type"], "match_ended");
        assert_eq!(json["winner"], 2);
        assert_eq!(json["score"]["team_b"], 2);
    }
}
