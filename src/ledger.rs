use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{RachaError, Result};
use crate::model::{EventId, MatchEvent, MatchEventKind, Player, Score, Side, TeamId};

/// Goal log of one live match.
///
/// The score is a cache of the goal events per side and is only ever
/// changed together with the event list, so `score()` always equals the
/// number of goals recorded for each side.
#[derive(Debug, Clone, Serialize)]
pub struct EventLedger {
    team_a: TeamId,
    team_b: TeamId,
    events: Vec<MatchEvent>,
    score: Score,
    pending_assist: Option<EventId>,
    next_id: EventId,
}

impl EventLedger {
    /// Empty ledger for a match between `team_a` and `team_b`.
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            team_a,
            team_b,
            events: Vec::new(),
            score: Score::default(),
            pending_assist: None,
            next_id: 1,
        }
    }

    /// Score implied by the goals currently in the ledger.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Events in the order they were recorded.
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Events newest first, the order a scoreboard lists them.
    pub fn recent_first(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().rev()
    }

    /// Look up an event by id.
    pub fn get(&self, id: EventId) -> Option<&MatchEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The goal still waiting for its assist to be resolved.
    pub fn pending_assist(&self) -> Option<&MatchEvent> {
        self.pending_assist.and_then(|id| self.get(id))
    }

    /// Goals scored by `team_id`, zero for a team not in the match.
    pub fn goals_for(&self, team_id: TeamId) -> u32 {
        self.events
            .iter()
            .filter(|e| e.is_goal() && e.team_id == team_id)
            .count() as u32
    }

    /// Which slot `team_id` occupies in this match.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if team_id == self.team_a {
            Some(Side::TeamA)
        } else if team_id == self.team_b {
            Some(Side::TeamB)
        } else {
            None
        }
    }

    /// Append a goal and make it the pending-assist goal.
    pub fn record_goal(
        &mut self,
        scorer: &Player,
        team_id: TeamId,
        minute: u32,
        at: DateTime<Utc>,
    ) -> Result<&MatchEvent> {
        let side = self
            .side_of(team_id)
            .ok_or(RachaError::TeamNotInMatch(team_id))?;

        let id = self.next_id;
        self.next_id += 1;
        self.events.push(MatchEvent {
            id,
            kind: MatchEventKind::Goal,
            player_id: scorer.id,
            player_name: scorer.name.clone(),
            team_id,
            minute,
            timestamp: at,
            assist_player_id: None,
            assist_player_name: None,
        });
        self.score.increment(side);
        self.pending_assist = Some(id);

        Ok(&self.events[self.events.len() - 1])
    }

    /// Resolve the pending goal's assist. `None` records an unassisted goal.
    ///
    /// The caller is responsible for checking the assisting player belongs to
    /// the scoring team.
    pub fn attach_assist(&mut self, assist: Option<&Player>) -> Result<&MatchEvent> {
        let id = self.pending_assist.ok_or(RachaError::NoPendingAssist)?;
        let index = self
            .position(id)
            .ok_or(RachaError::NoPendingAssist)?;

        if let Some(player) = assist {
            if player.id == self.events[index].player_id {
                return Err(RachaError::SelfAssist(player.id));
            }
            let event = &mut self.events[index];
            event.assist_player_id = Some(player.id);
            event.assist_player_name = Some(player.name.clone());
        }
        self.pending_assist = None;

        Ok(&self.events[index])
    }

    /// Remove a goal recorded less than `window` ago, together with its
    /// assist, and take it off the score.
    pub fn undo(&mut self, id: EventId, now: DateTime<Utc>, window: Duration) -> Result<MatchEvent> {
        let index = self.position(id).ok_or(RachaError::EventNotFound(id))?;
        let event = &self.events[index];
        if !event.is_goal() {
            return Err(RachaError::EventNotUndoable(id));
        }
        let age = now - event.timestamp;
        if age > window {
            return Err(RachaError::UndoWindowElapsed {
                id,
                age_secs: age.num_seconds(),
                window_secs: window.num_seconds(),
            });
        }
        let side = self
            .side_of(event.team_id)
            .ok_or(RachaError::EventNotUndoable(id))?;

        let event = self.events.remove(index);
        self.score.decrement(side);
        if self.pending_assist == Some(id) {
            self.pending_assist = None;
        }
        Ok(event)
    }

    pub fn is_undoable(&self, id: EventId, now: DateTime<Utc>, window: Duration) -> bool {
        self.get(id)
            .is_some_and(|e| e.is_goal() && now - e.timestamp <= window)
    }

    /// Ids of the events that may still be undone, newest first.
    pub fn undoable_events(&self, now: DateTime<Utc>, window: Duration) -> Vec<EventId> {
        self.recent_first()
            .filter(|e| e.is_goal() && now - e.timestamp <= window)
            .map(|e| e.id)
            .collect()
    }

    pub(crate) fn into_events(self) -> Vec<MatchEvent> {
        self.events
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }
}
