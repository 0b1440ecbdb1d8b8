//! The live-match state machine.
//!
//! [`MatchSession`] owns every piece of mutable match state and is the only
//! writer. All operations take `&mut self`; hosts that share a session across
//! tasks go through [`SessionHandle`](crate::SessionHandle).

use std::sync::Arc;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::clock::{Clock, SystemClock};
use crate::config::{MatchConfig, TEAM_COUNT};
use crate::error::{RachaError, Result};
use crate::history::MatchHistory;
use crate::ledger::EventLedger;
use crate::model::{
    CompletedMatch, EventId, MatchEvent, MatchId, Pairing, Phase, PlayerId, RosterEntry, Score,
    Side, Team, TeamId,
};
use crate::observer::{SessionNotice, SessionObserver, TracingObserver};
use crate::roster;
use crate::rotation;
use crate::timer::{CountdownTimer, Tick};

/// The match currently on the pitch.
#[derive(Debug, Clone, Serialize)]
pub struct LiveSession {
    pub team_a: Team,
    pub team_b: Team,
    pub waiting_team: Team,
    ledger: EventLedger,
    timer: CountdownTimer,
    winner: Option<TeamId>,
}

impl LiveSession {
    fn new(team_a: Team, team_b: Team, waiting_team: Team, duration: u32) -> Self {
        let ledger = EventLedger::new(team_a.id, team_b.id);
        Self {
            team_a,
            team_b,
            waiting_team,
            ledger,
            timer: CountdownTimer::new(duration),
            winner: None,
        }
    }

    pub fn score(&self) -> Score {
        self.ledger.score()
    }

    /// Events in recording order.
    pub fn events(&self) -> &[MatchEvent] {
        self.ledger.events()
    }

    pub fn ledger(&self) -> &EventLedger {
        &self.ledger
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn winner(&self) -> Option<&Team> {
        self.winner.and_then(|id| self.contestant(id))
    }

    pub fn pairing(&self) -> Pairing {
        Pairing {
            team_a: self.team_a.id,
            team_b: self.team_b.id,
            waiting: self.waiting_team.id,
        }
    }

    /// One of the two teams playing.
    pub fn contestant(&self, id: TeamId) -> Option<&Team> {
        [&self.team_a, &self.team_b].into_iter().find(|t| t.id == id)
    }

    fn team_on(&self, side: Side) -> &Team {
        match side {
            Side::TeamA => &self.team_a,
            Side::TeamB => &self.team_b,
        }
    }

    /// The team that reached `goals_to_win`, if any.
    fn leader(&self, goals_to_win: u32) -> Option<TeamId> {
        let score = self.score();
        [Side::TeamA, Side::TeamB]
            .into_iter()
            .find(|&side| score.get(side) >= goals_to_win)
            .map(|side| self.team_on(side).id)
    }
}

/// Serializable view of a session for hosts to render.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub teams: Vec<Team>,
    pub live: Option<LiveSession>,
    pub queued_pairing: Option<Pairing>,
    pub completed_matches: usize,
}

/// Builder for [`MatchSession`].
pub struct MatchSessionBuilder {
    config: MatchConfig,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn SessionObserver>,
    seed: Option<u64>,
}

impl MatchSessionBuilder {
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Seed the draw and pairing shuffles, for reproducible sessions.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the config and create the session.
    pub fn build(self) -> Result<MatchSession> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> MatchSession {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MatchSession {
            config: self.config,
            clock: self.clock,
            observer: self.observer,
            rng,
            phase: Phase::TeamDraw,
            teams: Vec::new(),
            live: None,
            queued: None,
            history: MatchHistory::new(),
            next_match_id: 1,
        }
    }
}

impl Default for MatchSessionBuilder {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            clock: Arc::new(SystemClock),
            observer: Arc::new(TracingObserver),
            seed: None,
        }
    }
}

/// One racha: a draw, its matches and the match history.
pub struct MatchSession {
    config: MatchConfig,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn SessionObserver>,
    rng: StdRng,
    phase: Phase,
    teams: Vec<Team>,
    live: Option<LiveSession>,
    queued: Option<Pairing>,
    history: MatchHistory,
    next_match_id: MatchId,
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("teams", &self.teams)
            .field("live", &self.live)
            .field("queued", &self.queued)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl MatchSession {
    /// A session with default rules, the system clock and tracing output.
    pub fn new() -> Self {
        MatchSessionBuilder::default().assemble()
    }

    /// Start building a session with injected collaborators.
    pub fn builder() -> MatchSessionBuilder {
        MatchSessionBuilder::default()
    }

    /// Current phase of the session.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rules this session was built with.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Teams of the current draw, empty before a draw.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Look up a drawn team by id.
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// The match on the pitch, or the one that just ended.
    pub fn live(&self) -> Option<&LiveSession> {
        self.live.as_ref()
    }

    pub fn queued_pairing(&self) -> Option<Pairing> {
        self.queued
    }

    /// Matches archived so far.
    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Owned copy of the session state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            teams: self.teams.clone(),
            live: self.live.clone(),
            queued_pairing: self.queued,
            completed_matches: self.history.len(),
        }
    }

    /// Draw three balanced teams from the confirmed roster.
    #[instrument(skip(self, roster), fields(players = roster.len()))]
    pub fn draw_teams(&mut self, roster: Vec<RosterEntry>) -> Result<&[Team]> {
        self.expect_phase(&[Phase::TeamDraw], "draw teams")?;
        let draw = roster::draw_teams(roster, &self.config, &mut self.rng)?;

        self.teams = draw.teams;
        self.set_phase(Phase::MatchSelection);
        self.notify(SessionNotice::TeamsDrawn {
            team_ids: self.teams.iter().map(|t| t.id).collect(),
            used_demo_roster: draw.used_demo_roster,
        });
        Ok(&self.teams)
    }

    /// Choose the contestants of the next match instead of shuffling.
    #[instrument(skip(self))]
    pub fn queue_pairing(&mut self, pairing: Pairing) -> Result<()> {
        self.expect_phase(&[Phase::MatchSelection], "choose a pairing")?;
        let ids = [pairing.team_a, pairing.team_b, pairing.waiting];
        let known = ids.iter().all(|&id| self.team(id).is_some());
        if !known || !ids.iter().all_unique() {
            return Err(RachaError::InvalidPairing(pairing));
        }
        self.queued = Some(pairing);
        Ok(())
    }

    /// Put two teams on the pitch and the third on the bench.
    ///
    /// Uses the queued pairing when there is one, otherwise shuffles the
    /// drawn teams. The clock is set to the full match duration, stopped.
    #[instrument(skip(self))]
    pub fn start_match(&mut self) -> Result<&LiveSession> {
        if self.teams.len() != TEAM_COUNT {
            return Err(RachaError::InsufficientTeams {
                required: TEAM_COUNT,
                available: self.teams.len(),
            });
        }
        self.expect_phase(&[Phase::MatchSelection], "start a match")?;

        let pairing = match self.queued.take() {
            Some(pairing) => pairing,
            None => {
                let mut ids = self.teams.iter().map(|t| t.id).collect_vec();
                ids.shuffle(&mut self.rng);
                Pairing {
                    team_a: ids[0],
                    team_b: ids[1],
                    waiting: ids[2],
                }
            }
        };
        let team = |id: TeamId| {
            self.team(id)
                .cloned()
                .ok_or(RachaError::TeamNotInMatch(id))
        };
        let live = LiveSession::new(
            team(pairing.team_a)?,
            team(pairing.team_b)?,
            team(pairing.waiting)?,
            self.config.match_duration_secs,
        );

        self.set_phase(Phase::LiveMatch);
        self.notify(SessionNotice::MatchStarted {
            team_a: pairing.team_a,
            team_b: pairing.team_b,
            waiting: pairing.waiting,
        });
        Ok(&*self.live.insert(live))
    }

    /// Start the match clock.
    pub fn start_timer(&mut self) -> Result<()> {
        self.live_mut(&[Phase::LiveMatch], "start the clock")?
            .timer
            .start();
        Ok(())
    }

    /// Halt the clock without resetting it.
    pub fn pause_timer(&mut self) -> Result<()> {
        self.live_mut(&[Phase::LiveMatch], "pause the clock")?
            .timer
            .pause();
        Ok(())
    }

    /// Continue a paused clock.
    pub fn resume_timer(&mut self) -> Result<()> {
        self.live_mut(&[Phase::LiveMatch], "resume the clock")?
            .timer
            .resume();
        Ok(())
    }

    /// Stop the clock and put back the full match duration.
    pub fn reset_timer(&mut self) -> Result<()> {
        self.live_mut(&[Phase::LiveMatch], "reset the clock")?
            .timer
            .reset();
        Ok(())
    }

    /// Advance the match clock by one second.
    ///
    /// Outside a live match this does nothing. When the clock runs out with
    /// no winner the match ends level.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::LiveMatch {
            return Tick::Idle;
        }
        let Some(live) = self.live.as_mut() else {
            return Tick::Idle;
        };
        let tick = live.timer.tick();
        if tick == Tick::Expired {
            let undecided = live.winner.is_none();
            self.notify(SessionNotice::TimerExpired);
            if undecided {
                self.end_match();
            }
        }
        tick
    }

    /// Record a goal and open its assist slot. Reaching `goals_to_win` ends
    /// the match.
    #[instrument(skip(self))]
    pub fn record_goal(&mut self, player_id: PlayerId, team_id: TeamId) -> Result<EventId> {
        let goals_to_win = self.config.goals_to_win;
        let now = self.clock.now();
        let live = self.live_mut(&[Phase::LiveMatch], "record a goal")?;

        let team = live
            .contestant(team_id)
            .ok_or(RachaError::TeamNotInMatch(team_id))?;
        let scorer = team
            .player(player_id)
            .cloned()
            .ok_or(RachaError::PlayerNotOnTeam {
                player: player_id,
                team: team_id,
            })?;
        let minute = live.timer.current_minute();
        let event_id = live.ledger.record_goal(&scorer, team_id, minute, now)?.id;
        let score = live.score();
        let winner = live.leader(goals_to_win);
        live.winner = winner;

        self.notify(SessionNotice::GoalRecorded {
            event_id,
            player_id,
            team_id,
            minute,
            score,
        });
        if winner.is_some() {
            self.end_match();
        }
        Ok(event_id)
    }

    /// Resolve the assist of the last goal; `None` means unassisted.
    #[instrument(skip(self))]
    pub fn attach_assist(&mut self, assist_player_id: Option<PlayerId>) -> Result<()> {
        let live = self.live_mut(&[Phase::LiveMatch, Phase::MatchEnded], "attach an assist")?;
        let pending = live
            .ledger
            .pending_assist()
            .ok_or(RachaError::NoPendingAssist)?;
        let team_id = pending.team_id;
        let assister = match assist_player_id {
            Some(id) => Some(
                live.contestant(team_id)
                    .and_then(|t| t.player(id))
                    .cloned()
                    .ok_or(RachaError::PlayerNotOnTeam {
                        player: id,
                        team: team_id,
                    })?,
            ),
            None => None,
        };
        let event_id = live.ledger.attach_assist(assister.as_ref())?.id;

        self.notify(SessionNotice::AssistAttached {
            event_id,
            assist_player_id,
        });
        Ok(())
    }

    /// Take back a goal recorded within the undo window.
    ///
    /// A retracted winning goal reopens the match with the clock paused.
    #[instrument(skip(self))]
    pub fn undo(&mut self, event_id: EventId) -> Result<()> {
        let goals_to_win = self.config.goals_to_win;
        let window = self.config.undo_window();
        let now = self.clock.now();
        let phase = self.phase;
        let live = self.live_mut(&[Phase::LiveMatch, Phase::MatchEnded], "undo an event")?;

        let removed = live.ledger.undo(event_id, now, window)?;
        let had_winner = live.winner;
        live.winner = live.leader(goals_to_win);
        let score = live.score();
        // A decided match stopped before the clock ran out.
        let reopen = phase == Phase::MatchEnded && had_winner.is_some() && live.winner.is_none();
        if reopen {
            live.timer.start();
            live.timer.pause();
        }

        self.notify(SessionNotice::GoalUndone {
            event_id,
            team_id: removed.team_id,
            score,
        });
        if reopen {
            info!(event_id, "winning goal undone, match reopened");
            self.set_phase(Phase::LiveMatch);
            self.notify(SessionNotice::WinRetracted {
                team_id: removed.team_id,
            });
        }
        Ok(())
    }

    /// Goals of the live match that can still be undone, newest first.
    pub fn undoable_events(&self) -> Vec<EventId> {
        let window = self.config.undo_window();
        self.live
            .as_ref()
            .map(|live| live.ledger.undoable_events(self.clock.now(), window))
            .unwrap_or_default()
    }

    /// Archive the finished match and queue the winner-stays pairing.
    ///
    /// Returns the queued pairing, or `None` when the match ended level and
    /// the next match will shuffle instead.
    #[instrument(skip(self))]
    pub fn start_next_match(&mut self) -> Result<Option<Pairing>> {
        self.expect_phase(&[Phase::MatchEnded], "start the next match")?;
        self.queued = self
            .archive()
            .and_then(|(finished, winner)| rotation::next_pairing(&self.teams, &finished, winner));
        self.set_phase(Phase::MatchSelection);
        Ok(self.queued)
    }

    /// Discard the drawn teams and go back to the draw. History is kept.
    #[instrument(skip(self))]
    pub fn new_draw(&mut self) -> Result<()> {
        self.expect_phase(
            &[Phase::MatchSelection, Phase::MatchEnded],
            "start a new draw",
        )?;
        if self.phase == Phase::MatchEnded {
            self.archive();
        }
        self.teams.clear();
        self.queued = None;
        self.live = None;
        self.set_phase(Phase::TeamDraw);
        self.notify(SessionNotice::DrawDiscarded);
        Ok(())
    }

    fn end_match(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        live.timer.stop();
        let winner = live.winner;
        let score = live.score();
        self.set_phase(Phase::MatchEnded);
        self.notify(SessionNotice::MatchEnded { winner, score });
    }

    /// Move the ended live match into history. Returns its pairing and winner.
    fn archive(&mut self) -> Option<(Pairing, Option<TeamId>)> {
        let live = self.live.take()?;
        let pairing = live.pairing();
        let winner = live.winner;
        let id = self.next_match_id;
        self.next_match_id += 1;

        let completed = CompletedMatch {
            id,
            final_score: live.score(),
            winner: live.winner().cloned(),
            duration_secs: live.timer.elapsed(),
            timestamp: self.clock.now(),
            events: live.ledger.into_events(),
            team_a: live.team_a,
            team_b: live.team_b,
        };
        self.history.push(completed);
        self.notify(SessionNotice::MatchArchived { match_id: id });
        Some((pairing, winner))
    }

    fn expect_phase(&self, allowed: &[Phase], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RachaError::InvalidPhase {
                phase: self.phase,
                operation,
            })
        }
    }

    fn live_mut(&mut self, allowed: &[Phase], operation: &'static str) -> Result<&mut LiveSession> {
        self.expect_phase(allowed, operation)?;
        let phase = self.phase;
        self.live
            .as_mut()
            .ok_or(RachaError::InvalidPhase { phase, operation })
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
    }

    fn notify(&self, notice: SessionNotice) {
        self.observer.notify(&notice);
    }
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new()
    }
}
