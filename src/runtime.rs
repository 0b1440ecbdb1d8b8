//! A [`MatchSession`] running on its own tokio task.
//!
//! The task is the single owner of the session: every operation is sent to it
//! as a job over a channel and applied in arrival order, interleaved with the
//! one-second clock ticks. A goal and the score change it causes are
//! therefore never observed half-applied, whatever thread the caller is on.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument};

use crate::error::{RachaError, Result};
use crate::history::PlayerStats;
use crate::model::{EventId, Pairing, Phase, PlayerId, RosterEntry, Team, TeamId};
use crate::session::{LiveSession, MatchSession, SessionSnapshot};

type Job = Box<dyn FnOnce(&mut MatchSession) + Send>;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const QUEUE_DEPTH: usize = 32;

/// Cloneable handle to a session task.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> racha::Result<()> {
/// use racha::{MatchSession, RosterEntry, SessionHandle};
///
/// let (handle, _task) = SessionHandle::spawn(MatchSession::new());
/// let roster = (1..=15).map(|id| RosterEntry::new(id, format!("Player {id}"))).collect();
/// handle.draw_teams(roster).await?;
/// let live = handle.start_match().await?;
/// handle.start_timer().await?;
/// println!("{} vs {}", live.team_a.name, live.team_b.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionHandle {
    jobs: mpsc::Sender<Job>,
}

impl SessionHandle {
    /// Move `session` onto a new task. The task ends when every handle is
    /// dropped and hands the session back through its `JoinHandle`.
    pub fn spawn(session: MatchSession) -> (Self, JoinHandle<MatchSession>) {
        let (jobs, queue) = mpsc::channel(QUEUE_DEPTH);
        let task = tokio::spawn(run(session, queue));
        (Self { jobs }, task)
    }

    /// Run `f` on the session task and return its result.
    pub async fn call<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut MatchSession) -> R + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job: Job = Box::new(move |session| {
            let _ = reply.send(f(session));
        });
        self.jobs
            .send(job)
            .await
            .map_err(|_| RachaError::SessionClosed)?;
        response.await.map_err(|_| RachaError::SessionClosed)
    }

    async fn try_call<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut MatchSession) -> Result<R> + Send + 'static,
    {
        self.call(f).await?
    }

    #[instrument(skip(self, roster), fields(players = roster.len()))]
    pub async fn draw_teams(&self, roster: Vec<RosterEntry>) -> Result<Vec<Team>> {
        self.try_call(move |s| s.draw_teams(roster).map(<[Team]>::to_vec))
            .await
    }

    pub async fn queue_pairing(&self, pairing: Pairing) -> Result<()> {
        self.try_call(move |s| s.queue_pairing(pairing)).await
    }

    pub async fn start_match(&self) -> Result<LiveSession> {
        self.try_call(|s| s.start_match().cloned()).await
    }

    pub async fn start_timer(&self) -> Result<()> {
        self.try_call(MatchSession::start_timer).await
    }

    pub async fn pause_timer(&self) -> Result<()> {
        self.try_call(MatchSession::pause_timer).await
    }

    pub async fn resume_timer(&self) -> Result<()> {
        self.try_call(MatchSession::resume_timer).await
    }

    pub async fn reset_timer(&self) -> Result<()> {
        self.try_call(MatchSession::reset_timer).await
    }

    pub async fn record_goal(&self, player_id: PlayerId, team_id: TeamId) -> Result<EventId> {
        self.try_call(move |s| s.record_goal(player_id, team_id))
            .await
    }

    pub async fn attach_assist(&self, assist_player_id: Option<PlayerId>) -> Result<()> {
        self.try_call(move |s| s.attach_assist(assist_player_id))
            .await
    }

    pub async fn undo(&self, event_id: EventId) -> Result<()> {
        self.try_call(move |s| s.undo(event_id)).await
    }

    pub async fn undoable_events(&self) -> Result<Vec<EventId>> {
        self.call(|s| s.undoable_events()).await
    }

    pub async fn start_next_match(&self) -> Result<Option<Pairing>> {
        self.try_call(MatchSession::start_next_match).await
    }

    pub async fn new_draw(&self) -> Result<()> {
        self.try_call(MatchSession::new_draw).await
    }

    /// Owned copy of the session state.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.call(|s| s.snapshot()).await
    }

    /// Goal and assist totals across the archived matches.
    pub async fn player_stats(&self) -> Result<Vec<PlayerStats>> {
        self.call(|s| s.history().player_stats()).await
    }
}

async fn run(mut session: MatchSession, mut queue: mpsc::Receiver<Job>) -> MatchSession {
    let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            job = queue.recv() => {
                let Some(job) = job else {
                    break;
                };
                let was_ticking = clock_ticking(&session);
                job(&mut session);
                if !was_ticking && clock_ticking(&session) {
                    // Count whole seconds from the moment the clock starts.
                    ticker.reset();
                }
            }
            _ = ticker.tick() => {
                session.tick();
            }
        }
    }

    debug!(phase = %session.phase(), "session task finished");
    session
}

fn clock_ticking(session: &MatchSession) -> bool {
    session.phase() == Phase::LiveMatch
        && session
            .live()
            .is_some_and(|live| live.timer().is_running() && !live.timer().is_paused())
}
