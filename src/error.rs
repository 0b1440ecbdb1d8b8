use crate::model::{EventId, Pairing, Phase, PlayerId, TeamId};

/// All errors that can occur while running a racha session.
///
/// Every error is returned before any state is touched, so a failed call
/// leaves the session exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum RachaError {
    /// No players were supplied for the draw.
    #[error("roster is empty")]
    EmptyRoster,

    /// The roster cannot be balanced and the demo fallback is disabled.
    #[error("roster has {found} players, a draw needs exactly {expected}")]
    InvalidRosterSize { expected: usize, found: usize },

    /// The same player id was supplied twice.
    #[error("player {0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),

    /// A skill rating outside `1..=5`.
    #[error("skill level {0} is outside 1..=5")]
    InvalidSkillLevel(u8),

    /// A match was requested before all teams were drawn.
    #[error("a match needs {required} teams, only {available} drawn")]
    InsufficientTeams { required: usize, available: usize },

    /// The operation is not allowed in the current phase.
    #[error("cannot {operation} during {phase}")]
    InvalidPhase {
        phase: Phase,
        operation: &'static str,
    },

    /// A pairing that does not name the three drawn teams.
    #[error("pairing {0:?} must name the three drawn teams")]
    InvalidPairing(Pairing),

    /// The team is not one of the two contestants.
    #[error("team {0} is not playing this match")]
    TeamNotInMatch(TeamId),

    /// The player is not on the given team.
    #[error("player {player} is not on team {team}")]
    PlayerNotOnTeam { player: PlayerId, team: TeamId },

    /// `attach_assist` without a goal waiting for one.
    #[error("no goal is awaiting an assist")]
    NoPendingAssist,

    /// The scorer was named as their own assist.
    #[error("player {0} cannot assist their own goal")]
    SelfAssist(PlayerId),

    /// No event with this id is in the ledger.
    #[error("event {0} not found")]
    EventNotFound(EventId),

    /// Only goal events can be undone.
    #[error("event {0} cannot be undone")]
    EventNotUndoable(EventId),

    /// The event is older than the undo window.
    #[error("event {id} is {age_secs}s old, undo window is {window_secs}s")]
    UndoWindowElapsed {
        id: EventId,
        age_secs: i64,
        window_secs: i64,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The session task behind a handle has stopped.
    #[error("session task has shut down")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, RachaError>;
