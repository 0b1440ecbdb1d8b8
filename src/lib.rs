pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{MatchConfig, DRAW_SIZE, MAX_UNDO_WINDOW_SECS, TEAM_COUNT, TEAM_SIZE};
pub use error::{RachaError, Result};
pub use history::{MatchHistory, PlayerStats};
pub use ledger::EventLedger;
pub use model::*;
pub use observer::{SessionNotice, SessionObserver, TracingObserver};
pub use roster::{draw_teams, Draw};
pub use rotation::next_pairing;
pub use runtime::SessionHandle;
pub use session::{LiveSession, MatchSession, MatchSessionBuilder, SessionSnapshot};
pub use timer::{CountdownTimer, Tick};

pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod ledger;
pub mod model;
pub mod observer;
pub mod roster;
pub mod rotation;
pub mod runtime;
pub mod session;
pub mod timer;
