mod common;
mod event;
mod player;
mod session;
mod team;

pub use common::*;
pub use event::*;
pub use player::*;
pub use session::*;
pub use team::*;
