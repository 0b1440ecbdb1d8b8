use serde::{Deserialize, Serialize};

use crate::error::{RachaError, Result};

pub type PlayerId = u32;
pub type TeamId = u32;
pub type EventId = u32;
pub type MatchId = u32;

/// A static 1-5 rating used only to balance the draw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: SkillLevel = SkillLevel(3);

    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(RachaError::InvalidSkillLevel(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = RachaError;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

/// One of the two contestant slots of a live match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    TeamA,
    TeamB,
}
