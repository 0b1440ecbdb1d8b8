use serde::{Deserialize, Serialize};
use tracing::warn;

use super::common::{PlayerId, SkillLevel};

/// A confirmed player. Identity and skill never change during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub skill_level: SkillLevel,
}

/// A player as supplied by the confirmed-roster provider.
///
/// Roster data usually carries no rating, so `skill_level` is optional and
/// filled from [`MatchConfig::default_skill_level`](crate::MatchConfig) when
/// the entry becomes a [`Player`]. A rating outside `1..=5` is treated as
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub skill_level: Option<u8>,
}

impl RosterEntry {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skill_level: None,
        }
    }

    pub fn with_skill(mut self, skill_level: u8) -> Self {
        self.skill_level = Some(skill_level);
        self
    }

    pub(crate) fn into_player(self, default_skill: SkillLevel) -> Player {
        let skill_level = match self.skill_level.map(SkillLevel::new) {
            Some(Ok(level)) => level,
            Some(Err(_)) => {
                warn!(
                    player = self.id,
                    skill_level = ?self.skill_level,
                    "skill level out of range, using default"
                );
                default_skill
            }
            None => default_skill,
        };
        Player {
            id: self.id,
            name: self.name,
            skill_level,
        }
    }
}
