use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{RachaError, Result};
use crate::model::SkillLevel;

/// Number of teams produced by a draw.
pub const TEAM_COUNT: usize = 3;
/// Players per drawn team.
pub const TEAM_SIZE: usize = 5;
/// Players a draw balances; any other count triggers the demo fallback.
pub const DRAW_SIZE: usize = TEAM_COUNT * TEAM_SIZE;
/// Longest accepted undo window, one day.
pub const MAX_UNDO_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Tunable rules of a racha session.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// let config = racha::MatchConfig::from_json(r#"{ "goals_to_win": 3 }"#).unwrap();
/// assert_eq!(config.goals_to_win, 3);
/// assert_eq!(config.match_duration_secs, 420);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub match_duration_secs: u32,
    pub goals_to_win: u32,
    pub undo_window_secs: i64,
    pub default_skill_level: u8,
    pub fallback_to_demo_roster: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            match_duration_secs: 420,
            goals_to_win: 2,
            undo_window_secs: 30,
            default_skill_level: 3,
            fallback_to_demo_roster: true,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.match_duration_secs == 0 {
            return Err(RachaError::InvalidConfig(
                "match_duration_secs must be positive".to_string(),
            ));
        }
        if self.goals_to_win == 0 {
            return Err(RachaError::InvalidConfig(
                "goals_to_win must be positive".to_string(),
            ));
        }
        if !(0..=MAX_UNDO_WINDOW_SECS).contains(&self.undo_window_secs) {
            return Err(RachaError::InvalidConfig(format!(
                "undo_window_secs {} is outside 0..={MAX_UNDO_WINDOW_SECS}",
                self.undo_window_secs
            )));
        }
        SkillLevel::new(self.default_skill_level).map_err(|_| {
            RachaError::InvalidConfig(format!(
                "default_skill_level {} is outside 1..=5",
                self.default_skill_level
            ))
        })?;
        Ok(())
    }

    pub(crate) fn undo_window(&self) -> Duration {
        Duration::seconds(self.undo_window_secs.clamp(0, MAX_UNDO_WINDOW_SECS))
    }

    pub(crate) fn default_skill(&self) -> SkillLevel {
        SkillLevel::new(self.default_skill_level).unwrap_or(SkillLevel::DEFAULT)
    }
}
