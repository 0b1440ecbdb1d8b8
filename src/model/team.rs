use serde::Serialize;

use super::common::{PlayerId, TeamId};
use super::player::Player;

/// A drawn team. The player list is fixed once the draw is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub color: String,
    pub secondary_color: String,
    pub logo: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Look up a team member by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Sum of the players' skill ratings.
    pub fn total_skill(&self) -> u32 {
        self.players
            .iter()
            .map(|p| u32::from(p.skill_level.get()))
            .sum()
    }
}

/// Two contestants and the team sitting out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub waiting: TeamId,
}
