use itertools::Itertools;

use crate::config::TEAM_COUNT;
use crate::model::{Pairing, Team, TeamId};

/// Next pairing under "winner stays on".
///
/// The team that was waiting comes on against the loser, and the winner sits
/// out. Yields `None` when the roster is not exactly three distinct teams,
/// when the finished pairing does not belong to it, or when the match had no
/// winner.
pub fn next_pairing(teams: &[Team], finished: &Pairing, winner: Option<TeamId>) -> Option<Pairing> {
    let ids = teams.iter().map(|t| t.id).unique().collect_vec();
    if ids.len() != TEAM_COUNT || teams.len() != TEAM_COUNT {
        return None;
    }
    let known = |id: TeamId| ids.contains(&id);
    if !(known(finished.team_a) && known(finished.team_b) && known(finished.waiting)) {
        return None;
    }

    let winner = winner?;
    let loser = if winner == finished.team_a {
        finished.team_b
    } else if winner == finished.team_b {
        finished.team_a
    } else {
        return None;
    };

    Some(Pairing {
        team_a: finished.waiting,
        team_b: loser,
        waiting: winner,
    })
}
