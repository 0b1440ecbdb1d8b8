//! Balanced three-team draw.

mod demo;
mod palette;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::{MatchConfig, DRAW_SIZE, TEAM_COUNT, TEAM_SIZE};
use crate::error::{RachaError, Result};
use crate::model::{Player, RosterEntry, Team};

/// Result of a draw.
#[derive(Debug, Clone)]
pub struct Draw {
    pub teams: Vec<Team>,
    /// The confirmed roster could not be balanced and the demo roster was used.
    pub used_demo_roster: bool,
}

/// Partition a confirmed roster into three balanced teams of five.
///
/// Players are shuffled, stably ordered by skill and snake-drafted, so equal
/// ratings land on different teams from one draw to the next. A roster of
/// any size other than fifteen is replaced by the demo roster unless
/// [`MatchConfig::fallback_to_demo_roster`] is off.
pub fn draw_teams<R: Rng + ?Sized>(
    roster: Vec<RosterEntry>,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<Draw> {
    if roster.is_empty() {
        return Err(RachaError::EmptyRoster);
    }

    let found = roster.len();
    let (entries, used_demo_roster) = if found == DRAW_SIZE {
        (roster, false)
    } else if config.fallback_to_demo_roster {
        warn!(found, expected = DRAW_SIZE, "roster cannot be balanced, drawing demo roster");
        (demo::demo_roster(), true)
    } else {
        return Err(RachaError::InvalidRosterSize {
            expected: DRAW_SIZE,
            found,
        });
    };

    let default_skill = config.default_skill();
    let mut players = entries
        .into_iter()
        .map(|e| e.into_player(default_skill))
        .collect_vec();
    if let Some(id) = players.iter().map(|p| p.id).duplicates().next() {
        return Err(RachaError::DuplicatePlayer(id));
    }

    players.shuffle(rng);
    players.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));

    let mut buckets: Vec<Vec<Player>> = vec![Vec::with_capacity(TEAM_SIZE); TEAM_COUNT];
    for (pick, player) in players.into_iter().enumerate() {
        let round = pick / TEAM_COUNT;
        let position = pick % TEAM_COUNT;
        let slot = if round % 2 == 0 {
            position
        } else {
            TEAM_COUNT - 1 - position
        };
        buckets[slot].push(player);
    }

    let teams = buckets
        .into_iter()
        .zip(palette::pick(rng, TEAM_COUNT))
        .zip(1..)
        .map(|((players, identity), id)| Team {
            id,
            name: identity.name.to_string(),
            color: identity.color.to_string(),
            secondary_color: identity.secondary_color.to_string(),
            logo: identity.logo.to_string(),
            players,
        })
        .collect_vec();

    debug!(
        skills = ?teams.iter().map(Team::total_skill).collect_vec(),
        used_demo_roster,
        "drew teams"
    );
    Ok(Draw {
        teams,
        used_demo_roster,
    })
}

#[cfg(test)]
pub(crate) fn test_roster() -> Vec<RosterEntry> {
    (1..=DRAW_SIZE as u32)
        .map(|id| RosterEntry::new(id, format!("Player {id}")).with_skill((id % 5 + 1) as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_draw_is_a_partition() {
        let mut rng = StdRng::seed_from_u64(7);
        let draw = draw_teams(test_roster(), &MatchConfig::default(), &mut rng).unwrap();

        assert!(!draw.used_demo_roster);
        assert_eq!(draw.teams.len(), TEAM_COUNT);
        assert!(draw.teams.iter().all(|t| t.players.len() == TEAM_SIZE));

        let ids: Vec<u32> = draw
            .teams
            .iter()
            .flat_map(|t| t.players.iter().map(|p| p.id))
            .collect();
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(unique, (1..=15).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_draw_balances_skill() {
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let draw = draw_teams(test_roster(), &MatchConfig::default(), &mut rng).unwrap();
            let totals = draw.teams.iter().map(Team::total_skill).collect_vec();
            let spread = totals.iter().max().unwrap() - totals.iter().min().unwrap();
            assert!(spread <= 2, "seed {seed}: totals {totals:?}");
        }
    }

    #[test]
    fn test_draw_assigns_distinct_identities() {
        let mut rng = StdRng::seed_from_u64(3);
        let draw = draw_teams(test_roster(), &MatchConfig::default(), &mut rng).unwrap();
        assert_eq!(draw.teams.iter().map(|t| t.id).collect_vec(), vec![1, 2, 3]);
        assert!(draw.teams.iter().map(|t| t.name.as_str()).all_unique());
    }

    #[test]
    fn test_repeated_draws_differ() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = MatchConfig::default();
        let first = draw_teams(test_roster(), &config, &mut rng).unwrap();
        let differs = (0..10).any(|_| {
            let next = draw_teams(test_roster(), &config, &mut rng).unwrap();
            next.teams != first.teams
        });
        assert!(differs);
    }

    #[test]
    fn test_short_roster_falls_back_to_demo() {
        let mut rng = StdRng::seed_from_u64(1);
        let roster = test_roster().into_iter().take(8).collect_vec();
        let draw = draw_teams(roster, &MatchConfig::default(), &mut rng).unwrap();
        assert!(draw.used_demo_roster);
        assert!(draw
            .teams
            .iter()
            .flat_map(|t| &t.players)
            .all(|p| p.id >= 1000));
    }

    #[test]
    fn test_short_roster_rejected_without_fallback() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = MatchConfig {
            fallback_to_demo_roster: false,
            ..MatchConfig::default()
        };
        let roster = test_roster().into_iter().take(12).collect_vec();
        assert!(matches!(
            draw_teams(roster, &config, &mut rng),
            Err(RachaError::InvalidRosterSize {
                expected: 15,
                found: 12
            })
        ));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            draw_teams(Vec::new(), &MatchConfig::default(), &mut rng),
            Err(RachaError::EmptyRoster)
        ));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut roster = test_roster();
        roster[14].id = 3;
        assert!(matches!(
            draw_teams(roster, &MatchConfig::default(), &mut rng),
            Err(RachaError::DuplicatePlayer(3))
        ));
    }

    #[test]
    fn test_missing_skill_uses_default() {
        let mut rng = StdRng::seed_from_u64(5);
        let roster = (1..=15).map(|id| RosterEntry::new(id, "x")).collect_vec();
        let draw = draw_teams(roster, &MatchConfig::default(), &mut rng).unwrap();
        assert!(draw.teams.iter().all(|t| t.total_skill() == 15));
    }

    #[test]
    fn test_out_of_range_skill_still_draws() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut roster = test_roster();
        roster[0].skill_level = Some(0);
        roster[1].skill_level = Some(9);
        let draw = draw_teams(roster, &MatchConfig::default(), &mut rng).unwrap();

        assert!(!draw.used_demo_roster);
        let players = draw.teams.iter().flat_map(|t| &t.players).collect_vec();
        assert_eq!(players.len(), DRAW_SIZE);
        assert!(players
            .iter()
            .filter(|p| p.id == 1 || p.id == 2)
            .all(|p| p.skill_level.get() == 3));
    }
}
