use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::model::{CompletedMatch, PlayerId};

/// Goal and assist tally for one player across the archived matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub player_name: String,
    pub goals: u32,
    pub assists: u32,
}

/// Archive of finished matches, oldest first. Survives new draws.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MatchHistory {
    matches: Vec<CompletedMatch>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive a finished match.
    pub fn push(&mut self, completed: CompletedMatch) {
        self.matches.push(completed);
    }

    /// Archived matches, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CompletedMatch> {
        self.matches.iter()
    }

    /// Number of archived matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn latest(&self) -> Option<&CompletedMatch> {
        self.matches.last()
    }

    /// Scorers and assisters, most goals first, then most assists, then name.
    pub fn player_stats(&self) -> Vec<PlayerStats> {
        let mut stats: HashMap<PlayerId, PlayerStats> = HashMap::new();
        let goals = self
            .matches
            .iter()
            .flat_map(|m| &m.events)
            .filter(|e| e.is_goal());

        for event in goals {
            tally(&mut stats, event.player_id, &event.player_name).goals += 1;
            if let (Some(id), Some(name)) = (event.assist_player_id, &event.assist_player_name) {
                tally(&mut stats, id, name).assists += 1;
            }
        }

        stats
            .into_values()
            .sorted_by(|a, b| {
                b.goals
                    .cmp(&a.goals)
                    .then(b.assists.cmp(&a.assists))
                    .then_with(|| a.player_name.cmp(&b.player_name))
            })
            .collect()
    }
}

fn tally<'a>(
    stats: &'a mut HashMap<PlayerId, PlayerStats>,
    id: PlayerId,
    name: &str,
) -> &'a mut PlayerStats {
    stats.entry(id).or_insert_with(|| PlayerStats {
        player_id: id,
        player_name: name.to_string(),
        goals: 0,
        assists: 0,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{MatchEvent, MatchEventKind, Score, Team};

    fn team(id: u32) -> Team {
        Team {
            id,
            name: format!("Team {id}"),
            color: String::new(),
            secondary_color: String::new(),
            logo: String::new(),
            players: Vec::new(),
        }
    }

    fn goal(id: u32, scorer: (u32, &str), assist: Option<(u32, &str)>) -> MatchEvent {
        MatchEvent {
            id,
            kind: MatchEventKind::Goal,
            player_id: scorer.0,
            player_name: scorer.1.to_string(),
            team_id: 1,
            minute: 1,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap(),
            assist_player_id: assist.map(|a| a.0),
            assist_player_name: assist.map(|a| a.1.to_string()),
        }
    }

    fn completed(id: u32, events: Vec<MatchEvent>) -> CompletedMatch {
        CompletedMatch {
            id,
            team_a: team(1),
            team_b: team(2),
            final_score: Score {
                team_a: events.len() as u32,
                team_b: 0,
            },
            winner: None,
            events,
            duration_secs: 420,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 18, 7, 0).unwrap(),
        }
    }

    #[test]
    fn test_player_stats_across_matches() {
        let mut history = MatchHistory::new();
        history.push(completed(
            1,
            vec![
                goal(1, (10, "Bruno"), Some((11, "Caio"))),
                goal(2, (11, "Caio"), None),
            ],
        ));
        history.push(completed(2, vec![goal(1, (10, "Bruno"), Some((12, "Diego")))]));

        let stats = history.player_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats[0],
            PlayerStats {
                player_id: 10,
                player_name: "Bruno".to_string(),
                goals: 2,
                assists: 0
            }
        );
        assert_eq!((stats[1].player_id, stats[1].goals, stats[1].assists), (11, 1, 1));
        assert_eq!((stats[2].player_id, stats[2].goals, stats[2].assists), (12, 0, 1));
    }

    #[test]
    fn test_empty_history() {
        let history = MatchHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.player_stats().is_empty());
    }

    #[test]
    fn test_latest_is_last_pushed() {
        let mut history = MatchHistory::new();
        history.push(completed(1, Vec::new()));
        history.push(completed(2, Vec::new()));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().map(|m| m.id), Some(2));
        assert_eq!(history.iter().map(|m| m.id).collect_vec(), vec![1, 2]);
    }
}
