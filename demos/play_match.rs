use std::time::Duration;

use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use racha::{MatchConfig, MatchSession, Phase, RosterEntry, SessionHandle};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MatchConfig {
        match_duration_secs: 5,
        ..MatchConfig::default()
    };
    let session = MatchSession::builder().config(config).build().unwrap();
    let (handle, task) = SessionHandle::spawn(session);

    let names = [
        "Bruno", "Caio", "Diego", "Edu", "Felipe", "Gabriel", "Hugo", "Igor", "João", "Kaique",
        "Lucas", "Marcos", "Nando", "Otávio", "Paulo",
    ];
    let roster = names
        .iter()
        .zip(1..)
        .map(|(name, id)| RosterEntry::new(id, *name).with_skill((id % 5 + 1) as u8))
        .collect();

    for team in handle.draw_teams(roster).await.unwrap() {
        let players: Vec<&str> = team.players.iter().map(|p| p.name.as_str()).collect();
        println!("{} ({}): {}", team.name, team.total_skill(), players.join(", "));
    }

    for round in 1..=3 {
        let live = handle.start_match().await.unwrap();
        println!(
            "Match {round}: {} vs {}, {} waiting",
            live.team_a.name, live.team_b.name, live.waiting_team.name
        );
        handle.start_timer().await.unwrap();

        if round != 2 {
            let scorer = live.team_a.players[0].id;
            let assist = live.team_a.players[1].id;
            handle.record_goal(scorer, live.team_a.id).await.unwrap();
            handle.attach_assist(Some(assist)).await.unwrap();
            handle.record_goal(scorer, live.team_a.id).await.unwrap();
            handle.attach_assist(None).await.unwrap();
        }

        while handle.snapshot().await.unwrap().phase == Phase::LiveMatch {
            sleep(Duration::from_millis(250)).await;
        }
        let ended = handle.snapshot().await.unwrap().live.unwrap();
        match ended.winner() {
            Some(winner) => println!(
                "{} win {}-{}",
                winner.name,
                ended.score().team_a,
                ended.score().team_b
            ),
            None => println!("Level on time"),
        }

        if let Some(next) = handle.start_next_match().await.unwrap() {
            println!("Next up: team {} vs team {}", next.team_a, next.team_b);
        }
    }

    for stats in handle.player_stats().await.unwrap() {
        println!("{}: {} goals, {} assists", stats.player_name, stats.goals, stats.assists);
    }

    drop(handle);
    let session = task.await.unwrap();
    println!("{} matches played", session.history().len());
}
