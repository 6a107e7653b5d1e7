#![allow(dead_code)]

// tests/common/mod.rs
use scorebord::domain::rules::MaxPoints;
use scorebord::repos::players::Player;
use scorebord::repos::relations::RoundWithPlayers;
use scorebord::services::players::PlayerService;
use scorebord::services::rounds::RoundService;
use scorebord::services::sessions::SessionService;
use scorebord::{build_state, with_txn, AppError, AppState, DbProfile};
use time::macros::datetime;
use time::OffsetDateTime;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    test_support::logging::init();
}

pub const EVENING: OffsetDateTime = datetime!(2025-10-06 20:15:00 +02:00);

/// Fresh, migrated in-memory database.
pub async fn memory_state() -> AppState {
    build_state()
        .with_db(DbProfile::InMemory)
        .build()
        .await
        .expect("build in-memory state")
}

/// Create players with unique names, in order.
pub async fn seed_players(state: &AppState, names: &[&str]) -> Result<Vec<Player>, AppError> {
    let names: Vec<String> = names
        .iter()
        .map(|n| test_support::unique_player_name(n))
        .collect();
    with_txn(state, move |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            let mut created = Vec::with_capacity(names.len());
            for name in &names {
                created.push(service.create_player(txn, name).await?);
            }
            Ok(created)
        })
    })
    .await
}

/// An active session with the given players and one started round.
pub async fn seed_round(
    state: &AppState,
    names: &[&str],
    max_points: MaxPoints,
) -> Result<(Vec<Player>, RoundWithPlayers), AppError> {
    let players = seed_players(state, names).await?;
    let ids: Vec<i32> = players.iter().map(|p| p.id).collect();
    let round = with_txn(state, move |txn| {
        Box::pin(async move {
            let sessions = SessionService::new();
            let session = sessions.start_session(txn, EVENING).await?;
            sessions.add_players(txn, session.id, &ids).await?;
            let round = RoundService::new()
                .start_round(txn, session.id, max_points)
                .await?;
            Ok::<_, AppError>(round)
        })
    })
    .await?;
    Ok((players, round))
}

/// Points per player, in seat order.
pub fn points(round: &RoundWithPlayers) -> Vec<i32> {
    round.players.iter().map(|p| p.round_player.points).collect()
}
