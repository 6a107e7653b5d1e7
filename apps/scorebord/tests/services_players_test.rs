mod common;

use common::{memory_state, seed_players, seed_round};
use scorebord::domain::rules::MaxPoints;
use scorebord::services::players::PlayerService;
use scorebord::{with_txn, AppError, ErrorCode};

#[tokio::test]
async fn create_player_normalizes_name() -> Result<(), AppError> {
    let state = memory_state().await;

    let player = with_txn(&state, |txn| {
        Box::pin(async move {
            let player = PlayerService::new()
                .create_player(txn, "  \u{FF2A}oost  ")
                .await?;
            Ok::<_, AppError>(player)
        })
    })
    .await?;

    assert_eq!(player.name, "Joost");
    assert!(player.active);
    Ok(())
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let state = memory_state().await;

    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            PlayerService::new().create_player(txn, "   ").await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::EmptyPlayerName);
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn rename_and_toggle_active() -> Result<(), AppError> {
    let state = memory_state().await;
    let players = seed_players(&state, &["Anouk"]).await?;
    let id = players[0].id;

    let (renamed, toggled, active) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            let renamed = service.rename_player(txn, id, " Anouk B ").await?;
            let toggled = service.toggle_active(txn, id).await?;
            let active = service.list_active_players(txn).await?;
            Ok::<_, AppError>((renamed, toggled, active))
        })
    })
    .await?;

    assert_eq!(renamed.name, "Anouk B");
    assert!(!toggled.active);
    assert!(active.iter().all(|p| p.id != id));
    Ok(())
}

#[tokio::test]
async fn unused_player_can_be_deleted() -> Result<(), AppError> {
    let state = memory_state().await;
    let players = seed_players(&state, &["Sanne"]).await?;
    let id = players[0].id;

    let remaining = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            assert!(!service.is_player_used(txn, id).await?);
            service.delete_player_if_unused(txn, id).await?;
            Ok::<_, AppError>(service.list_players(txn).await?)
        })
    })
    .await?;

    assert!(remaining.is_empty());
    Ok(())
}

#[tokio::test]
async fn player_with_history_cannot_be_deleted() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, _round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let id = players[0].id;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            assert!(service.is_player_used(txn, id).await?);
            service.delete_player_if_unused(txn, id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PlayerInUse);
    assert_eq!(err.exit_code(), 4);
    Ok(())
}

#[tokio::test]
async fn unknown_player_is_not_found() {
    let state = memory_state().await;

    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            PlayerService::new().get_player(txn, 4242).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PlayerNotFound);
    assert_eq!(err.exit_code(), 3);
}
