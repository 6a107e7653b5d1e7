mod common;

use common::{memory_state, seed_round};
use scorebord::domain::rules::MaxPoints;
use scorebord::repos::{round_players, rounds};
use scorebord::{with_txn, AppError, ErrorCode};

#[tokio::test]
async fn duplicate_round_number_is_a_conflict() -> Result<(), AppError> {
    let state = memory_state().await;
    let (_players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let session_id = round.round.session_id;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            rounds::create_round(txn, session_id, 1, 15).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DuplicateRoundNumber);
    assert_eq!(err.exit_code(), 4);
    Ok(())
}

#[tokio::test]
async fn seating_a_player_twice_is_a_conflict() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let (round_id, player_id) = (round.round.id, players[0].id);

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            round_players::create(txn, round_id, player_id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DuplicateRoundPlayer);
    Ok(())
}

#[tokio::test]
async fn missing_parent_row_is_a_validation_error() {
    let state = memory_state().await;

    let err = with_txn(&state, |txn| {
        Box::pin(async move {
            rounds::create_round(txn, 999, 1, 15).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[test]
fn report_serializes_code_and_detail() {
    let err = AppError::not_found(ErrorCode::RoundNotFound, "Round 3 not found");
    let json = serde_json::to_value(err.report()).unwrap();
    assert_eq!(json["code"], "ROUND_NOT_FOUND");
    assert_eq!(json["detail"], "Round 3 not found");
    assert_eq!(AppError::Aborted.exit_code(), 130);
}
