mod common;

use common::{memory_state, points, seed_players, seed_round, EVENING};
use scorebord::domain::rules::MaxPoints;
use scorebord::domain::state::{PlayerStatus, RoundPhase};
use scorebord::services::rounds::{round_state, RoundService};
use scorebord::services::sessions::SessionService;
use scorebord::{with_txn, AppError, ErrorCode};

#[tokio::test]
async fn start_round_seats_every_active_session_player() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost", "Sanne"], MaxPoints::Normal).await?;

    assert_eq!(round.round.round_number, 1);
    assert_eq!(round.round.max_points, 15);
    assert!(round.round.active);
    assert_eq!(round.round.current_game, Some(1));
    assert_eq!(round.round.knock_count, 0);
    assert_eq!(round.players.len(), players.len());
    assert_eq!(points(&round), vec![0, 0, 0]);
    Ok(())
}

#[tokio::test]
async fn next_round_is_numbered_and_closes_the_previous_one() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, first) = seed_round(&state, &["Anouk", "Joost", "Sanne"], MaxPoints::Normal).await?;
    let session_id = first.round.session_id;
    let sitting_out = players[2].id;

    let (second, first_after) = with_txn(&state, move |txn| {
        Box::pin(async move {
            SessionService::new()
                .toggle_player(txn, session_id, sitting_out)
                .await?;
            let service = RoundService::new();
            let second = service.start_round(txn, session_id, MaxPoints::Short).await?;
            let first_after = service.round_with_players(txn, first.round.id).await?;
            Ok::<_, AppError>((second, first_after))
        })
    })
    .await?;

    assert_eq!(second.round.round_number, 2);
    assert_eq!(second.round.max_points, 10);
    assert_eq!(second.players.len(), 2);
    assert!(second.seat(sitting_out).is_none());
    assert!(!first_after.round.active);
    Ok(())
}

#[tokio::test]
async fn round_needs_two_active_players() -> Result<(), AppError> {
    let state = memory_state().await;
    let players = seed_players(&state, &["Anouk"]).await?;
    let ids: Vec<i32> = players.iter().map(|p| p.id).collect();

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            let sessions = SessionService::new();
            let session = sessions.start_session(txn, EVENING).await?;
            sessions.add_players(txn, session.id, &ids).await?;
            RoundService::new()
                .start_round(txn, session.id, MaxPoints::Normal)
                .await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::NotEnoughPlayers);
    Ok(())
}

#[tokio::test]
async fn full_round_until_one_player_is_left() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost", "Sanne"], MaxPoints::Normal).await?;
    let round_id = round.round.id;
    let (a, b, c) = (players[0].id, players[1].id, players[2].id);

    let finished = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = RoundService::new();

            // game 1: two knocks, Anouk folds, Joost wins
            service.knock(txn, round_id).await?;
            let knocked = service.knock(txn, round_id).await?;
            assert_eq!(knocked.round.knock_count, 2);

            let passed = service.pass(txn, round_id, a).await?;
            assert_eq!(points(&passed), vec![2, 0, 0]);
            assert!(passed.seat(a).unwrap().round_player.eliminated);

            let (outcome, won) = service.win(txn, round_id, b).await?;
            assert_eq!(outcome.penalty, 3);
            assert!(!outcome.armoede);
            assert_eq!(outcome.round_winner, None);
            assert_eq!(points(&won), vec![2, 0, 3]);
            assert!(!won.round.active);
            assert_eq!(won.round.knock_count, 0);

            // between games nothing can be played
            let err = service.pass(txn, round_id, c).await.unwrap_err();
            assert_eq!(AppError::from(err).code(), ErrorCode::RoundNotActive);

            // game 2: Sanne is corrected up to armoede, Anouk wins
            let next = service.start_new_game(txn, round_id).await?;
            assert_eq!(next.round.current_game, Some(2));
            assert!(next.players.iter().all(|p| !p.round_player.eliminated));
            let err = service.start_new_game(txn, round_id).await.unwrap_err();
            assert_eq!(AppError::from(err).code(), ErrorCode::RoundInProgress);

            for _ in 0..11 {
                service.add_point(txn, round_id, c).await?;
            }
            let loaded = service.round_with_players(txn, round_id).await?;
            let snapshot = round_state(&loaded)?;
            assert!(snapshot.is_armoede());
            assert_eq!(snapshot.status_of(c), Some(PlayerStatus::Armoede));

            let (outcome, won) = service.win(txn, round_id, a).await?;
            assert!(outcome.armoede);
            assert_eq!(outcome.penalty, 2);
            assert_eq!(points(&won), vec![2, 2, 15]);

            // game 3: Sanne is out and cannot act, Joost is pushed to 15
            service.start_new_game(txn, round_id).await?;
            let err = service.pass(txn, round_id, c).await.unwrap_err();
            assert_eq!(AppError::from(err).code(), ErrorCode::PlayerEliminated);

            for _ in 0..12 {
                service.add_point(txn, round_id, b).await?;
            }
            let (outcome, won) = service.win(txn, round_id, a).await?;
            assert!(outcome.armoede);
            assert_eq!(outcome.round_winner, Some(a));
            assert_eq!(points(&won), vec![2, 15, 15]);
            Ok::<_, AppError>(won)
        })
    })
    .await?;

    assert_eq!(finished.round.winner_id, Some(a));
    assert_eq!(finished.winner().map(|p| p.id), Some(a));
    let snapshot = round_state(&finished)?;
    assert_eq!(snapshot.phase(), RoundPhase::Finished);
    assert_eq!(snapshot.status_of(a), Some(PlayerStatus::Winner));
    assert_eq!(snapshot.status_of(b), Some(PlayerStatus::Out));

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().add_point(txn, round_id, b).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundFinished);
    Ok(())
}

#[tokio::test]
async fn knock_down_stops_at_zero() -> Result<(), AppError> {
    let state = memory_state().await;
    let (_players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let round_id = round.round.id;

    let after = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = RoundService::new();
            service.knock(txn, round_id).await?;
            service.knock_down(txn, round_id).await?;
            Ok::<_, AppError>(service.knock_down(txn, round_id).await?)
        })
    })
    .await?;

    assert_eq!(after.round.knock_count, 0);
    Ok(())
}

#[tokio::test]
async fn point_corrections_stay_within_bounds() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Short).await?;
    let round_id = round.round.id;
    let a = players[0].id;

    let after = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = RoundService::new();
            service.remove_point(txn, round_id, a).await?;
            for _ in 0..12 {
                service.add_point(txn, round_id, a).await?;
            }
            Ok::<_, AppError>(service.round_with_players(txn, round_id).await?)
        })
    })
    .await?;

    assert_eq!(points(&after), vec![10, 0]);

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().add_point(txn, round_id, 777).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotInRound);
    Ok(())
}

#[tokio::test]
async fn short_round_toggles_until_nine_points() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let round_id = round.round.id;
    let b = players[1].id;

    let short = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = RoundService::new();
            let short = service.toggle_short_round(txn, round_id).await?;
            for _ in 0..9 {
                service.add_point(txn, round_id, b).await?;
            }
            Ok::<_, AppError>(short)
        })
    })
    .await?;
    assert_eq!(short.round.max_points, 10);

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().toggle_short_round(txn, round_id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ShortRoundLocked);
    Ok(())
}

#[tokio::test]
async fn earlier_round_cannot_deal_again_once_a_newer_round_started() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, first) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let (first_id, session_id) = (first.round.id, first.round.session_id);
    let a = players[0].id;

    let second = with_txn(&state, move |txn| {
        Box::pin(async move {
            let service = RoundService::new();
            service.win(txn, first_id, a).await?;
            let second = service
                .start_round(txn, session_id, MaxPoints::Normal)
                .await?;
            service.win(txn, second.round.id, a).await?;
            Ok::<_, AppError>(second)
        })
    })
    .await?;
    let second_id = second.round.id;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().start_new_game(txn, first_id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundSuperseded);

    let service = RoundService::new();
    let first_after = service.round_with_players(state.db(), first_id).await?;
    assert!(!first_after.round.active);
    assert_eq!(first_after.round.current_game, Some(1));

    let second_after = with_txn(&state, move |txn| {
        Box::pin(async move {
            Ok::<_, AppError>(RoundService::new().start_new_game(txn, second_id).await?)
        })
    })
    .await?;
    assert!(second_after.round.active);
    assert_eq!(second_after.round.current_game, Some(2));
    Ok(())
}

#[tokio::test]
async fn closed_session_stops_new_games_and_scoring() -> Result<(), AppError> {
    let state = memory_state().await;
    let (players, round) = seed_round(&state, &["Anouk", "Joost"], MaxPoints::Normal).await?;
    let (round_id, session_id) = (round.round.id, round.round.session_id);
    let (a, b) = (players[0].id, players[1].id);

    with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().win(txn, round_id, a).await?;
            SessionService::new().close_session(txn, session_id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().start_new_game(txn, round_id).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionClosed);

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            RoundService::new().pass(txn, round_id, b).await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundNotActive);

    let after = RoundService::new()
        .round_with_players(state.db(), round_id)
        .await?;
    assert!(!after.round.active);
    assert_eq!(points(&after), vec![0, 1]);
    Ok(())
}
