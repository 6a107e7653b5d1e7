use crate::domain::rules::MaxPoints;
use crate::domain::scoring::{
    adjust_points, knock, knock_down, pass, pass_penalty, start_new_game, toggle_short_round,
    win, win_penalty,
};
use crate::domain::state::{PlayerStatus, RoundPhase, RoundState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

fn round_with_points(max_points: MaxPoints, points: &[i32]) -> RoundState {
    let mut state = RoundState::new(max_points, &[]);
    state.seats = points
        .iter()
        .enumerate()
        .map(|(i, &p)| Seat {
            player_id: i as i32 + 1,
            points: p,
            eliminated: false,
        })
        .collect();
    state
}

fn kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn penalties() {
    assert_eq!(pass_penalty(0), 1);
    assert_eq!(pass_penalty(1), 1);
    assert_eq!(pass_penalty(3), 3);
    assert_eq!(win_penalty(0, false), 1);
    assert_eq!(win_penalty(2, false), 3);
    assert_eq!(win_penalty(2, true), 4);
}

#[test]
fn fresh_round_is_playing() {
    let state = RoundState::new(MaxPoints::Normal, &[7, 8, 9]);
    assert_eq!(state.phase(), RoundPhase::Playing);
    assert_eq!(state.current_game, 1);
    assert_eq!(state.seats.len(), 3);
    assert!(state.seats.iter().all(|s| s.points == 0 && !s.eliminated));
    assert!(state.can_act(7));
    assert!(!state.can_act(99));
}

#[test]
fn pass_without_knocks_costs_one_point() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0, 0]);
    assert_eq!(pass(&mut state, 2).unwrap(), 1);

    let seat = state.seat(2).unwrap();
    assert_eq!(seat.points, 1);
    assert!(seat.eliminated);
    assert_eq!(state.status_of(2), Some(PlayerStatus::Eliminated));
}

#[test]
fn pass_after_knocks_costs_the_knock_count() {
    let mut state = round_with_points(MaxPoints::Normal, &[3, 0]);
    knock(&mut state).unwrap();
    knock(&mut state).unwrap();
    knock(&mut state).unwrap();

    assert_eq!(pass(&mut state, 1).unwrap(), 3);
    assert_eq!(state.seat(1).unwrap().points, 6);
    // knocks stay for the rest of the game
    assert_eq!(state.knocks, 3);
}

#[test]
fn pass_is_capped_at_the_ceiling() {
    let mut state = round_with_points(MaxPoints::Short, &[9, 0]);
    state.knocks = 4;
    pass(&mut state, 1).unwrap();
    assert_eq!(state.seat(1).unwrap().points, 10);
    assert_eq!(state.status_of(1), Some(PlayerStatus::Out));
}

#[test]
fn pass_twice_is_rejected() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0]);
    pass(&mut state, 1).unwrap();
    let err = pass(&mut state, 1).unwrap_err();
    assert_eq!(kind(err), ValidationKind::PlayerEliminated);
}

#[test]
fn pass_by_stranger_is_rejected() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0]);
    let err = pass(&mut state, 42).unwrap_err();
    assert_eq!(kind(err), ValidationKind::PlayerNotInRound);
}

#[test]
fn win_gives_losers_one_plus_knocks() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 2, 5]);
    knock(&mut state).unwrap();

    let outcome = win(&mut state, 1).unwrap();
    assert!(!outcome.armoede);
    assert_eq!(outcome.penalty, 2);
    assert_eq!(outcome.round_winner, None);

    assert_eq!(state.seat(1).unwrap().points, 0);
    assert_eq!(state.seat(2).unwrap().points, 4);
    assert_eq!(state.seat(3).unwrap().points, 7);
    assert!(state.seats.iter().all(|s| s.eliminated));
    assert_eq!(state.knocks, 0);
    assert_eq!(state.phase(), RoundPhase::BetweenGames);
}

#[test]
fn win_skips_players_who_passed() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0, 0]);
    pass(&mut state, 3).unwrap();
    win(&mut state, 1).unwrap();

    assert_eq!(state.seat(2).unwrap().points, 1);
    // passed player keeps only the pass penalty
    assert_eq!(state.seat(3).unwrap().points, 1);
}

#[test]
fn armoede_adds_an_extra_point() {
    let mut state = round_with_points(MaxPoints::Normal, &[14, 3, 0]);
    let outcome = win(&mut state, 3).unwrap();

    assert!(outcome.armoede);
    assert_eq!(outcome.penalty, 2);
    assert_eq!(state.seat(1).unwrap().points, 15);
    assert_eq!(state.seat(2).unwrap().points, 5);
}

#[test]
fn armoede_counts_the_winner_too() {
    let mut state = round_with_points(MaxPoints::Short, &[9, 2]);
    assert_eq!(state.status_of(1), Some(PlayerStatus::Armoede));

    let outcome = win(&mut state, 1).unwrap();
    assert!(outcome.armoede);
    assert_eq!(state.seat(2).unwrap().points, 4);
}

#[test]
fn last_player_below_ceiling_wins_the_round() {
    let mut state = round_with_points(MaxPoints::Normal, &[14, 10, 15]);
    state.seat_mut(3).unwrap().eliminated = true;

    let outcome = win(&mut state, 2).unwrap();
    assert_eq!(outcome.round_winner, Some(2));
    assert_eq!(state.winner_id, Some(2));
    assert_eq!(state.seat(1).unwrap().points, 15);
    assert_eq!(state.phase(), RoundPhase::Finished);
    assert_eq!(state.status_of(2), Some(PlayerStatus::Winner));
    assert_eq!(state.status_of(3), Some(PlayerStatus::Out));
}

#[test]
fn nothing_happens_between_games() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0]);
    win(&mut state, 1).unwrap();

    assert_eq!(kind(pass(&mut state, 2).unwrap_err()), ValidationKind::RoundNotActive);
    assert_eq!(kind(win(&mut state, 2).unwrap_err()), ValidationKind::RoundNotActive);
    assert_eq!(kind(knock(&mut state).unwrap_err()), ValidationKind::RoundNotActive);
    assert!(!state.can_knock());
}

#[test]
fn knock_down_stops_at_zero() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0]);
    assert_eq!(knock_down(&mut state), 0);
    knock(&mut state).unwrap();
    assert!(state.can_knock_down());
    assert_eq!(knock_down(&mut state), 0);
    assert!(!state.can_knock_down());
}

#[test]
fn new_game_restores_everyone_below_the_ceiling() {
    let mut state = round_with_points(MaxPoints::Normal, &[14, 2, 0]);
    pass(&mut state, 2).unwrap();
    win(&mut state, 3).unwrap();
    assert_eq!(state.seat(1).unwrap().points, 15);
    assert!(state.can_start_new_game());

    assert_eq!(start_new_game(&mut state).unwrap(), 2);
    assert_eq!(state.phase(), RoundPhase::Playing);
    assert!(state.seat(1).unwrap().eliminated);
    assert!(!state.seat(2).unwrap().eliminated);
    assert!(!state.seat(3).unwrap().eliminated);
    assert_eq!(state.knocks, 0);
}

#[test]
fn new_game_rejected_while_playing_or_finished() {
    let mut state = round_with_points(MaxPoints::Normal, &[0, 0]);
    assert_eq!(
        kind(start_new_game(&mut state).unwrap_err()),
        ValidationKind::RoundInProgress
    );

    let mut finished = round_with_points(MaxPoints::Normal, &[14, 0]);
    win(&mut finished, 2).unwrap();
    assert_eq!(finished.winner_id, Some(2));
    assert_eq!(
        kind(start_new_game(&mut finished).unwrap_err()),
        ValidationKind::RoundFinished
    );
}

#[test]
fn short_round_toggles_until_someone_reaches_nine() {
    let mut state = round_with_points(MaxPoints::Normal, &[8, 3]);
    assert_eq!(toggle_short_round(&mut state).unwrap(), MaxPoints::Short);
    assert!(state.is_short_round());
    assert_eq!(toggle_short_round(&mut state).unwrap(), MaxPoints::Normal);

    adjust_points(&mut state, 1, 1).unwrap();
    assert!(!state.can_toggle_short_round());
    assert_eq!(
        kind(toggle_short_round(&mut state).unwrap_err()),
        ValidationKind::ShortRoundLocked
    );
}

#[test]
fn manual_corrections_are_clamped() {
    let mut state = round_with_points(MaxPoints::Short, &[0, 10]);
    assert_eq!(adjust_points(&mut state, 1, -1).unwrap(), 0);
    assert_eq!(adjust_points(&mut state, 1, 1).unwrap(), 1);
    assert_eq!(adjust_points(&mut state, 2, 1).unwrap(), 10);
    assert_eq!(adjust_points(&mut state, 2, -1).unwrap(), 9);
}

#[test]
fn corrections_rejected_once_round_is_won() {
    let mut state = round_with_points(MaxPoints::Normal, &[14, 0]);
    win(&mut state, 2).unwrap();
    assert_eq!(
        kind(adjust_points(&mut state, 1, -1).unwrap_err()),
        ValidationKind::RoundFinished
    );
}
