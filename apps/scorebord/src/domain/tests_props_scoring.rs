//! Property tests for the scoring rules (pure domain, no DB).
//!
//! Invariants checked after any sequence of actions:
//! - points stay within `0..=ceiling`
//! - a round winner exists only when exactly that player is below the ceiling
//! - the knock counter never goes negative
//! - finished rounds are never active

use proptest::prelude::*;

use crate::domain::rules::MaxPoints;
use crate::domain::scoring::{
    adjust_points, knock, knock_down, pass, start_new_game, toggle_short_round, win,
};
use crate::domain::state::{RoundPhase, RoundState};
use crate::domain::test_gens::{self, Action};

fn player_at(state: &RoundState, idx: usize) -> i32 {
    state.seats[idx % state.seats.len()].player_id
}

fn apply(state: &mut RoundState, action: Action) {
    let _ = match action {
        Action::Pass(i) => {
            let player = player_at(state, i);
            pass(state, player).map(|_| ())
        }
        Action::Win(i) => {
            let player = player_at(state, i);
            win(state, player).map(|_| ())
        }
        Action::Knock => knock(state).map(|_| ()),
        Action::KnockDown => {
            knock_down(state);
            Ok(())
        }
        Action::NewGame => start_new_game(state).map(|_| ()),
        Action::Adjust(i, d) => {
            let player = player_at(state, i);
            adjust_points(state, player, d).map(|_| ())
        }
        Action::ToggleShort => toggle_short_round(state).map(|_| ()),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_invariants_hold_over_action_sequences(
        start in test_gens::playing_round(),
        actions in prop::collection::vec(test_gens::action(), 0..60),
    ) {
        let mut state = start;
        for action in actions {
            apply(&mut state, action);

            let ceiling = state.ceiling();
            for seat in &state.seats {
                prop_assert!((0..=ceiling).contains(&seat.points));
            }
            prop_assert!(state.knocks >= 0);

            if let Some(winner) = state.winner_id {
                let remaining: Vec<i32> = state.remaining().map(|s| s.player_id).collect();
                prop_assert_eq!(remaining, vec![winner]);
                prop_assert!(!state.active);
                prop_assert_eq!(state.phase(), RoundPhase::Finished);
            }
        }
    }

    #[test]
    fn prop_rejected_actions_leave_state_untouched(
        start in test_gens::playing_round(),
        actions in prop::collection::vec(test_gens::action(), 0..40),
    ) {
        let mut state = start;
        for action in actions {
            let before = state.clone();
            let result = match action {
                Action::Pass(i) => pass(&mut state, player_at(&before, i)).map(|_| ()),
                Action::Win(i) => win(&mut state, player_at(&before, i)).map(|_| ()),
                Action::Knock => knock(&mut state).map(|_| ()),
                Action::NewGame => start_new_game(&mut state).map(|_| ()),
                Action::ToggleShort => toggle_short_round(&mut state).map(|_| ()),
                Action::Adjust(i, d) => adjust_points(&mut state, player_at(&before, i), d).map(|_| ()),
                Action::KnockDown => { knock_down(&mut state); Ok(()) }
            };
            if result.is_err() {
                prop_assert_eq!(&state, &before);
            }
        }
    }

    #[test]
    fn prop_win_penalises_only_players_still_in_the_game(
        start in test_gens::playing_round(),
    ) {
        let mut state = start;
        let before = state.clone();
        let winner = before.seats[0].player_id;
        let outcome = win(&mut state, winner).unwrap();

        for (old, new) in before.seats.iter().zip(&state.seats) {
            prop_assert!(new.eliminated);
            if old.player_id == winner || old.eliminated {
                prop_assert_eq!(old.points, new.points);
            } else {
                prop_assert_eq!(new.points, (old.points + outcome.penalty).min(state.ceiling()));
            }
        }
        prop_assert_eq!(state.knocks, 0);
    }

    #[test]
    fn prop_pass_penalty_matches_knocks(
        start in test_gens::playing_round(),
    ) {
        let mut state = start;
        let knocks = state.knocks;
        let player = state.seats[0].player_id;
        let before = state.seats[0].points;

        pass(&mut state, player).unwrap();
        let expected = (before + if knocks == 0 { 1 } else { knocks }).min(state.ceiling());
        prop_assert_eq!(state.seats[0].points, expected);
        prop_assert!(state.seats[0].eliminated);
    }

    #[test]
    fn prop_short_toggle_needs_everyone_below_nine(
        max in test_gens::max_points(),
        points in prop::collection::vec(0i32..10, 2..6),
    ) {
        let ids: Vec<i32> = (1..=points.len() as i32).collect();
        let mut state = RoundState::new(max, &ids);
        for (seat, p) in state.seats.iter_mut().zip(&points) {
            seat.points = *p;
        }
        let allowed = points.iter().all(|&p| p < 9);
        let result = toggle_short_round(&mut state);
        prop_assert_eq!(result.is_ok(), allowed);
        if allowed {
            prop_assert_eq!(state.max_points, if max == MaxPoints::Normal { MaxPoints::Short } else { MaxPoints::Normal });
        }
    }
}
