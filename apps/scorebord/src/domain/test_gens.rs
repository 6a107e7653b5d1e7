// Proptest generators for round states and scoring actions.

use proptest::prelude::*;

use crate::domain::rules::MaxPoints;
use crate::domain::state::{RoundState, Seat};

pub fn max_points() -> impl Strategy<Value = MaxPoints> {
    prop_oneof![Just(MaxPoints::Normal), Just(MaxPoints::Short)]
}

/// A round in the middle of a sub-game: 2..=8 players, points below the ceiling.
pub fn playing_round() -> impl Strategy<Value = RoundState> {
    (max_points(), 2usize..=8, 0i32..=5).prop_flat_map(|(max, n, knocks)| {
        let ceiling = max.value();
        prop::collection::vec((0..ceiling, any::<bool>()), n).prop_map(move |raw| {
            let mut state = RoundState::new(max, &[]);
            state.knocks = knocks;
            state.seats = raw
                .into_iter()
                .enumerate()
                .map(|(i, (points, eliminated))| Seat {
                    player_id: i as i32 + 1,
                    points,
                    eliminated,
                })
                .collect();
            // at least one player must still be in the game
            state.seats[0].eliminated = false;
            state
        })
    })
}

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Pass(usize),
    Win(usize),
    Knock,
    KnockDown,
    NewGame,
    Adjust(usize, i32),
    ToggleShort,
}

pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0usize..8).prop_map(Action::Pass),
        3 => (0usize..8).prop_map(Action::Win),
        2 => Just(Action::Knock),
        1 => Just(Action::KnockDown),
        2 => Just(Action::NewGame),
        1 => ((0usize..8), prop_oneof![Just(-1), Just(1)]).prop_map(|(i, d)| Action::Adjust(i, d)),
        1 => Just(Action::ToggleShort),
    ]
}
