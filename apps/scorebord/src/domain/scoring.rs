use serde::Serialize;

use crate::domain::rules::{MaxPoints, SHORT_ROUND_LOCK_POINTS};
use crate::domain::state::{RoundPhase, RoundState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a won sub-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinOutcome {
    pub armoede: bool,
    /// Points handed to every losing player (before capping)
    pub penalty: i32,
    /// Set when the sub-game also decided the round
    pub round_winner: Option<i32>,
}

/// Points a player takes for passing: one, or the knock count once someone knocked.
pub fn pass_penalty(knocks: i32) -> i32 {
    if knocks == 0 {
        1
    } else {
        knocks
    }
}

/// Points every loser takes when a sub-game is won.
pub fn win_penalty(knocks: i32, armoede: bool) -> i32 {
    1 + knocks + i32::from(armoede)
}

fn ensure_playing(state: &RoundState) -> Result<(), DomainError> {
    match state.phase() {
        RoundPhase::Playing => Ok(()),
        RoundPhase::Finished => Err(DomainError::validation(
            ValidationKind::RoundFinished,
            "Round already has a winner",
        )),
        RoundPhase::BetweenGames => Err(DomainError::validation(
            ValidationKind::RoundNotActive,
            "No game in progress; start a new game first",
        )),
    }
}

fn active_seat(state: &mut RoundState, player_id: i32) -> Result<&mut Seat, DomainError> {
    let ceiling = state.ceiling();
    let seat = state.seat_mut(player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PlayerNotInRound,
            format!("Player {player_id} does not play in this round"),
        )
    })?;
    if seat.eliminated || seat.points >= ceiling {
        return Err(DomainError::validation(
            ValidationKind::PlayerEliminated,
            format!("Player {player_id} is out of the current game"),
        ));
    }
    Ok(seat)
}

/// A player folds the current sub-game.
pub fn pass(state: &mut RoundState, player_id: i32) -> Result<i32, DomainError> {
    ensure_playing(state)?;
    let penalty = pass_penalty(state.knocks);
    let ceiling = state.ceiling();

    let seat = active_seat(state, player_id)?;
    seat.points = (seat.points + penalty).min(ceiling);
    seat.eliminated = true;
    Ok(penalty)
}

/// Raise the stakes of the current sub-game.
pub fn knock(state: &mut RoundState) -> Result<i32, DomainError> {
    ensure_playing(state)?;
    state.knocks += 1;
    Ok(state.knocks)
}

/// Undo a knock; stays at zero.
pub fn knock_down(state: &mut RoundState) -> i32 {
    state.knocks = (state.knocks - 1).max(0);
    state.knocks
}

/// `player_id` wins the current sub-game; everyone still in it takes the penalty.
pub fn win(state: &mut RoundState, player_id: i32) -> Result<WinOutcome, DomainError> {
    ensure_playing(state)?;
    active_seat(state, player_id)?;

    let ceiling = state.ceiling();
    let armoede = state.is_armoede();
    let penalty = win_penalty(state.knocks, armoede);

    for seat in &mut state.seats {
        if seat.player_id != player_id && !seat.eliminated && seat.points < ceiling {
            seat.points = (seat.points + penalty).min(ceiling);
        }
        seat.eliminated = true;
    }

    state.knocks = 0;
    state.active = false;

    let round_winner = {
        let mut remaining = state.remaining();
        match (remaining.next(), remaining.next()) {
            (Some(last), None) => Some(last.player_id),
            _ => None,
        }
    };
    state.winner_id = round_winner;

    Ok(WinOutcome {
        armoede,
        penalty,
        round_winner,
    })
}

/// Deal the next sub-game of an undecided round. Returns the new game number.
pub fn start_new_game(state: &mut RoundState) -> Result<i32, DomainError> {
    match state.phase() {
        RoundPhase::BetweenGames => {}
        RoundPhase::Playing => {
            return Err(DomainError::validation(
                ValidationKind::RoundInProgress,
                "Current game is still being played",
            ))
        }
        RoundPhase::Finished => {
            return Err(DomainError::validation(
                ValidationKind::RoundFinished,
                "Round already has a winner",
            ))
        }
    }

    let ceiling = state.ceiling();
    for seat in &mut state.seats {
        seat.eliminated = seat.points >= ceiling;
    }
    state.active = true;
    state.knocks = 0;
    state.current_game += 1;
    Ok(state.current_game)
}

/// Switch between a normal and a short round.
pub fn toggle_short_round(state: &mut RoundState) -> Result<MaxPoints, DomainError> {
    if !state.can_toggle_short_round() {
        return Err(DomainError::validation(
            ValidationKind::ShortRoundLocked,
            format!("A player already has {SHORT_ROUND_LOCK_POINTS} or more points"),
        ));
    }
    state.max_points = state.max_points.toggled();
    Ok(state.max_points)
}

/// Manual correction of a player's points, kept within `0..=ceiling`.
pub fn adjust_points(
    state: &mut RoundState,
    player_id: i32,
    delta: i32,
) -> Result<i32, DomainError> {
    if state.phase() == RoundPhase::Finished {
        return Err(DomainError::validation(
            ValidationKind::RoundFinished,
            "Round already has a winner",
        ));
    }
    let ceiling = state.ceiling();
    let seat = state.seat_mut(player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PlayerNotInRound,
            format!("Player {player_id} does not play in this round"),
        )
    })?;
    seat.points = (seat.points + delta).clamp(0, ceiling);
    Ok(seat.points)
}
