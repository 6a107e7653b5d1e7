use serde::Serialize;

use crate::domain::rules::{MaxPoints, SHORT_ROUND_LOCK_POINTS};

/// One player's score line within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub player_id: i32,
    pub points: i32,
    /// Sat out (passed or lost) the current sub-game
    pub eliminated: bool,
}

impl Seat {
    pub fn new(player_id: i32) -> Self {
        Self {
            player_id,
            points: 0,
            eliminated: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// A sub-game is being played
    Playing,
    /// Sub-game decided, next one not started yet
    BetweenGames,
    /// A round winner is known
    Finished,
}

/// Badge shown next to a player on the round screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Winner,
    Armoede,
    Out,
    Eliminated,
    Playing,
}

impl PlayerStatus {
    pub fn label(self) -> &'static str {
        match self {
            PlayerStatus::Winner => "Winnaar",
            PlayerStatus::Armoede => "Armoede",
            PlayerStatus::Out => "Af",
            PlayerStatus::Eliminated => "Gepast",
            PlayerStatus::Playing => "",
        }
    }
}

/// Everything the scoring rules need to know about a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    pub max_points: MaxPoints,
    pub active: bool,
    pub winner_id: Option<i32>,
    pub current_game: i32,
    pub knocks: i32,
    pub seats: Vec<Seat>,
}

impl RoundState {
    /// A freshly started round: first sub-game in play, nobody has points.
    pub fn new(max_points: MaxPoints, player_ids: &[i32]) -> Self {
        Self {
            max_points,
            active: true,
            winner_id: None,
            current_game: 1,
            knocks: 0,
            seats: player_ids.iter().copied().map(Seat::new).collect(),
        }
    }

    pub fn ceiling(&self) -> i32 {
        self.max_points.value()
    }

    pub fn phase(&self) -> RoundPhase {
        if self.winner_id.is_some() {
            RoundPhase::Finished
        } else if self.active {
            RoundPhase::Playing
        } else {
            RoundPhase::BetweenGames
        }
    }

    pub fn seat(&self, player_id: i32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    pub fn seat_mut(&mut self, player_id: i32) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.player_id == player_id)
    }

    /// Seats still below the ceiling
    pub fn remaining(&self) -> impl Iterator<Item = &Seat> {
        let ceiling = self.ceiling();
        self.seats.iter().filter(move |s| s.points < ceiling)
    }

    /// Someone sits one point below the ceiling.
    pub fn is_armoede(&self) -> bool {
        let armoede = self.max_points.armoede_points();
        self.seats.iter().any(|s| s.points == armoede)
    }

    pub fn is_short_round(&self) -> bool {
        self.max_points == MaxPoints::Short
    }

    pub fn can_toggle_short_round(&self) -> bool {
        self.seats.iter().all(|s| s.points < SHORT_ROUND_LOCK_POINTS)
    }

    pub fn can_knock(&self) -> bool {
        self.active
    }

    pub fn can_knock_down(&self) -> bool {
        self.knocks > 0
    }

    pub fn can_start_new_game(&self) -> bool {
        !self.active && self.winner_id.is_none()
    }

    /// Pass and win share the same precondition.
    pub fn can_act(&self, player_id: i32) -> bool {
        let ceiling = self.ceiling();
        self.active
            && self
                .seat(player_id)
                .is_some_and(|s| !s.eliminated && s.points < ceiling)
    }

    pub fn status_of(&self, player_id: i32) -> Option<PlayerStatus> {
        let seat = self.seat(player_id)?;
        let status = if self.winner_id == Some(player_id) {
            PlayerStatus::Winner
        } else if seat.points >= self.ceiling() {
            PlayerStatus::Out
        } else if seat.points == self.max_points.armoede_points() {
            PlayerStatus::Armoede
        } else if seat.eliminated {
            PlayerStatus::Eliminated
        } else {
            PlayerStatus::Playing
        };
        Some(status)
    }
}
