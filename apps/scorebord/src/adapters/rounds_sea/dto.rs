//! DTOs for rounds_sea adapter.

/// DTO for creating a new round.
#[derive(Debug, Clone, Copy)]
pub struct RoundCreate {
    pub session_id: i32,
    pub round_number: i32,
    pub max_points: i32,
}

/// Partial update of a round; `None` leaves a column untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundUpdate {
    pub max_points: Option<i32>,
    pub active: Option<bool>,
    pub winner_id: Option<Option<i32>>,
    pub current_game: Option<Option<i32>>,
    pub knock_count: Option<i32>,
}

impl RoundUpdate {
    pub fn with_max_points(mut self, max_points: i32) -> Self {
        self.max_points = Some(max_points);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_winner(mut self, winner_id: Option<i32>) -> Self {
        self.winner_id = Some(winner_id);
        self
    }

    pub fn with_current_game(mut self, current_game: Option<i32>) -> Self {
        self.current_game = Some(current_game);
        self
    }

    pub fn with_knock_count(mut self, knock_count: i32) -> Self {
        self.knock_count = Some(knock_count);
        self
    }
}
