//! DTOs for round_players_sea adapter.

#[derive(Debug, Clone, Copy)]
pub struct RoundPlayerCreate {
    pub round_id: i32,
    pub player_id: i32,
}

/// Score columns to write back after a scoring action.
#[derive(Debug, Clone, Copy)]
pub struct RoundPlayerScore {
    pub points: i32,
    pub eliminated: bool,
}
