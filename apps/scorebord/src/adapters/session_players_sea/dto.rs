//! DTOs for session_players_sea adapter.

#[derive(Debug, Clone, Copy)]
pub struct SessionPlayerCreate {
    pub session_id: i32,
    pub player_id: i32,
    pub active: bool,
}
