//! DTOs for players_sea adapter.

/// DTO for creating a player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub name: String,
    pub active: bool,
}

impl PlayerCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }
}
