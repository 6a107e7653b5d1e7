//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod players;
pub mod relations;
pub mod round_players;
pub mod rounds;
pub mod session_players;
pub mod sessions;
