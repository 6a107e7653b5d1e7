//! SeaORM adapters, one module per table. They return raw `DbErr`;
//! the repos layer translates errors into domain terms.

pub mod players_sea;
pub mod round_players_sea;
pub mod rounds_sea;
pub mod session_players_sea;
pub mod sessions_sea;
