pub mod players;
pub mod round_players;
pub mod rounds;
pub mod session_players;
pub mod sessions;

pub use players::Entity as Players;
pub use round_players::Entity as RoundPlayers;
pub use rounds::Entity as Rounds;
pub use session_players::Entity as SessionPlayers;
pub use sessions::Entity as Sessions;
