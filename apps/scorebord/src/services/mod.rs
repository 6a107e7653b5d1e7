//! Services compose repository calls into the operations the screens need.
//! They take any `ConnectionTrait`; callers decide the transaction scope.

pub mod database;
pub mod players;
pub mod rounds;
pub mod sessions;
