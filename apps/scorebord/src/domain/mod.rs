//! Domain layer: pure Toepen scoring rules over in-memory round state.

pub mod rules;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_scoring;

pub use rules::MaxPoints;
pub use state::{PlayerStatus, RoundPhase, RoundState, Seat};
