//! Test support for the scorebord workspace
//!
//! Unified test logging plus helpers that generate unique names so tests
//! sharing a database file never collide.

pub mod logging;

use ulid::Ulid;

/// Generate a unique string with the given prefix, in the format `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player name that still reads like a name in test output.
///
/// ```
/// use test_support::unique_player_name;
///
/// let name = unique_player_name("Anouk");
/// assert!(name.starts_with("Anouk "));
/// ```
pub fn unique_player_name(base: &str) -> String {
    let ulid = Ulid::new().to_string();
    format!("{} {}", base, &ulid[ulid.len() - 6..])
}
