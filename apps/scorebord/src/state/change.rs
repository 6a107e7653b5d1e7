use serde::Serialize;

/// Which part of the data a committed write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Players,
    Sessions,
    Rounds,
    /// Bulk operations such as a database reset
    All,
}

impl Change {
    /// Whether a holder interested in `topic` should refresh after this change.
    pub fn touches(self, topic: Change) -> bool {
        self == Change::All || topic == Change::All || self == topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_touches_everything() {
        assert!(Change::All.touches(Change::Players));
        assert!(Change::Rounds.touches(Change::All));
        assert!(Change::Rounds.touches(Change::Rounds));
        assert!(!Change::Players.touches(Change::Rounds));
    }
}
