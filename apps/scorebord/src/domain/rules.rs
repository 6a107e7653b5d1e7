use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

pub const NORMAL_MAX_POINTS: i32 = 15;
pub const SHORT_MAX_POINTS: i32 = 10;

/// Once any player has this many points the ceiling can no longer be switched.
pub const SHORT_ROUND_LOCK_POINTS: i32 = 9;

/// A round needs at least this many session-active players.
pub const MIN_ROUND_PLAYERS: usize = 2;

/// Point ceiling of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxPoints {
    #[default]
    Normal,
    Short,
}

impl MaxPoints {
    pub const fn value(self) -> i32 {
        match self {
            MaxPoints::Normal => NORMAL_MAX_POINTS,
            MaxPoints::Short => SHORT_MAX_POINTS,
        }
    }

    pub fn from_value(points: i32) -> Result<Self, DomainError> {
        match points {
            NORMAL_MAX_POINTS => Ok(MaxPoints::Normal),
            SHORT_MAX_POINTS => Ok(MaxPoints::Short),
            other => Err(DomainError::validation(
                ValidationKind::InvalidMaxPoints,
                format!("Round ceiling must be {NORMAL_MAX_POINTS} or {SHORT_MAX_POINTS}, got {other}"),
            )),
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            MaxPoints::Normal => MaxPoints::Short,
            MaxPoints::Short => MaxPoints::Normal,
        }
    }

    /// Points at which a player is "in armoede" (one away from the ceiling)
    pub const fn armoede_points(self) -> i32 {
        self.value() - 1
    }
}
