//! Stable machine-readable error codes.
//!
//! Printed by the CLI as `CODE: detail` and in `--json` error output.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    EmptyPlayerName,
    InvalidMaxPoints,
    NotEnoughPlayers,
    RoundNotActive,
    RoundFinished,
    RoundInProgress,
    RoundSuperseded,
    PlayerEliminated,
    PlayerNotInRound,
    ShortRoundLocked,
    SessionClosed,
    ValidationError,

    // Resource Not Found
    PlayerNotFound,
    SessionNotFound,
    RoundNotFound,
    RoundPlayerNotFound,
    SessionPlayerNotFound,
    NotFound,

    // Business Logic Conflicts
    PlayerInUse,
    DuplicateRoundNumber,
    DuplicateRoundPlayer,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    ConfigError,
    Internal,
    Aborted,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPlayerName => "EMPTY_PLAYER_NAME",
            Self::InvalidMaxPoints => "INVALID_MAX_POINTS",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::RoundNotActive => "ROUND_NOT_ACTIVE",
            Self::RoundFinished => "ROUND_FINISHED",
            Self::RoundInProgress => "ROUND_IN_PROGRESS",
            Self::RoundSuperseded => "ROUND_SUPERSEDED",
            Self::PlayerEliminated => "PLAYER_ELIMINATED",
            Self::PlayerNotInRound => "PLAYER_NOT_IN_ROUND",
            Self::ShortRoundLocked => "SHORT_ROUND_LOCKED",
            Self::SessionClosed => "SESSION_CLOSED",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::RoundPlayerNotFound => "ROUND_PLAYER_NOT_FOUND",
            Self::SessionPlayerNotFound => "SESSION_PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::PlayerInUse => "PLAYER_IN_USE",
            Self::DuplicateRoundNumber => "DUPLICATE_ROUND_NUMBER",
            Self::DuplicateRoundPlayer => "DUPLICATE_ROUND_PLAYER",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
            Self::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
