//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here (via `From`), and the CLI then
//! maps `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

const UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Extract the column list from SQLite "UNIQUE constraint failed: t.a, t.b" messages.
fn extract_sqlite_columns(error_msg: &str) -> Option<&str> {
    let start = error_msg.find(UNIQUE_PREFIX)? + UNIQUE_PREFIX.len();
    let rest = &error_msg[start..];
    let end = rest
        .find(|c: char| c == '\n' || c == '"' || c == ')')
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Map the failing columns of a unique index to a domain conflict.
fn map_sqlite_columns_to_conflict(columns: &str) -> Option<(ConflictKind, &'static str)> {
    match columns {
        "round.session_id, round.round_number" => Some((
            ConflictKind::DuplicateRoundNumber,
            "Round number already used in this session",
        )),
        "round_player.round_id, round_player.player_id" => Some((
            ConflictKind::DuplicateRoundPlayer,
            "Player already takes part in this round",
        )),
        "session_player.session_id, session_player.player_id" => Some((
            ConflictKind::Other("DuplicateSessionPlayer".into()),
            "Player already belongs to this session",
        )),
        _ => None,
    }
}

/// Translate a `DbErr` into a `DomainError` with a user-facing detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                format!("Record not found: {what}"),
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if error_msg.contains("UNIQUE constraint failed") {
        warn!(raw_error = %error_msg, "Unique constraint violation");

        if let Some(columns) = extract_sqlite_columns(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_columns_to_conflict(columns) {
                return DomainError::conflict(kind, detail);
            }
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Referenced record does not exist");
    }

    if error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("database is locked") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database busy or timed out");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    if error_msg.contains("malformed") || error_msg.contains("not a database") {
        error!(raw_error = %error_msg, "Database file is corrupt");
        return DomainError::infra(InfraErrorKind::DataCorruption, "Database file is corrupt");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_composite_unique_columns() {
        let msg = "Execution Error: error returned from database: (code: 2067) UNIQUE constraint failed: round.session_id, round.round_number";
        assert_eq!(
            extract_sqlite_columns(msg),
            Some("round.session_id, round.round_number")
        );
    }

    #[test]
    fn unique_round_number_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: round.session_id, round.round_number".into(),
        );
        match map_db_err(err) {
            DomainError::Conflict(kind, _) => assert_eq!(kind, ConflictKind::DuplicateRoundNumber),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn unknown_unique_falls_back_to_generic_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: player.name".into());
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn foreign_key_failure_is_validation() {
        let err = sea_orm::DbErr::Custom("FOREIGN KEY constraint failed".into());
        assert!(matches!(map_db_err(err), DomainError::Validation(..)));
    }

    #[test]
    fn locked_database_is_timeout() {
        let err = sea_orm::DbErr::Custom("database is locked".into());
        assert!(matches!(
            map_db_err(err),
            DomainError::Infra(InfraErrorKind::Timeout, _)
        ));
    }
}
