// Unit tests for error mapping, no database involved
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_codes() {
    let de = DomainError::validation(ValidationKind::NotEnoughPlayers, "need two");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::NotEnoughPlayers);
    assert_eq!(app.exit_code(), 2);

    let other = DomainError::validation_other("bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.detail(), "bad field");
}

#[test]
fn maps_conflicts() {
    let in_use = DomainError::conflict(ConflictKind::PlayerInUse, "has history");
    let app: AppError = in_use.into();
    assert_eq!(app.code().as_str(), "PLAYER_IN_USE");
    assert_eq!(app.exit_code(), 4);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Round, "no round 9");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "ROUND_NOT_FOUND");
    assert_eq!(app.exit_code(), 3);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code(), ErrorCode::DbTimeout);

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "gone");
    let app: AppError = down.into();
    assert!(matches!(app, AppError::DbUnavailable { .. }));
    assert_eq!(app.exit_code(), 1);
}

#[test]
fn record_not_found_from_db_err() {
    let app: AppError = sea_orm::DbErr::RecordNotFound("round 4".into()).into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn report_serializes_code_and_detail() {
    let app = AppError::conflict(ErrorCode::PlayerInUse, "Kees has played");
    let json = serde_json::to_value(app.report()).unwrap();
    assert_eq!(json["code"], "PLAYER_IN_USE");
    assert_eq!(json["detail"], "Kees has played");
}
