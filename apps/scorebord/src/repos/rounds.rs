//! Round repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::rounds_sea::{self as rounds_adapter, RoundUpdate};
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub id: i32,
    pub session_id: i32,
    pub round_number: i32,
    pub max_points: i32,
    pub active: bool,
    pub winner_id: Option<i32>,
    pub current_game: Option<i32>,
    pub knock_count: i32,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<Round, DomainError> {
    find_by_id(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

pub async fn list_for_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<Round>, DomainError> {
    let rows = rounds_adapter::list_for_session(conn, session_id).await?;
    Ok(rows.into_iter().map(Round::from).collect())
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Round>, DomainError> {
    let rows = rounds_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Round::from).collect())
}

/// Number for the next round of a session (1 for the first).
pub async fn next_round_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<i32, DomainError> {
    let last = rounds_adapter::max_round_number(conn, session_id).await?;
    Ok(last.unwrap_or(0) + 1)
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    round_number: i32,
    max_points: i32,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        session_id,
        round_number,
        max_points,
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    Ok(Round::from(round))
}

pub async fn update_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
    update: RoundUpdate,
) -> Result<Round, DomainError> {
    let round = rounds_adapter::update_round(conn, round_id, update).await?;
    Ok(Round::from(round))
}

pub async fn deactivate_active_in_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::deactivate_active_in_session(conn, session_id).await?)
}

pub async fn delete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<bool, DomainError> {
    let removed = rounds_adapter::delete_round(conn, round_id).await?;
    Ok(removed > 0)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rounds_adapter::delete_all(conn).await?)
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            round_number: model.round_number,
            max_points: model.max_points,
            active: model.active,
            winner_id: model.winner_id,
            current_game: model.current_game,
            knock_count: model.knock_count,
        }
    }
}
