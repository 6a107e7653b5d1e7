//! Session repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::sessions_sea;
use crate::entities::sessions;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Session (one evening of play) domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub active: bool,
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Session>, DomainError> {
    let rows = sessions_sea::list_all(conn).await?;
    Ok(rows.into_iter().map(Session::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Option<Session>, DomainError> {
    let session = sessions_sea::find_by_id(conn, session_id).await?;
    Ok(session.map(Session::from))
}

pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Session, DomainError> {
    find_by_id(conn, session_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Session,
            format!("Session {session_id} not found"),
        )
    })
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Session>, DomainError> {
    let session = sessions_sea::find_active(conn).await?;
    Ok(session.map(Session::from))
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    date: OffsetDateTime,
    active: bool,
) -> Result<Session, DomainError> {
    let dto = sessions_sea::SessionCreate { date, active };
    let session = sessions_sea::create_session(conn, dto).await?;
    Ok(Session::from(session))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    active: bool,
) -> Result<Session, DomainError> {
    require_session(conn, session_id).await?;
    let session = sessions_sea::set_active(conn, session_id, active).await?;
    Ok(Session::from(session))
}

pub async fn deactivate_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(sessions_sea::deactivate_all(conn).await?)
}

pub async fn delete_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<bool, DomainError> {
    let removed = sessions_sea::delete_session(conn, session_id).await?;
    Ok(removed > 0)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(sessions_sea::delete_all(conn).await?)
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            active: model.active,
        }
    }
}
