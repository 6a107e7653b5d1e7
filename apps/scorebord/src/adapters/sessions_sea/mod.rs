//! SeaORM adapter for the session table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::sessions;

pub mod dto;

pub use dto::SessionCreate;

/// All sessions, newest first
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .order_by_desc(sessions::Column::Date)
        .order_by_desc(sessions::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find_by_id(session_id).one(conn).await
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .filter(sessions::Column::Active.eq(true))
        .order_by_desc(sessions::Column::Id)
        .one(conn)
        .await
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let session = sessions::ActiveModel {
        id: NotSet,
        date: Set(dto.date),
        active: Set(dto.active),
    };
    session.insert(conn).await
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    active: bool,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let session = find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("session {session_id}")))?;

    let mut session: sessions::ActiveModel = session.into();
    session.active = Set(active);
    session.update(conn).await
}

/// Mark every session inactive; returns how many were active.
pub async fn deactivate_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    let res = sessions::Entity::update_many()
        .col_expr(sessions::Column::Active, Expr::value(false))
        .filter(sessions::Column::Active.eq(true))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = sessions::Entity::delete_by_id(session_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = sessions::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
