//! SeaORM adapter for the round table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::rounds;

pub mod dto;

pub use dto::{RoundCreate, RoundUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// Rounds of a session in creation order
pub async fn list_for_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::SessionId.eq(session_id))
        .order_by_asc(rounds::Column::Id)
        .all(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .order_by_asc(rounds::Column::SessionId)
        .order_by_asc(rounds::Column::Id)
        .all(conn)
        .await
}

/// Highest round number used in a session, if any round exists
pub async fn max_round_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let last = rounds::Entity::find()
        .filter(rounds::Column::SessionId.eq(session_id))
        .order_by_desc(rounds::Column::RoundNumber)
        .one(conn)
        .await?;
    Ok(last.map(|r| r.round_number))
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        round_number: Set(dto.round_number),
        max_points: Set(dto.max_points),
        active: Set(true),
        winner_id: Set(None),
        current_game: Set(Some(1)),
        knock_count: Set(0),
    };
    round.insert(conn).await
}

pub async fn update_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
    dto: RoundUpdate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("round {round_id}")))?;

    let mut round: rounds::ActiveModel = round.into();
    if let Some(max_points) = dto.max_points {
        round.max_points = Set(max_points);
    }
    if let Some(active) = dto.active {
        round.active = Set(active);
    }
    if let Some(winner_id) = dto.winner_id {
        round.winner_id = Set(winner_id);
    }
    if let Some(current_game) = dto.current_game {
        round.current_game = Set(current_game);
    }
    if let Some(knock_count) = dto.knock_count {
        round.knock_count = Set(knock_count);
    }
    round.update(conn).await
}

/// Close every active round of a session; returns how many were closed.
pub async fn deactivate_active_in_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::update_many()
        .col_expr(rounds::Column::Active, Expr::value(false))
        .filter(rounds::Column::SessionId.eq(session_id))
        .filter(rounds::Column::Active.eq(true))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::delete_by_id(round_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
