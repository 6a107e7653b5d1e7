//! SeaORM adapter for the session_player link table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{players, session_players};

pub mod dto;

pub use dto::SessionPlayerCreate;

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<Option<session_players::Model>, sea_orm::DbErr> {
    session_players::Entity::find_by_id((session_id, player_id))
        .one(conn)
        .await
}

/// Links of a session joined with their player, player name ascending
pub async fn list_for_session_with_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<(session_players::Model, Option<players::Model>)>, sea_orm::DbErr> {
    session_players::Entity::find()
        .filter(session_players::Column::SessionId.eq(session_id))
        .find_also_related(players::Entity)
        .order_by_asc(players::Column::Name)
        .order_by_asc(session_players::Column::PlayerId)
        .all(conn)
        .await
}

pub async fn list_active_for_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<session_players::Model>, sea_orm::DbErr> {
    session_players::Entity::find()
        .filter(session_players::Column::SessionId.eq(session_id))
        .filter(session_players::Column::Active.eq(true))
        .order_by_asc(session_players::Column::PlayerId)
        .all(conn)
        .await
}

pub async fn create_session_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionPlayerCreate,
) -> Result<session_players::Model, sea_orm::DbErr> {
    let link = session_players::ActiveModel {
        session_id: Set(dto.session_id),
        player_id: Set(dto.player_id),
        active: Set(dto.active),
    };
    link.insert(conn).await
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
    active: bool,
) -> Result<session_players::Model, sea_orm::DbErr> {
    let link = find(conn, session_id, player_id).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound(format!("session {session_id} player {player_id}"))
    })?;

    let mut link: session_players::ActiveModel = link.into();
    link.active = Set(active);
    link.update(conn).await
}

pub async fn delete_session_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = session_players::Entity::delete_by_id((session_id, player_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = session_players::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}

/// How many sessions a player has been linked to
pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    session_players::Entity::find()
        .filter(session_players::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
}
