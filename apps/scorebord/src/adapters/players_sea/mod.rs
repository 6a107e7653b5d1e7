//! SeaORM adapter for the player table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::players;

pub mod dto;

pub use dto::PlayerCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

/// All players, name ascending
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_asc(players::Column::Name)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

/// Players that are not soft-disabled, name ascending
pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Active.eq(true))
        .order_by_asc(players::Column::Name)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        active: Set(dto.active),
    };
    player.insert(conn).await
}

pub async fn update_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
    name: String,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("player {player_id}")))?;

    let mut player: players::ActiveModel = player.into();
    player.name = Set(name);
    player.update(conn).await
}

pub async fn update_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
    active: bool,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("player {player_id}")))?;

    let mut player: players::ActiveModel = player.into();
    player.active = Set(active);
    player.update(conn).await
}

/// Hard delete; returns the number of rows removed.
pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = players::Entity::delete_by_id(player_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = players::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
