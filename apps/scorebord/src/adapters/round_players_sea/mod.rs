//! SeaORM adapter for the round_player table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{players, round_players};

pub mod dto;

pub use dto::{RoundPlayerCreate, RoundPlayerScore};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<round_players::Model>, sea_orm::DbErr> {
    round_players::Entity::find_by_id(id).one(conn).await
}

/// Round-players joined with their player, in seating (insertion) order
pub async fn list_for_round_with_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<Vec<(round_players::Model, Option<players::Model>)>, sea_orm::DbErr> {
    round_players::Entity::find()
        .filter(round_players::Column::RoundId.eq(round_id))
        .find_also_related(players::Entity)
        .order_by_asc(round_players::Column::Id)
        .all(conn)
        .await
}

pub async fn create_round_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundPlayerCreate,
) -> Result<round_players::Model, sea_orm::DbErr> {
    let rp = round_players::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        player_id: Set(dto.player_id),
        points: Set(0),
        eliminated: Set(false),
    };
    rp.insert(conn).await
}

pub async fn update_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    dto: RoundPlayerScore,
) -> Result<round_players::Model, sea_orm::DbErr> {
    let rp = find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("round player {id}")))?;

    let mut rp: round_players::ActiveModel = rp.into();
    rp.points = Set(dto.points);
    rp.eliminated = Set(dto.eliminated);
    rp.update(conn).await
}

/// How many round seats a player has ever taken
pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    round_players::Entity::find()
        .filter(round_players::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let res = round_players::Entity::delete_many().exec(conn).await?;
    Ok(res.rows_affected)
}
