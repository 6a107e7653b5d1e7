//! Player repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::{players_sea, round_players_sea, session_players_sea};
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<Option<Player>, DomainError> {
    let player = players_sea::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Like [`find_by_id`] but a missing player is an error.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_sea::list_all(conn).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_sea::list_active(conn).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Player, DomainError> {
    let player = players_sea::create_player(conn, players_sea::PlayerCreate::new(name)).await?;
    Ok(Player::from(player))
}

pub async fn rename_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
    name: &str,
) -> Result<Player, DomainError> {
    require_player(conn, player_id).await?;
    let player = players_sea::update_name(conn, player_id, name.to_string()).await?;
    Ok(Player::from(player))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
    active: bool,
) -> Result<Player, DomainError> {
    require_player(conn, player_id).await?;
    let player = players_sea::update_active(conn, player_id, active).await?;
    Ok(Player::from(player))
}

/// A player is in use once they were linked to a session or took a round seat.
pub async fn is_used<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<bool, DomainError> {
    let sessions = session_players_sea::count_by_player(conn, player_id).await?;
    if sessions > 0 {
        return Ok(true);
    }
    let seats = round_players_sea::count_by_player(conn, player_id).await?;
    Ok(seats > 0)
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i32,
) -> Result<bool, DomainError> {
    let removed = players_sea::delete_player(conn, player_id).await?;
    Ok(removed > 0)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(players_sea::delete_all(conn).await?)
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
        }
    }
}
