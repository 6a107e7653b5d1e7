//! Session-player link repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::session_players_sea;
use crate::entities::session_players;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::players::Player;
use crate::repos::relations::SessionPlayerWithPlayer;

/// A player's membership of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionPlayer {
    pub session_id: i32,
    pub player_id: i32,
    pub active: bool,
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<Option<SessionPlayer>, DomainError> {
    let link = session_players_sea::find(conn, session_id, player_id).await?;
    Ok(link.map(SessionPlayer::from))
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<SessionPlayer, DomainError> {
    find(conn, session_id, player_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::SessionPlayer,
            format!("Player {player_id} is not part of session {session_id}"),
        )
    })
}

pub async fn list_for_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<SessionPlayerWithPlayer>, DomainError> {
    let rows = session_players_sea::list_for_session_with_player(conn, session_id).await?;
    rows.into_iter()
        .map(|(link, player)| {
            let player = player.ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("session {session_id} links missing player {}", link.player_id),
                )
            })?;
            Ok(SessionPlayerWithPlayer {
                session_player: SessionPlayer::from(link),
                player: Player::from(player),
            })
        })
        .collect()
}

pub async fn list_active_player_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<Vec<i32>, DomainError> {
    let rows = session_players_sea::list_active_for_session(conn, session_id).await?;
    Ok(rows.into_iter().map(|l| l.player_id).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<SessionPlayer, DomainError> {
    let dto = session_players_sea::SessionPlayerCreate {
        session_id,
        player_id,
        active: true,
    };
    let link = session_players_sea::create_session_player(conn, dto).await?;
    Ok(SessionPlayer::from(link))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
    active: bool,
) -> Result<SessionPlayer, DomainError> {
    require(conn, session_id, player_id).await?;
    let link = session_players_sea::set_active(conn, session_id, player_id, active).await?;
    Ok(SessionPlayer::from(link))
}

pub async fn remove<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
    player_id: i32,
) -> Result<bool, DomainError> {
    let removed = session_players_sea::delete_session_player(conn, session_id, player_id).await?;
    Ok(removed > 0)
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(session_players_sea::delete_all(conn).await?)
}

impl From<session_players::Model> for SessionPlayer {
    fn from(model: session_players::Model) -> Self {
        Self {
            session_id: model.session_id,
            player_id: model.player_id,
            active: model.active,
        }
    }
}
