//! Round-player repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::round_players_sea::{self as rp_adapter, RoundPlayerScore};
use crate::entities::round_players;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::players::Player;
use crate::repos::relations::RoundPlayerWithPlayer;

/// A player's score within one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundPlayer {
    pub id: i32,
    pub round_id: i32,
    pub player_id: i32,
    pub points: i32,
    pub eliminated: bool,
}

pub async fn list_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<Vec<RoundPlayerWithPlayer>, DomainError> {
    let rows = rp_adapter::list_for_round_with_player(conn, round_id).await?;
    rows.into_iter()
        .map(|(rp, player)| {
            let player = player.ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("round {round_id} seat {} has no player", rp.id),
                )
            })?;
            Ok(RoundPlayerWithPlayer {
                round_player: RoundPlayer::from(rp),
                player: Player::from(player),
            })
        })
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
    player_id: i32,
) -> Result<RoundPlayer, DomainError> {
    let dto = rp_adapter::RoundPlayerCreate {
        round_id,
        player_id,
    };
    let rp = rp_adapter::create_round_player(conn, dto).await?;
    Ok(RoundPlayer::from(rp))
}

pub async fn update_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    points: i32,
    eliminated: bool,
) -> Result<RoundPlayer, DomainError> {
    let rp = rp_adapter::update_score(conn, id, RoundPlayerScore { points, eliminated }).await?;
    Ok(RoundPlayer::from(rp))
}

pub async fn delete_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rp_adapter::delete_all(conn).await?)
}

impl From<round_players::Model> for RoundPlayer {
    fn from(model: round_players::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            player_id: model.player_id,
            points: model.points,
            eliminated: model.eliminated,
        }
    }
}
