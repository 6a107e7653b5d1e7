//! Joined read models assembled from several tables.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::errors::domain::DomainError;
use crate::repos::players::Player;
use crate::repos::round_players::{self, RoundPlayer};
use crate::repos::rounds::{self, Round};
use crate::repos::session_players::{self, SessionPlayer};
use crate::repos::sessions::{self, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundPlayerWithPlayer {
    pub round_player: RoundPlayer,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundWithPlayers {
    pub round: Round,
    pub players: Vec<RoundPlayerWithPlayer>,
}

impl RoundWithPlayers {
    pub fn seat(&self, player_id: i32) -> Option<&RoundPlayerWithPlayer> {
        self.players.iter().find(|p| p.player.id == player_id)
    }

    pub fn winner(&self) -> Option<&Player> {
        let winner_id = self.round.winner_id?;
        self.seat(winner_id).map(|p| &p.player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPlayerWithPlayer {
    pub session_player: SessionPlayer,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionWithRounds {
    pub session: Session,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionWithPlayers {
    pub session: Session,
    pub players: Vec<SessionPlayerWithPlayer>,
}

pub async fn round_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<RoundWithPlayers, DomainError> {
    let round = rounds::require_round(conn, round_id).await?;
    let players = round_players::list_for_round(conn, round_id).await?;
    Ok(RoundWithPlayers { round, players })
}

pub async fn session_with_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<SessionWithRounds, DomainError> {
    let session = sessions::require_session(conn, session_id).await?;
    let rounds = rounds::list_for_session(conn, session_id).await?;
    Ok(SessionWithRounds { session, rounds })
}

pub async fn session_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i32,
) -> Result<SessionWithPlayers, DomainError> {
    let session = sessions::require_session(conn, session_id).await?;
    let players = session_players::list_for_session(conn, session_id).await?;
    Ok(SessionWithPlayers { session, players })
}
