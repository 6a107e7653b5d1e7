//! Player domain service.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::players::{self, Player};

/// Trim and NFKC-normalise a player name. Empty names are rejected.
pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().nfkc().collect();
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyPlayerName,
            "Player name must not be empty",
        ));
    }
    Ok(name)
}

/// Player domain service.
pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Player>, DomainError> {
        players::list_all(conn).await
    }

    pub async fn list_active_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Player>, DomainError> {
        players::list_active(conn).await
    }

    pub async fn get_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<Player, DomainError> {
        players::require_player(conn, player_id).await
    }

    pub async fn create_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        raw_name: &str,
    ) -> Result<Player, DomainError> {
        let name = normalize_name(raw_name)?;
        let player = players::create_player(conn, &name).await?;
        info!(player_id = player.id, "player created");
        Ok(player)
    }

    pub async fn rename_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
        raw_name: &str,
    ) -> Result<Player, DomainError> {
        let name = normalize_name(raw_name)?;
        let player = players::rename_player(conn, player_id, &name).await?;
        info!(player_id, "player renamed");
        Ok(player)
    }

    pub async fn set_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
        active: bool,
    ) -> Result<Player, DomainError> {
        let player = players::set_active(conn, player_id, active).await?;
        debug!(player_id, active, "player active flag set");
        Ok(player)
    }

    pub async fn toggle_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<Player, DomainError> {
        let current = players::require_player(conn, player_id).await?;
        self.set_active(conn, player_id, !current.active).await
    }

    /// Whether the player appears in any session or round.
    pub async fn is_player_used<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<bool, DomainError> {
        players::is_used(conn, player_id).await
    }

    /// Hard-delete a player that never took part in anything.
    pub async fn delete_player_if_unused<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<(), DomainError> {
        let player = players::require_player(conn, player_id).await?;
        if players::is_used(conn, player_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::PlayerInUse,
                format!(
                    "{} has played before; deactivate the player instead",
                    player.name
                ),
            ));
        }
        if !players::delete_player(conn, player_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("Player {player_id} not found"),
            ));
        }
        info!(player_id, "player deleted");
        Ok(())
    }
}

impl Default for PlayerService {
    fn default() -> Self {
        Self::new()
    }
}
