//! Session service: play evenings, who takes part, and their rounds.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::relations::{self, SessionWithPlayers, SessionWithRounds};
use crate::repos::session_players::{self, SessionPlayer};
use crate::repos::sessions::{self, Session};
use crate::repos::{players, rounds};

pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Sessions, newest first
    pub async fn list_sessions<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Session>, DomainError> {
        sessions::list_all(conn).await
    }

    pub async fn active_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Option<Session>, DomainError> {
        sessions::find_active(conn).await
    }

    pub async fn get_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
    ) -> Result<Session, DomainError> {
        sessions::require_session(conn, session_id).await
    }

    /// Open a new session at `date`; any other session stops being active.
    pub async fn start_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        date: OffsetDateTime,
    ) -> Result<Session, DomainError> {
        let closed = sessions::deactivate_all(conn).await?;
        let session = sessions::create_session(conn, date, true).await?;
        info!(session_id = session.id, closed, "session started");
        Ok(session)
    }

    /// Link players to a session. Players that were linked before become active again.
    pub async fn add_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
        player_ids: &[i32],
    ) -> Result<Vec<SessionPlayer>, DomainError> {
        sessions::require_session(conn, session_id).await?;

        let mut linked = Vec::with_capacity(player_ids.len());
        for &player_id in player_ids {
            players::require_player(conn, player_id).await?;
            let link = match session_players::find(conn, session_id, player_id).await? {
                Some(existing) if existing.active => existing,
                Some(_) => session_players::set_active(conn, session_id, player_id, true).await?,
                None => session_players::create(conn, session_id, player_id).await?,
            };
            linked.push(link);
        }

        info!(session_id, count = linked.len(), "players added to session");
        Ok(linked)
    }

    pub async fn set_player_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
        player_id: i32,
        active: bool,
    ) -> Result<SessionPlayer, DomainError> {
        let link = session_players::set_active(conn, session_id, player_id, active).await?;
        debug!(session_id, player_id, active, "session player active flag set");
        Ok(link)
    }

    /// Flip whether a player sits in for the next rounds of this session.
    pub async fn toggle_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
        player_id: i32,
    ) -> Result<SessionPlayer, DomainError> {
        let link = session_players::require(conn, session_id, player_id).await?;
        self.set_player_active(conn, session_id, player_id, !link.active)
            .await
    }

    pub async fn remove_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
        player_id: i32,
    ) -> Result<(), DomainError> {
        if !session_players::remove(conn, session_id, player_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::SessionPlayer,
                format!("Player {player_id} is not part of session {session_id}"),
            ));
        }
        info!(session_id, player_id, "player removed from session");
        Ok(())
    }

    /// Soft close: the session and its open rounds become inactive.
    pub async fn close_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
    ) -> Result<Session, DomainError> {
        let closed_rounds = rounds::deactivate_active_in_session(conn, session_id).await?;
        let session = sessions::set_active(conn, session_id, false).await?;
        info!(session_id, closed_rounds, "session closed");
        Ok(session)
    }

    /// Hard delete; rounds and links go with it.
    pub async fn delete_session<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
    ) -> Result<(), DomainError> {
        if !sessions::delete_session(conn, session_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Session,
                format!("Session {session_id} not found"),
            ));
        }
        info!(session_id, "session deleted");
        Ok(())
    }

    pub async fn delete_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<(), DomainError> {
        if !rounds::delete_round(conn, round_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Round,
                format!("Round {round_id} not found"),
            ));
        }
        info!(round_id, "round deleted");
        Ok(())
    }

    pub async fn session_with_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
    ) -> Result<SessionWithRounds, DomainError> {
        relations::session_with_rounds(conn, session_id).await
    }

    pub async fn session_with_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
    ) -> Result<SessionWithPlayers, DomainError> {
        relations::session_with_players(conn, session_id).await
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}
