//! Whole-database operations: resets and the overview screen.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::domain::DomainError;
use crate::repos::relations::{self, RoundWithPlayers, SessionWithPlayers, SessionWithRounds};
use crate::repos::{players, round_players, rounds, session_players, sessions};

/// Row counts removed by a reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub round_players: u64,
    pub rounds: u64,
    pub session_players: u64,
    pub sessions: u64,
    pub players: u64,
}

/// Everything in the database, grouped the way the overview screen shows it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseOverview {
    pub sessions_with_rounds: Vec<SessionWithRounds>,
    pub sessions_with_players: Vec<SessionWithPlayers>,
    pub rounds_with_players: Vec<RoundWithPlayers>,
}

pub struct DatabaseService;

impl DatabaseService {
    pub fn new() -> Self {
        Self
    }

    /// Remove all sessions, rounds and scores; players stay.
    pub async fn clear_except_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<ClearReport, DomainError> {
        let report = ClearReport {
            round_players: round_players::delete_all(conn).await?,
            rounds: rounds::delete_all(conn).await?,
            session_players: session_players::delete_all(conn).await?,
            sessions: sessions::delete_all(conn).await?,
            players: 0,
        };
        warn!(?report, "database cleared, players kept");
        Ok(report)
    }

    /// Remove everything, players included.
    pub async fn clear_all<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<ClearReport, DomainError> {
        let mut report = self.clear_except_players(conn).await?;
        report.players = players::delete_all(conn).await?;
        warn!(players = report.players, "players cleared");
        Ok(report)
    }

    pub async fn overview<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<DatabaseOverview, DomainError> {
        let all_sessions = sessions::list_all(conn).await?;

        let mut overview = DatabaseOverview::default();
        for session in &all_sessions {
            overview
                .sessions_with_rounds
                .push(relations::session_with_rounds(conn, session.id).await?);
            overview
                .sessions_with_players
                .push(relations::session_with_players(conn, session.id).await?);
        }
        for round in rounds::list_all(conn).await? {
            overview
                .rounds_with_players
                .push(relations::round_with_players(conn, round.id).await?);
        }

        info!(
            sessions = all_sessions.len(),
            rounds = overview.rounds_with_players.len(),
            "overview loaded"
        );
        Ok(overview)
    }
}

impl Default for DatabaseService {
    fn default() -> Self {
        Self::new()
    }
}
