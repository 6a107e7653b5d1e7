//! Session detail: who plays tonight and the rounds played so far.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::{commit, ViewModel};
use crate::domain::rules::{MaxPoints, MIN_ROUND_PLAYERS};
use crate::error::AppError;
use crate::repos::relations::{RoundWithPlayers, SessionPlayerWithPlayer};
use crate::repos::rounds::Round;
use crate::repos::sessions::Session;
use crate::services::rounds::RoundService;
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::state::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUiState {
    pub session: Option<Session>,
    pub players: Vec<SessionPlayerWithPlayer>,
    pub rounds: Vec<Round>,
    pub active_round_id: Option<i32>,
    pub can_start_round: bool,
    pub is_loading: bool,
}

impl Default for SessionUiState {
    fn default() -> Self {
        Self {
            session: None,
            players: Vec::new(),
            rounds: Vec::new(),
            active_round_id: None,
            can_start_round: false,
            is_loading: true,
        }
    }
}

pub struct SessionView {
    state: AppState,
    session_id: i32,
    tx: watch::Sender<SessionUiState>,
}

impl SessionView {
    pub async fn open(state: AppState, session_id: i32) -> Result<Self, AppError> {
        let view = Self {
            state,
            session_id,
            tx: watch::Sender::new(SessionUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }

    pub fn session_id(&self) -> i32 {
        self.session_id
    }

    pub async fn toggle_player(&self, player_id: i32) -> Result<(), AppError> {
        let session_id = self.session_id;
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .toggle_player(txn, session_id, player_id)
                    .await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn add_players(&self, player_ids: Vec<i32>) -> Result<usize, AppError> {
        let session_id = self.session_id;
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                let links = SessionService::new()
                    .add_players(txn, session_id, &player_ids)
                    .await?;
                Ok(links.len())
            })
        })
        .await
    }

    pub async fn remove_player(&self, player_id: i32) -> Result<(), AppError> {
        let session_id = self.session_id;
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .remove_player(txn, session_id, player_id)
                    .await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn start_round(&self, max_points: MaxPoints) -> Result<RoundWithPlayers, AppError> {
        let session_id = self.session_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                Ok(RoundService::new()
                    .start_round(txn, session_id, max_points)
                    .await?)
            })
        })
        .await
    }

    pub async fn delete_round(&self, round_id: i32) -> Result<(), AppError> {
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                SessionService::new().delete_round(txn, round_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn close_session(&self) -> Result<Session, AppError> {
        let session_id = self.session_id;
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move { Ok(SessionService::new().close_session(txn, session_id).await?) })
        })
        .await
    }
}

#[async_trait]
impl ViewModel for SessionView {
    type UiState = SessionUiState;
    const NAME: &'static str = "session";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<SessionUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::Sessions, Change::Players, Change::Rounds]
    }

    async fn load(&self) -> Result<SessionUiState, AppError> {
        let service = SessionService::new();
        let db = self.state.db();
        let with_rounds = service.session_with_rounds(db, self.session_id).await?;
        let with_players = service.session_with_players(db, self.session_id).await?;

        let active_players = with_players
            .players
            .iter()
            .filter(|p| p.session_player.active)
            .count();
        // Only the latest round can still be played, and only until it has a winner.
        let active_round_id = with_rounds
            .rounds
            .iter()
            .max_by_key(|r| r.round_number)
            .filter(|r| with_rounds.session.active && r.winner_id.is_none())
            .map(|r| r.id);

        Ok(SessionUiState {
            can_start_round: with_rounds.session.active && active_players >= MIN_ROUND_PLAYERS,
            session: Some(with_rounds.session),
            players: with_players.players,
            rounds: with_rounds.rounds,
            active_round_id,
            is_loading: false,
        })
    }
}
