//! Settings screen: destructive resets.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::{commit, ViewModel};
use crate::error::AppError;
use crate::repos::sessions::Session;
use crate::services::database::{ClearReport, DatabaseService};
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::state::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsUiState {
    pub sessions: Vec<Session>,
    pub database: String,
    pub is_loading: bool,
}

impl Default for SettingsUiState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            database: String::new(),
            is_loading: true,
        }
    }
}

pub struct SettingsView {
    state: AppState,
    tx: watch::Sender<SettingsUiState>,
}

impl SettingsView {
    pub async fn open(state: AppState) -> Result<Self, AppError> {
        let view = Self {
            state,
            tx: watch::Sender::new(SettingsUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }

    /// Wipe the database. With `keep_players` the player list survives.
    pub async fn reset_database(&self, keep_players: bool) -> Result<ClearReport, AppError> {
        commit(self, Change::All, move |txn| {
            Box::pin(async move {
                let service = DatabaseService::new();
                let report = if keep_players {
                    service.clear_except_players(txn).await?
                } else {
                    service.clear_all(txn).await?
                };
                Ok(report)
            })
        })
        .await
    }
}

#[async_trait]
impl ViewModel for SettingsView {
    type UiState = SettingsUiState;
    const NAME: &'static str = "settings";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<SettingsUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::Sessions]
    }

    async fn load(&self) -> Result<SettingsUiState, AppError> {
        let sessions = SessionService::new().list_sessions(self.state.db()).await?;
        Ok(SettingsUiState {
            sessions,
            database: self.state.profile().describe(),
            is_loading: false,
        })
    }
}
