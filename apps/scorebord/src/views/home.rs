//! Home screen: the list of play evenings.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::{commit, ViewModel};
use crate::error::AppError;
use crate::repos::sessions::Session;
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::state::change::Change;
use crate::util::datetime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeUiState {
    /// Newest first
    pub sessions: Vec<Session>,
    pub active_session_id: Option<i32>,
    pub is_loading: bool,
}

impl Default for HomeUiState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            active_session_id: None,
            is_loading: true,
        }
    }
}

pub struct HomeView {
    state: AppState,
    tx: watch::Sender<HomeUiState>,
}

impl HomeView {
    pub async fn open(state: AppState) -> Result<Self, AppError> {
        let view = Self {
            state,
            tx: watch::Sender::new(HomeUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }

    /// Start a new session now; it becomes the only active one.
    pub async fn add_session(&self) -> Result<Session, AppError> {
        let started_at = datetime::now();
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                let session = SessionService::new().start_session(txn, started_at).await?;
                Ok(session)
            })
        })
        .await
    }

    pub async fn delete_session(&self, session_id: i32) -> Result<(), AppError> {
        commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                SessionService::new().delete_session(txn, session_id).await?;
                Ok(())
            })
        })
        .await
    }
}

#[async_trait]
impl ViewModel for HomeView {
    type UiState = HomeUiState;
    const NAME: &'static str = "home";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<HomeUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::Sessions]
    }

    async fn load(&self) -> Result<HomeUiState, AppError> {
        let service = SessionService::new();
        let sessions = service.list_sessions(self.state.db()).await?;
        let active_session_id = service
            .active_session(self.state.db())
            .await?
            .map(|s| s.id);
        Ok(HomeUiState {
            sessions,
            active_session_id,
            is_loading: false,
        })
    }
}
