//! Database overview: every table's content, joined for reading.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::ViewModel;
use crate::error::AppError;
use crate::services::database::{DatabaseOverview, DatabaseService};
use crate::state::app_state::AppState;
use crate::state::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseOverviewUiState {
    pub overview: DatabaseOverview,
    pub is_loading: bool,
}

impl Default for DatabaseOverviewUiState {
    fn default() -> Self {
        Self {
            overview: DatabaseOverview::default(),
            is_loading: true,
        }
    }
}

pub struct DatabaseOverviewView {
    state: AppState,
    tx: watch::Sender<DatabaseOverviewUiState>,
}

impl DatabaseOverviewView {
    pub async fn open(state: AppState) -> Result<Self, AppError> {
        let view = Self {
            state,
            tx: watch::Sender::new(DatabaseOverviewUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }
}

#[async_trait]
impl ViewModel for DatabaseOverviewView {
    type UiState = DatabaseOverviewUiState;
    const NAME: &'static str = "overview";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<DatabaseOverviewUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::All]
    }

    async fn load(&self) -> Result<DatabaseOverviewUiState, AppError> {
        let overview = DatabaseService::new().overview(self.state.db()).await?;
        Ok(DatabaseOverviewUiState {
            overview,
            is_loading: false,
        })
    }
}
