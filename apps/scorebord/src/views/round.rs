//! Round screen: scores, knocks and the actions of a sub-game.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::{commit, ViewModel};
use crate::domain::rules::MaxPoints;
use crate::domain::scoring::WinOutcome;
use crate::domain::state::{PlayerStatus, RoundPhase};
use crate::error::AppError;
use crate::repos::relations::RoundWithPlayers;
use crate::services::rounds::{round_state, RoundService};
use crate::state::app_state::AppState;
use crate::state::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundPlayerRow {
    pub player_id: i32,
    pub name: String,
    pub points: i32,
    pub eliminated: bool,
    pub status: PlayerStatus,
    pub can_pass: bool,
    pub can_win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundUiState {
    pub round: Option<RoundWithPlayers>,
    pub rows: Vec<RoundPlayerRow>,
    pub phase: RoundPhase,
    pub max_points: MaxPoints,
    pub knocks: i32,
    pub current_game: i32,
    pub winner_name: Option<String>,
    pub is_short_round: bool,
    pub can_enable_short_round: bool,
    pub can_knock: bool,
    pub can_knock_down: bool,
    pub can_start_new_game: bool,
    pub is_loading: bool,
}

impl Default for RoundUiState {
    fn default() -> Self {
        Self {
            round: None,
            rows: Vec::new(),
            phase: RoundPhase::Playing,
            max_points: MaxPoints::Normal,
            knocks: 0,
            current_game: 1,
            winner_name: None,
            is_short_round: false,
            can_enable_short_round: false,
            can_knock: false,
            can_knock_down: false,
            can_start_new_game: false,
            is_loading: true,
        }
    }
}

impl RoundUiState {
    fn from_round(loaded: RoundWithPlayers) -> Result<Self, AppError> {
        let state = round_state(&loaded)?;
        let rows = loaded
            .players
            .iter()
            .map(|p| {
                let id = p.player.id;
                RoundPlayerRow {
                    player_id: id,
                    name: p.player.name.clone(),
                    points: p.round_player.points,
                    eliminated: p.round_player.eliminated,
                    status: state.status_of(id).unwrap_or(PlayerStatus::Playing),
                    can_pass: state.can_act(id),
                    can_win: state.can_act(id),
                }
            })
            .collect();

        Ok(Self {
            winner_name: loaded.winner().map(|p| p.name.clone()),
            rows,
            phase: state.phase(),
            max_points: state.max_points,
            knocks: state.knocks,
            current_game: state.current_game,
            is_short_round: state.is_short_round(),
            can_enable_short_round: state.can_toggle_short_round(),
            can_knock: state.can_knock(),
            can_knock_down: state.can_knock_down(),
            can_start_new_game: state.can_start_new_game(),
            round: Some(loaded),
            is_loading: false,
        })
    }

    pub fn row(&self, player_id: i32) -> Option<&RoundPlayerRow> {
        self.rows.iter().find(|r| r.player_id == player_id)
    }
}

pub struct RoundView {
    state: AppState,
    round_id: i32,
    tx: watch::Sender<RoundUiState>,
}

impl RoundView {
    pub async fn open(state: AppState, round_id: i32) -> Result<Self, AppError> {
        let view = Self {
            state,
            round_id,
            tx: watch::Sender::new(RoundUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }

    pub fn round_id(&self) -> i32 {
        self.round_id
    }

    pub async fn pass(&self, player_id: i32) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().pass(txn, round_id, player_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn win(&self, player_id: i32) -> Result<WinOutcome, AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                let (outcome, _) = RoundService::new().win(txn, round_id, player_id).await?;
                Ok(outcome)
            })
        })
        .await
    }

    pub async fn knock(&self) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().knock(txn, round_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn knock_down(&self) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().knock_down(txn, round_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn add_point(&self, player_id: i32) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().add_point(txn, round_id, player_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn remove_point(&self, player_id: i32) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new()
                    .remove_point(txn, round_id, player_id)
                    .await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn start_new_game(&self) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().start_new_game(txn, round_id).await?;
                Ok(())
            })
        })
        .await
    }

    pub async fn toggle_short_round(&self) -> Result<(), AppError> {
        let round_id = self.round_id;
        commit(self, Change::Rounds, move |txn| {
            Box::pin(async move {
                RoundService::new().toggle_short_round(txn, round_id).await?;
                Ok(())
            })
        })
        .await
    }
}

#[async_trait]
impl ViewModel for RoundView {
    type UiState = RoundUiState;
    const NAME: &'static str = "round";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<RoundUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::Rounds, Change::Players]
    }

    async fn load(&self) -> Result<RoundUiState, AppError> {
        let loaded = RoundService::new()
            .round_with_players(self.state.db(), self.round_id)
            .await?;
        RoundUiState::from_round(loaded)
    }
}
