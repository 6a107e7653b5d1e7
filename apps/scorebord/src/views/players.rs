//! Player picker: manage players and choose who joins a session.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use super::{commit, ViewModel};
use crate::error::AppError;
use crate::repos::players::Player;
use crate::services::players::PlayerService;
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::state::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRow {
    pub player: Player,
    /// Only players without history can be deleted
    pub can_delete: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayersUiState {
    pub players: Vec<PlayerRow>,
    pub selected: BTreeSet<i32>,
    pub new_player_name: String,
    pub is_loading: bool,
}

impl Default for PlayersUiState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            selected: BTreeSet::new(),
            new_player_name: String::new(),
            is_loading: true,
        }
    }
}

pub struct PlayersView {
    state: AppState,
    tx: watch::Sender<PlayersUiState>,
}

impl PlayersView {
    pub async fn open(state: AppState) -> Result<Self, AppError> {
        let view = Self {
            state,
            tx: watch::Sender::new(PlayersUiState::default()),
        };
        view.refresh().await?;
        Ok(view)
    }

    pub fn set_new_player_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.tx.send_modify(|s| s.new_player_name = name);
    }

    /// Create a player from the typed name and clear the input.
    pub async fn create_player(&self) -> Result<Player, AppError> {
        let name = self.tx.borrow().new_player_name.clone();
        let player = commit(self, Change::Players, move |txn| {
            Box::pin(async move { Ok(PlayerService::new().create_player(txn, &name).await?) })
        })
        .await?;
        self.tx.send_modify(|s| s.new_player_name.clear());
        Ok(player)
    }

    pub async fn rename_player(&self, player_id: i32, name: String) -> Result<Player, AppError> {
        commit(self, Change::Players, move |txn| {
            Box::pin(async move {
                Ok(PlayerService::new()
                    .rename_player(txn, player_id, &name)
                    .await?)
            })
        })
        .await
    }

    pub async fn set_active(&self, player_id: i32, active: bool) -> Result<Player, AppError> {
        commit(self, Change::Players, move |txn| {
            Box::pin(async move {
                Ok(PlayerService::new()
                    .set_active(txn, player_id, active)
                    .await?)
            })
        })
        .await
    }

    pub async fn toggle_active(&self, player_id: i32) -> Result<Player, AppError> {
        commit(self, Change::Players, move |txn| {
            Box::pin(async move { Ok(PlayerService::new().toggle_active(txn, player_id).await?) })
        })
        .await
    }

    pub async fn delete_player(&self, player_id: i32) -> Result<(), AppError> {
        commit(self, Change::Players, move |txn| {
            Box::pin(async move {
                PlayerService::new()
                    .delete_player_if_unused(txn, player_id)
                    .await?;
                Ok(())
            })
        })
        .await?;
        self.tx.send_modify(|s| {
            s.selected.remove(&player_id);
        });
        Ok(())
    }

    /// Select or unselect a player for the session being filled. Only active
    /// players can be selected.
    pub fn toggle_selection(&self, player_id: i32) -> bool {
        let mut selected_now = false;
        self.tx.send_if_modified(|s| {
            let selectable = s
                .players
                .iter()
                .any(|row| row.player.id == player_id && row.player.active);
            if !s.selected.remove(&player_id) {
                if !selectable {
                    return false;
                }
                s.selected.insert(player_id);
                selected_now = true;
            }
            for row in &mut s.players {
                row.selected = s.selected.contains(&row.player.id);
            }
            true
        });
        selected_now
    }

    /// Add the selected players to a session and clear the selection.
    pub async fn confirm_selection(&self, session_id: i32) -> Result<usize, AppError> {
        let ids: Vec<i32> = self.tx.borrow().selected.iter().copied().collect();
        let added = commit(self, Change::Sessions, move |txn| {
            Box::pin(async move {
                let links = SessionService::new()
                    .add_players(txn, session_id, &ids)
                    .await?;
                Ok(links.len())
            })
        })
        .await?;
        self.tx.send_modify(|s| {
            s.selected.clear();
            for row in &mut s.players {
                row.selected = false;
            }
        });
        Ok(added)
    }
}

#[async_trait]
impl ViewModel for PlayersView {
    type UiState = PlayersUiState;
    const NAME: &'static str = "players";

    fn app_state(&self) -> &AppState {
        &self.state
    }

    fn sender(&self) -> &watch::Sender<PlayersUiState> {
        &self.tx
    }

    fn topics(&self) -> &'static [Change] {
        &[Change::Players, Change::Sessions]
    }

    async fn load(&self) -> Result<PlayersUiState, AppError> {
        let (selected, new_player_name) = {
            let current = self.tx.borrow();
            (current.selected.clone(), current.new_player_name.clone())
        };

        let service = PlayerService::new();
        let db = self.state.db();
        let mut players = Vec::new();
        for player in service.list_players(db).await? {
            let in_use = service.is_player_used(db, player.id).await?;
            players.push(PlayerRow {
                selected: selected.contains(&player.id),
                can_delete: !in_use,
                player,
            });
        }

        // drop selections of players that vanished or were deactivated
        let selected: BTreeSet<i32> = players
            .iter()
            .filter(|row| row.selected && row.player.active)
            .map(|row| row.player.id)
            .collect();
        for row in &mut players {
            row.selected = selected.contains(&row.player.id);
        }

        Ok(PlayersUiState {
            players,
            selected,
            new_player_name,
            is_loading: false,
        })
    }
}
