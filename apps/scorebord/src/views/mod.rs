//! View-state holders, one per screen.
//!
//! Each holder publishes an immutable UI snapshot through a `watch` channel.
//! Actions run in one transaction, announce the change on the app-wide feed
//! and reload the snapshot. [`follow_changes`] keeps a holder fresh when
//! writes happen through another holder.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::change::Change;

pub mod home;
pub mod overview;
pub mod players;
pub mod round;
pub mod session;
pub mod settings;

pub use home::{HomeUiState, HomeView};
pub use overview::{DatabaseOverviewUiState, DatabaseOverviewView};
pub use players::{PlayerRow, PlayersUiState, PlayersView};
pub use round::{RoundPlayerRow, RoundUiState, RoundView};
pub use session::{SessionUiState, SessionView};
pub use settings::{SettingsUiState, SettingsView};

#[async_trait]
pub trait ViewModel: Send + Sync + 'static {
    type UiState: Clone + Send + Sync + 'static;

    /// Human-readable name for logs
    const NAME: &'static str;

    fn app_state(&self) -> &AppState;

    fn sender(&self) -> &watch::Sender<Self::UiState>;

    /// Feed topics that make this snapshot stale
    fn topics(&self) -> &'static [Change];

    /// Query a fresh snapshot.
    async fn load(&self) -> Result<Self::UiState, AppError>;

    async fn refresh(&self) -> Result<(), AppError> {
        let next = self.load().await?;
        self.sender().send_replace(next);
        debug!(view = Self::NAME, "snapshot refreshed");
        Ok(())
    }

    fn ui_state(&self) -> Self::UiState {
        self.sender().borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Self::UiState> {
        self.sender().subscribe()
    }
}

type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'c>>;

/// Run a write in one transaction, publish `change`, then reload `view`.
pub(crate) async fn commit<V, R, F>(view: &V, change: Change, f: F) -> Result<R, AppError>
where
    V: ViewModel,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R> + Send,
    R: Send,
{
    let out = with_txn(view.app_state(), f).await?;
    view.app_state().publish(change);
    view.refresh().await?;
    Ok(out)
}

/// Refresh `view` whenever a relevant change is published. Stops when the
/// feed closes or the returned handle is aborted.
pub fn follow_changes<V: ViewModel>(view: Arc<V>) -> JoinHandle<()> {
    let mut feed = view.app_state().subscribe();
    tokio::spawn(async move {
        loop {
            let stale = match feed.recv().await {
                Ok(change) => view.topics().iter().any(|&t| change.touches(t)),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(view = V::NAME, skipped, "change feed lagged");
                    true
                }
                Err(RecvError::Closed) => break,
            };
            if stale {
                if let Err(e) = view.refresh().await {
                    warn!(view = V::NAME, error = %e, "refresh after change failed");
                }
            }
        }
    })
}
