use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;
use tracing::trace;

use super::change::Change;
use crate::config::db::DbProfile;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    profile: DbProfile,
    changes: broadcast::Sender<Change>,
}

impl AppState {
    pub const DEFAULT_CHANGE_CAPACITY: usize = 64;

    pub fn new(db: DatabaseConnection, profile: DbProfile, change_capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(change_capacity);
        Self {
            db,
            profile,
            changes,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn profile(&self) -> &DbProfile {
        &self.profile
    }

    /// Announce a committed write. Having no subscribers is not an error.
    pub fn publish(&self, change: Change) {
        let receivers = self.changes.send(change).unwrap_or(0);
        trace!(?change, receivers, "change published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }
}
