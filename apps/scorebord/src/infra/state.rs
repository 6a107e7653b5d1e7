use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: DbProfile,
    change_capacity: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: DbProfile::SqliteFile { file: None },
            change_capacity: AppState::DEFAULT_CHANGE_CAPACITY,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    /// Buffer size of the change feed; slow subscribers skip ahead when it overflows.
    pub fn with_change_capacity(mut self, capacity: usize) -> Self {
        self.change_capacity = capacity.max(1);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let conn = bootstrap_db(&self.db_profile).await?;
        Ok(AppState::new(conn, self.db_profile, self.change_capacity))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
