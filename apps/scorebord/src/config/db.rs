use std::path::{Path, PathBuf};

use db_infra::config::db::{sqlite_file_path, DbKind};

use crate::error::AppError;

/// Which database the application state is built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// SQLite file; `None` resolves through `TOEPEN_DB_PATH` and the default location
    SqliteFile { file: Option<PathBuf> },
    /// Private in-memory database, used by tests and `TOEPEN_DB=memory`
    InMemory,
}

impl DbProfile {
    /// Profile from `TOEPEN_DB`, with an optional explicit file (the CLI `--db` flag).
    pub fn from_env(file: Option<PathBuf>) -> Result<Self, AppError> {
        if file.is_some() {
            return Ok(DbProfile::SqliteFile { file });
        }
        match DbKind::from_env()? {
            DbKind::SqliteFile => Ok(DbProfile::SqliteFile { file: None }),
            DbKind::SqliteMemory => Ok(DbProfile::InMemory),
        }
    }

    pub fn kind(&self) -> DbKind {
        match self {
            DbProfile::SqliteFile { .. } => DbKind::SqliteFile,
            DbProfile::InMemory => DbKind::SqliteMemory,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        match self {
            DbProfile::SqliteFile { file } => file.as_deref(),
            DbProfile::InMemory => None,
        }
    }

    /// Human-readable location, for logs and the overview screen.
    pub fn describe(&self) -> String {
        match self {
            DbProfile::SqliteFile { file } => {
                sqlite_file_path(file.as_deref()).display().to_string()
            }
            DbProfile::InMemory => ":memory:".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn explicit_file_wins_over_env() {
        std::env::set_var("TOEPEN_DB", "memory");
        let profile = DbProfile::from_env(Some(PathBuf::from("/tmp/x.sqlite3"))).unwrap();
        assert_eq!(
            profile,
            DbProfile::SqliteFile {
                file: Some(PathBuf::from("/tmp/x.sqlite3"))
            }
        );
        std::env::remove_var("TOEPEN_DB");
    }

    #[test]
    #[serial]
    fn memory_profile_from_env() {
        std::env::set_var("TOEPEN_DB", "memory");
        let profile = DbProfile::from_env(None).unwrap();
        assert_eq!(profile, DbProfile::InMemory);
        assert_eq!(profile.kind(), DbKind::SqliteMemory);
        assert_eq!(profile.describe(), ":memory:");
        std::env::remove_var("TOEPEN_DB");

        assert_eq!(
            DbProfile::from_env(None).unwrap(),
            DbProfile::SqliteFile { file: None }
        );
    }
}
