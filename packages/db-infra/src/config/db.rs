use std::env;
use std::path::{Path, PathBuf};

use crate::error::DbInfraError;

/// Default location of the scoreboard database, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/toepen.sqlite3";

/// Storage backend for the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// SQLite database file on disk
    SqliteFile,
    /// Ephemeral SQLite database, gone when the pool closes
    SqliteMemory,
}

impl DbKind {
    /// Read `TOEPEN_DB` (`file` | `memory`), defaulting to a file database.
    pub fn from_env() -> Result<Self, DbInfraError> {
        match env::var("TOEPEN_DB") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "file" | "sqlite-file" => Ok(DbKind::SqliteFile),
                "memory" | "sqlite-memory" => Ok(DbKind::SqliteMemory),
                other => Err(DbInfraError::config(format!(
                    "TOEPEN_DB must be 'file' or 'memory', got '{other}'"
                ))),
            },
            Err(_) => Ok(DbKind::SqliteFile),
        }
    }
}

/// Resolve the database file: explicit path first, then `TOEPEN_DB_PATH`, then the default.
pub fn sqlite_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env::var("TOEPEN_DB_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Build the sqlx connection string for the given backend.
pub fn make_conn_spec(db_kind: DbKind, file: Option<&Path>) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::SqliteFile => {
            let path = sqlite_file_path(file);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DbInfraError::config(format!(
                            "failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            let path = path.to_str().ok_or_else(|| {
                DbInfraError::config(format!(
                    "database path is not valid UTF-8: {}",
                    path.display()
                ))
            })?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
    }
}

/// Lock file used to serialise migrations between processes sharing one database file.
pub fn sqlite_lock_path(file: Option<&Path>) -> PathBuf {
    let mut path = sqlite_file_path(file).into_os_string();
    path.push(".migrate.lock");
    PathBuf::from(path)
}

/// How long a migration may wait for the lock (`TOEPEN_MIGRATE_TIMEOUT_MS`).
pub fn migrate_timeout_ms() -> u64 {
    env::var("TOEPEN_MIGRATE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(3000)
}

/// Pool size for a backend. In-memory SQLite is per connection, so it must stay at one.
pub fn max_connections(db_kind: DbKind) -> u32 {
    match db_kind {
        DbKind::SqliteFile => 4,
        DbKind::SqliteMemory => 1,
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn file_path_prefers_explicit_then_env() {
        env::set_var("TOEPEN_DB_PATH", "/tmp/from-env.sqlite3");
        assert_eq!(
            sqlite_file_path(Some(Path::new("/tmp/explicit.sqlite3"))),
            PathBuf::from("/tmp/explicit.sqlite3")
        );
        assert_eq!(
            sqlite_file_path(None),
            PathBuf::from("/tmp/from-env.sqlite3")
        );
        env::remove_var("TOEPEN_DB_PATH");
        assert_eq!(sqlite_file_path(None), PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    #[serial]
    fn db_kind_from_env() {
        env::remove_var("TOEPEN_DB");
        assert_eq!(DbKind::from_env().unwrap(), DbKind::SqliteFile);

        env::set_var("TOEPEN_DB", "memory");
        assert_eq!(DbKind::from_env().unwrap(), DbKind::SqliteMemory);

        env::set_var("TOEPEN_DB", "postgres");
        let err = DbKind::from_env().unwrap_err();
        assert!(err.to_string().contains("postgres"));

        env::remove_var("TOEPEN_DB");
    }

    #[test]
    fn conn_spec_for_memory_and_file() {
        assert_eq!(
            make_conn_spec(DbKind::SqliteMemory, None).unwrap(),
            "sqlite::memory:"
        );

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("scores.sqlite3");
        let spec = make_conn_spec(DbKind::SqliteFile, Some(&file)).unwrap();
        assert!(spec.starts_with("sqlite://"));
        assert!(spec.ends_with("scores.sqlite3?mode=rwc"));
        assert!(file.parent().unwrap().exists());
    }

    #[test]
    fn lock_path_sits_next_to_database() {
        let lock = sqlite_lock_path(Some(Path::new("/tmp/toepen.sqlite3")));
        assert_eq!(lock, PathBuf::from("/tmp/toepen.sqlite3.migrate.lock"));
    }
}
