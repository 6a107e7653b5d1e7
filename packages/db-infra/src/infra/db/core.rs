use std::path::Path;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use tracing::{error, info, trace, warn};

use crate::config::db::{
    make_conn_spec, max_connections, migrate_timeout_ms, sqlite_lock_path, DbKind,
};
use crate::error::DbInfraError;
use crate::infra::db::locking::{BootstrapLock, Guard, InMemoryLock, SqliteFileLock};

/// Open a pool for the given backend. No migrations are run here.
pub async fn build_pool(
    db_kind: DbKind,
    file: Option<&Path>,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(db_kind, file)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(1)
        .max_connections(max_connections(db_kind))
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(true);

    // In-memory databases vanish when their last connection closes.
    if matches!(db_kind, DbKind::SqliteMemory) {
        opt.idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }

    let pool = Database::connect(opt)
        .await
        .map_err(|e| DbInfraError::config(format!("failed to connect to database: {e}")))?;

    pool.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;",
    ))
    .await
    .map_err(|e| DbInfraError::config(format!("failed to enable foreign keys: {e}")))?;

    Ok(pool)
}

async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected_count = Migrator::migrations().len();
    let expected_last = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let (current_count, current_last) = match Migrator::get_applied_migrations(conn).await {
        Ok(migrations) => {
            let count = migrations.len();
            let last = migrations.last().map(|m| m.name().to_string());
            (count, last)
        }
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::migration(format!(
                "failed to get applied migrations: {e}"
            )));
        }
    };

    let is_up_to_date = current_count == expected_count
        && !expected_last.is_empty()
        && current_last.as_deref() == Some(expected_last.as_str());

    trace!(
        fastpath = if is_up_to_date { "hit" } else { "miss" },
        current_count = current_count,
        expected_count = expected_count,
        current_last = %current_last.as_deref().unwrap_or(""),
        expected_last = %expected_last
    );

    Ok(is_up_to_date)
}

/// CLI entry point: connect, then run the command under the migration lock.
pub async fn orchestrate_migration(
    db_kind: DbKind,
    file: Option<&Path>,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let pool = build_pool(db_kind, file).await?;
    orchestrate_migration_internal(&pool, db_kind, file, command).await
}

/// Run a migration command on an existing pool.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    db_kind: DbKind,
    file: Option<&Path>,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!("migrate=start db_kind={:?} command={:?}", db_kind, command);

    if matches!(command, MigrationCommand::Status) {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;
        info!("migrate=done");
        return Ok(());
    }

    let result = match db_kind {
        DbKind::SqliteMemory => migrate_with_lock(pool, InMemoryLock, db_kind, command).await,
        DbKind::SqliteFile => {
            let lock = SqliteFileLock::new(&sqlite_lock_path(file));
            migrate_with_lock(pool, lock, db_kind, command).await
        }
    };

    if let Err(ref e) = result {
        let msg = e.to_string();
        if msg.contains("database is locked") || msg.contains("SQLITE_BUSY") {
            error!("sqlite_busy op=migrate err={:?}", e);
        }
    }

    info!("migrate=done");
    result
}

async fn migrate_with_lock<L>(
    pool: &DatabaseConnection,
    mut lock: L,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError>
where
    L: BootstrapLock,
{
    let lock_acquire_ms = migrate_timeout_ms();
    let start = Instant::now();

    let mut attempts: u32 = 0;
    let guard = loop {
        attempts += 1;

        if matches!(command, MigrationCommand::Up) && fast_path_schema_check(pool).await? {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }

        if let Some(acquired) = lock.try_acquire().await? {
            trace!(
                lock = "won",
                db_kind = ?db_kind,
                attempts = attempts,
                elapsed_ms = start.elapsed().as_millis()
            );
            break acquired;
        }

        let delay_ms = (5u64 << attempts.saturating_sub(1).min(4)).min(80);
        trace!(lock = "backoff", attempts = attempts, delay_ms = delay_ms);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if start.elapsed() >= Duration::from_millis(lock_acquire_ms) {
            return Err(DbInfraError::migration(format!(
                "migration lock acquisition timeout after {:?} ({} attempts)",
                start.elapsed(),
                attempts
            )));
        }
    };

    let result = migrate_with_guard(pool, &guard, db_kind, command).await;
    guard.release();

    if let Err(ref e) = result {
        warn!(error = %e, "migration failed while holding the lock");
    }
    result
}

async fn migrate_with_guard(
    pool: &DatabaseConnection,
    _guard: &Guard,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let start = Instant::now();

    if matches!(db_kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(pool).await?;
    }

    migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;

    info!(
        migrator = "ran",
        db_kind = ?db_kind,
        elapsed_ms = start.elapsed().as_millis()
    );

    let expected_count = Migrator::migrations().len();
    let applied_count = Migrator::get_applied_migrations(pool)
        .await
        .map(|m| m.len())
        .unwrap_or(0);

    match command {
        MigrationCommand::Reset if applied_count != 0 => Err(DbInfraError::migration(format!(
            "reset should leave 0 migrations applied, but {applied_count} were found"
        ))),
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied_count != expected_count =>
        {
            Err(DbInfraError::migration(format!(
                "expected {expected_count} migrations, but {applied_count} were applied"
            )))
        }
        _ => Ok(()),
    }
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        pool.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await
            .map_err(|e| DbInfraError::config(format!("failed to apply `{pragma}`: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_database_migrates_up_and_skips_second_time() {
        let pool = build_pool(DbKind::SqliteMemory, None).await.unwrap();

        orchestrate_migration_internal(&pool, DbKind::SqliteMemory, None, MigrationCommand::Up)
            .await
            .unwrap();
        assert!(fast_path_schema_check(&pool).await.unwrap());

        orchestrate_migration_internal(&pool, DbKind::SqliteMemory, None, MigrationCommand::Up)
            .await
            .unwrap();
        assert_eq!(
            migration::count_applied_migrations(&pool).await.unwrap(),
            Migrator::migrations().len()
        );
    }

    #[tokio::test]
    async fn file_database_reset_leaves_nothing_applied() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("toepen.sqlite3");

        orchestrate_migration(DbKind::SqliteFile, Some(&file), MigrationCommand::Up)
            .await
            .unwrap();
        orchestrate_migration(DbKind::SqliteFile, Some(&file), MigrationCommand::Reset)
            .await
            .unwrap();

        let pool = build_pool(DbKind::SqliteFile, Some(&file)).await.unwrap();
        assert_eq!(migration::count_applied_migrations(&pool).await.unwrap(), 0);
    }
}
