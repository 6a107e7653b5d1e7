use db_infra::{build_pool, orchestrate_migration_internal};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::db::DbProfile;
use crate::error::AppError;

/// Open the database for `profile` and bring its schema up to date.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let kind = profile.kind();
    let file = profile.file();

    let conn = build_pool(kind, file).await?;
    orchestrate_migration_internal(&conn, kind, file, MigrationCommand::Up).await?;

    info!(db = %profile.describe(), "database ready");
    Ok(conn)
}
