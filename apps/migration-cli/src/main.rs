use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use db_infra::config::db::DbKind;
use db_infra::infra::db::orchestrate_migration;
use migration::MigrationCommand;
use tracing::{error, info};

#[derive(Clone, ValueEnum)]
enum Db {
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Toepen scorebord database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database type
    #[arg(short, long, value_enum, default_value = "sqlite-file")]
    db: Db,

    /// Database file (defaults to TOEPEN_DB_PATH or data/toepen.sqlite3)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.to_string().contains("invalid value") && e.to_string().contains("--db") {
                eprintln!("❌ Unsupported database type provided.");
                eprintln!();
                eprintln!("Note: SQLite in-memory databases are not supported for CLI operations.");
                eprintln!("Each CLI run would migrate a fresh database that disappears on exit.");
                eprintln!();
                eprintln!("Example: cargo run -p migration-cli -- --file data/toepen.sqlite3 status");
                std::process::exit(1);
            }
            e.exit();
        }
    };

    let db_kind = match args.db {
        Db::SqliteFile => DbKind::SqliteFile,
    };

    match orchestrate_migration(db_kind, args.file.as_deref(), args.command).await {
        Ok(()) => info!(command = ?args.command, "migration finished"),
        Err(e) => {
            error!(error = %e, "migration failed");
            std::process::exit(1);
        }
    }
}
