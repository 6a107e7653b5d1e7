use clap::Parser;
use scorebord::cli::{self, Cli};
use scorebord::{build_state, AppError, DbProfile};

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let args = Cli::parse();
    let json = args.json;

    if let Err(e) = run(args).await {
        if json {
            match serde_json::to_string(&e.report()) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("{}: {}", e.code(), e.detail()),
            }
        } else {
            eprintln!("{}: {}", e.code(), e.detail());
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(args: Cli) -> Result<(), AppError> {
    let profile = DbProfile::from_env(args.db.clone())?;
    let state = build_state().with_db(profile).build().await?;
    cli::run(args, state).await
}
