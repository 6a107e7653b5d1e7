//! Command dispatch: open the screen's view, run the action, print the snapshot.

use std::collections::BTreeSet;

use dialoguer::Confirm;
use serde::Serialize;
use tracing::debug;

use super::render;
use super::{
    Cli, Commands, PlayersSubcommand, RoundSubcommand, SessionSubcommand, SessionsSubcommand,
    SettingsSubcommand,
};
use crate::domain::rules::MaxPoints;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;
use crate::views::{
    DatabaseOverviewView, HomeView, PlayersView, RoundView, SessionView, SettingsView, ViewModel,
};

struct Output {
    json: bool,
    yes: bool,
}

impl Output {
    fn show<T: Serialize>(&self, state: &T, text: impl FnOnce(&T) -> String) -> Result<(), AppError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(state)?);
        } else {
            println!("{}", text(state));
        }
        Ok(())
    }

    fn note(&self, message: impl AsRef<str>) {
        if !self.json {
            println!("{}", message.as_ref());
        }
    }

    /// Ask before a destructive action; `--yes` answers for the user.
    fn confirm(&self, prompt: &str) -> Result<(), AppError> {
        if self.yes {
            return Ok(());
        }
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if confirmed {
            Ok(())
        } else {
            Err(AppError::Aborted)
        }
    }
}

pub async fn run(cli: Cli, state: AppState) -> Result<(), AppError> {
    let out = Output {
        json: cli.json,
        yes: cli.yes,
    };
    debug!(command = ?cli.command, "dispatch");

    match cli.command {
        Commands::Sessions(cmd) => sessions(&out, state, cmd.command).await,
        Commands::Session(cmd) => session(&out, state, cmd.id, cmd.command).await,
        Commands::Round(cmd) => round(&out, state, cmd.id, cmd.command).await,
        Commands::Players(cmd) => players(&out, state, cmd.command).await,
        Commands::Settings(cmd) => settings(&out, state, cmd.command).await,
        Commands::Overview => {
            let view = DatabaseOverviewView::open(state).await?;
            out.show(&view.ui_state(), render::overview)
        }
    }
}

async fn sessions(
    out: &Output,
    state: AppState,
    command: Option<SessionsSubcommand>,
) -> Result<(), AppError> {
    let view = HomeView::open(state).await?;
    match command.unwrap_or(SessionsSubcommand::List) {
        SessionsSubcommand::List => {}
        SessionsSubcommand::New => {
            let session = view.add_session().await?;
            out.note(format!("Avond #{} gestart", session.id));
        }
        SessionsSubcommand::Delete { id } => {
            out.confirm(&format!("Avond #{id} met alle rondes verwijderen?"))?;
            view.delete_session(id).await?;
        }
    }
    out.show(&view.ui_state(), render::home)
}

async fn session(
    out: &Output,
    state: AppState,
    session_id: i32,
    command: Option<SessionSubcommand>,
) -> Result<(), AppError> {
    let view = SessionView::open(state.clone(), session_id).await?;
    match command.unwrap_or(SessionSubcommand::Show) {
        SessionSubcommand::Show => {}
        SessionSubcommand::AddPlayers { player_ids } => {
            let picker = PlayersView::open(state).await?;
            let unique: BTreeSet<i32> = player_ids.into_iter().collect();
            for player_id in unique {
                if !picker.toggle_selection(player_id) {
                    return Err(AppError::invalid(
                        ErrorCode::ValidationError,
                        format!("Player {player_id} is unknown or inactive"),
                    ));
                }
            }
            let added = picker.confirm_selection(session_id).await?;
            view.refresh().await?;
            out.note(format!("{added} speler(s) toegevoegd"));
        }
        SessionSubcommand::TogglePlayer { player_id } => view.toggle_player(player_id).await?,
        SessionSubcommand::RemovePlayer { player_id } => {
            out.confirm(&format!("Speler #{player_id} uit deze avond verwijderen?"))?;
            view.remove_player(player_id).await?;
        }
        SessionSubcommand::StartRound { short } => {
            let max_points = if short {
                MaxPoints::Short
            } else {
                MaxPoints::Normal
            };
            let started = view.start_round(max_points).await?;
            out.note(format!(
                "Ronde {} gestart (#{})",
                started.round.round_number, started.round.id
            ));
        }
        SessionSubcommand::DeleteRound { round_id } => {
            out.confirm(&format!("Ronde #{round_id} verwijderen?"))?;
            view.delete_round(round_id).await?;
        }
        SessionSubcommand::Close => {
            out.confirm("Deze avond afsluiten?")?;
            view.close_session().await?;
        }
    }
    out.show(&view.ui_state(), render::session)
}

async fn round(
    out: &Output,
    state: AppState,
    round_id: i32,
    command: Option<RoundSubcommand>,
) -> Result<(), AppError> {
    let view = RoundView::open(state, round_id).await?;
    match command.unwrap_or(RoundSubcommand::Show) {
        RoundSubcommand::Show => {}
        RoundSubcommand::Pass { player_id } => view.pass(player_id).await?,
        RoundSubcommand::Win { player_id } => {
            let outcome = view.win(player_id).await?;
            out.note(render::win(&outcome));
        }
        RoundSubcommand::Knock => view.knock().await?,
        RoundSubcommand::KnockDown => view.knock_down().await?,
        RoundSubcommand::PointAdd { player_id } => view.add_point(player_id).await?,
        RoundSubcommand::PointRemove { player_id } => view.remove_point(player_id).await?,
        RoundSubcommand::NewGame => view.start_new_game().await?,
        RoundSubcommand::Short => view.toggle_short_round().await?,
    }
    out.show(&view.ui_state(), render::round)
}

async fn players(
    out: &Output,
    state: AppState,
    command: Option<PlayersSubcommand>,
) -> Result<(), AppError> {
    let view = PlayersView::open(state).await?;
    match command.unwrap_or(PlayersSubcommand::List) {
        PlayersSubcommand::List => {}
        PlayersSubcommand::Add { name } => {
            view.set_new_player_name(name);
            let player = view.create_player().await?;
            out.note(format!("Speler #{} toegevoegd", player.id));
        }
        PlayersSubcommand::Rename { id, name } => {
            view.rename_player(id, name).await?;
        }
        PlayersSubcommand::Activate { id } => {
            view.set_active(id, true).await?;
        }
        PlayersSubcommand::Deactivate { id } => {
            view.set_active(id, false).await?;
        }
        PlayersSubcommand::Delete { id } => {
            out.confirm(&format!("Speler #{id} verwijderen?"))?;
            view.delete_player(id).await?;
        }
    }
    out.show(&view.ui_state(), render::players)
}

async fn settings(
    out: &Output,
    state: AppState,
    command: Option<SettingsSubcommand>,
) -> Result<(), AppError> {
    let view = SettingsView::open(state).await?;
    match command.unwrap_or(SettingsSubcommand::Show) {
        SettingsSubcommand::Show => out.show(&view.ui_state(), render::settings),
        SettingsSubcommand::Reset { keep_players } => {
            let prompt = if keep_players {
                "Alle avonden en rondes verwijderen? Spelers blijven bestaan."
            } else {
                "De hele database leegmaken, spelers inbegrepen?"
            };
            out.confirm(prompt)?;
            let report = view.reset_database(keep_players).await?;
            out.show(&report, render::clear_report)
        }
    }
}
