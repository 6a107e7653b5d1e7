//! `toepen` command line: one subcommand group per screen.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod commands;
pub mod render;

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "toepen")]
#[command(about = "Scorebord voor toepen: avonden, rondes en strafpunten")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file (overrides TOEPEN_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print the screen state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play evenings
    Sessions(SessionsCommand),
    /// One play evening
    Session(SessionCommand),
    /// One round of a session
    Round(RoundCommand),
    /// Player list
    Players(PlayersCommand),
    /// Database maintenance
    Settings(SettingsCommand),
    /// Everything in the database, joined
    Overview,
}

#[derive(Debug, Args)]
pub struct SessionsCommand {
    #[command(subcommand)]
    pub command: Option<SessionsSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum SessionsSubcommand {
    /// List sessions, newest first
    List,
    /// Start a new session now
    New,
    /// Delete a session with its rounds
    Delete { id: i32 },
}

#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Session id
    pub id: i32,

    #[command(subcommand)]
    pub command: Option<SessionSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum SessionSubcommand {
    /// Show players and rounds
    Show,
    /// Add active players to the session
    AddPlayers {
        #[arg(required = true)]
        player_ids: Vec<i32>,
    },
    /// Sit a player out or let them back in
    TogglePlayer { player_id: i32 },
    /// Remove a player from the session
    RemovePlayer { player_id: i32 },
    /// Start the next round
    StartRound {
        /// Play to 10 instead of 15
        #[arg(long)]
        short: bool,
    },
    /// Delete a round
    DeleteRound { round_id: i32 },
    /// Close the session and its rounds
    Close,
}

#[derive(Debug, Args)]
pub struct RoundCommand {
    /// Round id
    pub id: i32,

    #[command(subcommand)]
    pub command: Option<RoundSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum RoundSubcommand {
    /// Show scores and what can be done next
    Show,
    /// A player folds and takes the pass penalty
    Pass { player_id: i32 },
    /// A player wins the sub-game; the others take the penalty
    Win { player_id: i32 },
    /// Raise the stakes by one
    Knock,
    /// Undo one knock
    KnockDown,
    /// Correct a score by +1
    PointAdd { player_id: i32 },
    /// Correct a score by -1
    PointRemove { player_id: i32 },
    /// Start the next sub-game
    NewGame,
    /// Switch between 15 and 10 points
    Short,
}

#[derive(Debug, Args)]
pub struct PlayersCommand {
    #[command(subcommand)]
    pub command: Option<PlayersSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum PlayersSubcommand {
    /// List all players
    List,
    /// Add a player
    Add { name: String },
    /// Rename a player
    Rename { id: i32, name: String },
    /// Make a player selectable again
    Activate { id: i32 },
    /// Hide a player from selection
    Deactivate { id: i32 },
    /// Delete a player who never played
    Delete { id: i32 },
}

#[derive(Debug, Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: Option<SettingsSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Show the database location and session count
    Show,
    /// Wipe the database
    Reset {
        /// Keep the player list
        #[arg(long)]
        keep_players: bool,
    },
}
