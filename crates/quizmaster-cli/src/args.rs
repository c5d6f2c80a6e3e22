//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Runs a quiz game over shared spreadsheets.
#[derive(Debug, Parser)]
#[command(name = "quizmaster", version, about)]
pub struct Args {
    /// Game configuration file (JSON).
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Directory holding the game state.
    #[arg(long)]
    pub out: PathBuf,

    /// Provision the spreadsheets of a new game. The output directory must
    /// be absent or empty.
    #[arg(long)]
    pub new_game: bool,

    /// OAuth bearer token for the spreadsheet and drive APIs.
    #[arg(long, env = "QUIZMASTER_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Root URL of the remote APIs, replacing the Google endpoints.
    #[arg(long, env = "QUIZMASTER_API_BASE")]
    pub api_base: Option<String>,
}
