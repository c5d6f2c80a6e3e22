//! Application start-up.

use std::io;
use std::path::Path;

use quizmaster_core::config::GameConfig;
use quizmaster_store::sqlite_store::SqliteStore;
use tracing::info;

use crate::args::Args;
use crate::error::AppError;
use crate::repl::run_repl;
use crate::sheets_client::HttpSheetsClient;
use crate::workflow::GameWorkflow;

/// Name of the store file inside the output directory.
pub const STORE_FILE: &str = "quizmaster.db";

/// Makes sure a new game starts from a clean output directory, creating the
/// directory if it does not exist. Existing games use the directory as is.
///
/// # Errors
///
/// Returns `AppError::Config` if a new game would reuse a non-empty
/// directory and `AppError::Io` if the directory cannot be read or created.
pub fn prepare_output_dir(new_game: bool, out: &Path) -> Result<(), AppError> {
    if !new_game {
        return Ok(());
    }
    match std::fs::read_dir(out) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(AppError::Config(format!(
                    "cannot use a non-empty output directory {} to create a game",
                    out.display()
                )));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(out)?;
            info!(dir = %out.display(), "created the game directory");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads the game, provisions it when asked and runs the console on
/// standard input and output.
///
/// # Errors
///
/// Returns `AppError` if start-up or provisioning fails, or if the console
/// breaks down.
pub async fn run(args: Args) -> Result<(), AppError> {
    let config = GameConfig::load(&args.config)?;
    prepare_output_dir(args.new_game, &args.out)?;

    let store = SqliteStore::new(args.out.join(STORE_FILE));
    let client = HttpSheetsClient::new(args.access_token, args.api_base.as_deref())?;
    let workflow = GameWorkflow::new(config, store, client);
    info!(
        game = %workflow.config().game_name,
        store = %args.out.join(STORE_FILE).display(),
        "game loaded"
    );

    if args.new_game {
        let registry = workflow.create_game().await?;
        print!("{registry}");
    }

    run_repl(&workflow, io::stdin().lock(), io::stdout().lock()).await
}
