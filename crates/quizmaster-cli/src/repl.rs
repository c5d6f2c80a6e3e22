//! Interactive command loop.

use std::io::{BufRead, Write};

use quizmaster_core::error::DomainError;
use quizmaster_core::sheets::SpreadsheetService;
use quizmaster_core::store::Store;
use tracing::warn;

use crate::commands::{Command, parse_command};
use crate::error::AppError;
use crate::grading_prompt::ConsolePrompt;
use crate::workflow::GameWorkflow;

/// Whether the loop keeps reading commands.
enum Flow {
    Continue,
    Exit,
}

/// Reads commands from `input` until `exit` or end of input, printing
/// results to `output`. A failed command is reported and the loop goes on.
///
/// # Errors
///
/// Returns `AppError::Io` if the console cannot be read or written.
pub async fn run_repl<S, C, R, W>(
    workflow: &GameWorkflow<S, C>,
    mut input: R,
    mut output: W,
) -> Result<(), AppError>
where
    S: Store,
    C: SpreadsheetService,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "Enter command: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }
        let line = line.trim_end_matches(['\r', '\n']);
        writeln!(output)?;

        match execute(workflow, line, &mut input, &mut output).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(err) => {
                warn!(command = line, error = %err, "command failed");
                writeln!(output, "command \"{line}\" failed: {err}")?;
            }
        }
    }
}

async fn execute<S, C, R, W>(
    workflow: &GameWorkflow<S, C>,
    line: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Flow, CommandError>
where
    S: Store,
    C: SpreadsheetService,
    R: BufRead,
    W: Write,
{
    match parse_command(line)? {
        Command::ListUrls => write!(output, "{}", workflow.list_urls()?)?,
        Command::Fetch(round) => write!(output, "{}", workflow.fetch_round(round).await?)?,
        Command::Get(round) => write!(output, "{}", workflow.get_round(round)?)?,
        Command::Check(round) => {
            writeln!(output, "Checking results for the round {round}")?;
            let mut prompt = ConsolePrompt::new(&mut *input, &mut *output);
            workflow.check_round(round, &mut prompt)?;
        }
        Command::Total => {
            for (team, score) in workflow.total()? {
                writeln!(output, "Team {team}: {score}")?;
            }
        }
        Command::Delete => {
            let deleted = workflow.delete_game().await?;
            writeln!(output, "deleted {deleted} spreadsheets")?;
        }
        Command::Exit => return Ok(Flow::Exit),
        Command::Empty => writeln!(output, "got an empty command")?,
        Command::Unknown(name) => writeln!(output, "unknown command: {name}")?,
    }
    Ok(Flow::Continue)
}

/// Failure of one console command.
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
