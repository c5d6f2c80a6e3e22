//! Sources of grading decisions.

use std::io::{BufRead, Write};

use quizmaster_core::error::DomainError;
use quizmaster_results::domain::round::{ResponseStatus, RoundResponse};

/// Supplies the operator's verdict on one team's response.
pub trait GradingPrompt {
    /// Returns the new status for `team`'s `response`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the decision cannot be
    /// obtained.
    fn decide(
        &mut self,
        team: &str,
        response: &RoundResponse,
    ) -> Result<ResponseStatus, DomainError>;
}

/// Asks for each decision on a text console. The operator types `+`, `-`,
/// `?` or an empty line; anything else is asked again.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    /// Creates a prompt reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

fn console_error(e: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("console i/o failed: {e}"))
}

impl<R: BufRead, W: Write> GradingPrompt for ConsolePrompt<R, W> {
    fn decide(
        &mut self,
        team: &str,
        response: &RoundResponse,
    ) -> Result<ResponseStatus, DomainError> {
        writeln!(
            self.output,
            "Team {team}, response: {}, previous status: {}",
            response.response, response.status
        )
        .map_err(|e| console_error(&e))?;

        loop {
            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|e| console_error(&e))?;
            if read == 0 {
                return Err(DomainError::Infrastructure(
                    "console input closed while grading".to_owned(),
                ));
            }
            if let Some(status) = ResponseStatus::from_mark(line.trim_end_matches(['\r', '\n'])) {
                return Ok(status);
            }
            writeln!(self.output, "Unknown status, try again").map_err(|e| console_error(&e))?;
        }
    }
}
