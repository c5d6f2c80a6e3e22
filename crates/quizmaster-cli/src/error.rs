//! Quizmaster — application error types.

use quizmaster_core::error::DomainError;
use thiserror::Error;

/// Start-up and session errors for the console application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid process parameters or output directory.
    #[error("configuration error: {0}")]
    Config(String),

    /// A workflow operation failed outside the command loop.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal or filesystem I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
