//! Quizmaster console entry point.

use clap::Parser;
use quizmaster_cli::app;
use quizmaster_cli::args::Args;
use quizmaster_cli::error::AppError;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr so the console on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Starting quizmaster");

    app::run(args).await
}
