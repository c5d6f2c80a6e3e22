//! Quizmaster — the operator-facing application.
//!
//! Wires the layout engine, the registry and the results ledger to a remote
//! spreadsheet service and drives them from an interactive console.

pub mod app;
pub mod args;
pub mod commands;
pub mod error;
pub mod grading_prompt;
pub mod repl;
pub mod sheets_client;
pub mod workflow;
