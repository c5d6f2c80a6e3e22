//! Quizmaster Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the layout
//! engine, the repositories and the workflow depend on. It contains no
//! infrastructure code.

pub mod config;
pub mod error;
pub mod sheets;
pub mod store;
