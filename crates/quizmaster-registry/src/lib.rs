//! Quizmaster — game state.
//!
//! Keeps track of the spreadsheets provisioned for a game: the manager sheet
//! and one sheet per team.

pub mod application;
pub mod domain;
