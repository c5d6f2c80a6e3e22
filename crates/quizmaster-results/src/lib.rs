//! Quizmaster — round results.
//!
//! Responsible for the per-round record of team responses, the operator's
//! grading of those responses and the final tally.

pub mod application;
pub mod domain;
