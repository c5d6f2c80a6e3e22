//! Quizmaster — answer-grid layout.
//!
//! Pure arithmetic shared by the manager sheet, the team sheets and the
//! round lookup: how questions are batched into groups and which cell
//! ranges each group occupies. Holds no remote or persisted state.

pub mod application;
pub mod domain;
