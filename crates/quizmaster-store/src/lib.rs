//! Quizmaster local store.
//!
//! A single SQLite file holding the game's buckets. Implements the
//! `quizmaster_core::store::Store` transaction contract.

pub mod schema;
pub mod sqlite_store;
