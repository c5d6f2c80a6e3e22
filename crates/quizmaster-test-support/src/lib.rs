//! Shared test fakes and utilities for the Quizmaster game runner.

mod sheets;
mod store;

pub use sheets::{FailingSheetService, RecordingSheetService, SheetCall};
pub use store::{FailingStore, InMemoryStore};
