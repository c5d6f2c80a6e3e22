//! Registry domain types.

pub mod registry;
