//! Registry persistence.

pub mod repository;
