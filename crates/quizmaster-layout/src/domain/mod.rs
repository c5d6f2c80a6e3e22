//! Layout domain: question groups and range arithmetic.

pub mod groups;
pub mod ranges;
