//! Round results domain types and grading.

pub mod grading;
pub mod round;
