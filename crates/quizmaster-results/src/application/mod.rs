//! Round results persistence and scoring.

pub mod ledger;
