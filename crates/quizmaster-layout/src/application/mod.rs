//! Layout application layer: write requests built from the game layout.

pub mod builders;
