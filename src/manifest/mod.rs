//! Render job input: parsing, validation and generation from an actor's filmography.

/// Manifest generation from cast credits.
pub mod generate;
/// Manifest types and tolerant parsing.
pub mod model;
