//! Shared primitives: geometry and color types, errors, small math helpers.

/// Canvas, frame rate, color and geometry types.
pub mod core;
/// Error type and result alias.
pub mod error;
pub(crate) mod math;
