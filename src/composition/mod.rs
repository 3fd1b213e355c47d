//! Segment model and the builders that produce each segment kind.
//!
//! Segments are declarative: elements carry their own time span and motion, and
//! encoders turn them into filter graphs.

/// Title and answer cards.
pub mod card;
/// Fluent segment builder.
pub mod dsl;
/// Segment, element and fill types.
pub mod model;
/// Three-image reveal segment.
pub mod reveal;
