//! Easing curves and rectangle keyframe tracks.

/// Easing functions.
pub mod ease;
/// Two-keyframe rectangle animation.
pub mod rect;
