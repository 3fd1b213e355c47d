//! Media inspection and audio planning.

/// Background bed and narration cue planning.
pub mod mix;
/// Audio duration and image dimension probes.
pub mod probe;
