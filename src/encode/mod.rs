//! Program encoders.
//!
//! Encoders consume an assembled [`crate::timeline::program::Program`] plus its audio plan
//! and write a finished video file.

/// ffmpeg filter expression helpers.
pub mod expr;
/// `ffmpeg`-based MP4 encoder (system `ffmpeg` binary).
pub mod ffmpeg;
/// Encoder trait, config and a recording encoder for tests.
pub mod sink;
