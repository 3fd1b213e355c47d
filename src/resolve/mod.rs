//! Asset collaborators: posters, headshots and narration.
//!
//! Every resolver is synchronous and may fail with `NotFound` or `Network`; the
//! interpreter recovers from both with a fallback.

use std::path::PathBuf;

use crate::{foundation::error::ReelResult, manifest::model::MovieRef};

/// Disk memoization in front of fetchers.
pub mod cache;
/// ElevenLabs text-to-speech narration.
pub mod elevenlabs;
/// Blocking HTTP helpers shared by the remote collaborators.
pub mod http;
/// OMDb poster lookups.
pub mod omdb;
/// TMDB headshots and filmographies.
pub mod tmdb;

/// Resolves a movie reference to a local poster image.
pub trait PosterResolver {
    fn resolve(&self, movie: &MovieRef) -> ReelResult<PathBuf>;
}

/// Resolves a person's name to a local headshot image.
pub trait HeadshotResolver {
    fn resolve(&self, name: &str) -> ReelResult<PathBuf>;
}

/// Turns text into a local audio clip. `Ok(None)` means "no voice for this text".
pub trait NarrationSynthesizer {
    fn synthesize(&self, text: &str) -> ReelResult<Option<PathBuf>>;
}
