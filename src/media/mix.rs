use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{ReelError, ReelResult},
    timeline::program::Program,
};

/// Default gain of the background music bed.
pub const BACKGROUND_VOLUME: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Music looped under the whole program at reduced gain.
pub struct BackgroundBed {
    pub source: PathBuf,
    /// Linear gain in `[0, 1]`.
    pub volume: f64,
    /// Length the bed is looped (or cut) to, in seconds.
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One narration clip scheduled on the program timeline.
pub struct NarrationCue {
    pub source: PathBuf,
    /// Absolute start in seconds (the owning segment's start).
    pub start: f64,
    /// Measured clip length in seconds.
    pub clip_duration: f64,
    /// The clip is padded with silence up to this length (the segment's duration).
    pub pad_to: f64,
}

impl NarrationCue {
    pub fn end(&self) -> f64 {
        self.start + self.pad_to
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Audio mixing plan for a program: one optional bed plus per-segment narration.
pub struct AudioPlan {
    /// Program length; the mixed track is cut to exactly this.
    pub total_duration: f64,
    pub background: Option<BackgroundBed>,
    /// Cues in program order; they never overlap.
    pub cues: Vec<NarrationCue>,
}

impl AudioPlan {
    /// `true` when there is nothing to mix (the output carries no audio track).
    pub fn is_silent(&self) -> bool {
        self.background.is_none() && self.cues.is_empty()
    }

    /// Number of audio inputs the encoder has to open.
    pub fn input_count(&self) -> usize {
        self.cues.len() + usize::from(self.background.is_some())
    }
}

/// Schedule every segment's narration at its absolute start and add the music bed.
pub fn build_audio_plan(
    program: &Program,
    background: Option<&Path>,
    volume: f64,
) -> ReelResult<AudioPlan> {
    if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
        return Err(ReelError::validation(
            "background volume must be within [0, 1]",
        ));
    }
    let total_duration = program.duration();
    let cues = program
        .entries
        .iter()
        .filter_map(|entry| {
            entry.segment.narration.as_ref().map(|n| NarrationCue {
                source: n.source.clone(),
                start: entry.start,
                clip_duration: n.duration,
                pad_to: entry.segment.duration,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        cues = cues.len(),
        background = background.is_some(),
        total_duration,
        "built audio plan"
    );

    Ok(AudioPlan {
        total_duration,
        background: background.map(|source| BackgroundBed {
            source: source.to_path_buf(),
            volume,
            duration: total_duration,
        }),
        cues,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/media/mix.rs"]
mod tests;
