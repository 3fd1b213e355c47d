use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::{
    foundation::error::{ReelError, ReelResult},
    media::mix::AudioPlan,
    timeline::program::Program,
};

/// Output options shared by every [`ProgramEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Font used for text overlays; the encoder default font when `None`.
    pub font_file: Option<PathBuf>,
}

impl EncodeConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.out_path.as_os_str().is_empty() {
            return Err(ReelError::validation("encode output path must be non-empty"));
        }
        if let Some(font) = &self.font_file
            && !font.is_file()
        {
            return Err(ReelError::validation(format!(
                "font file '{}' does not exist",
                font.display()
            )));
        }
        Ok(())
    }
}

pub fn default_mp4_config(out_path: impl Into<PathBuf>) -> EncodeConfig {
    EncodeConfig {
        out_path: out_path.into(),
        overwrite: true,
        font_file: None,
    }
}

/// Turns a finished program and its audio plan into a media file.
///
/// On failure no partial output may be left at `cfg.out_path`.
pub trait ProgramEncoder {
    fn encode(&self, program: &Program, audio: &AudioPlan, cfg: &EncodeConfig) -> ReelResult<()>;
}

/// One call captured by [`RecordingEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeCall {
    pub program: Program,
    pub audio: AudioPlan,
    pub out_path: PathBuf,
}

/// In-memory encoder for tests and dry runs: records every call and writes a
/// small placeholder file so downstream steps (upload, cleanup) have a file to see.
#[derive(Clone, Debug, Default)]
pub struct RecordingEncoder {
    calls: Arc<Mutex<Vec<EncodeCall>>>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured calls.
    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ProgramEncoder for RecordingEncoder {
    fn encode(&self, program: &Program, audio: &AudioPlan, cfg: &EncodeConfig) -> ReelResult<()> {
        cfg.validate()?;
        crate::encode::ffmpeg::ensure_parent_dir(&cfg.out_path)?;
        std::fs::write(&cfg.out_path, program.to_json_pretty()?).map_err(|e| {
            ReelError::encode(format!(
                "failed to write '{}': {e}",
                cfg.out_path.display()
            ))
        })?;
        self.calls
            .lock()
            .map_err(|_| ReelError::encode("recording encoder lock poisoned"))?
            .push(EncodeCall {
                program: program.clone(),
                audio: audio.clone(),
                out_path: cfg.out_path.clone(),
            });
        Ok(())
    }
}
