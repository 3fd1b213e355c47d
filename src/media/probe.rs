use std::path::Path;

use crate::{
    foundation::core::Size,
    foundation::error::{ReelError, ReelResult},
};

/// Measures audio clip length (narration durations).
pub trait AudioProbe {
    fn duration_secs(&self, path: &Path) -> ReelResult<f64>;
}

/// Reads intrinsic image dimensions (posters, headshots).
pub trait ImageProbe {
    fn dimensions(&self, path: &Path) -> ReelResult<Size>;
}

/// [`AudioProbe`] backed by the system `ffprobe` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeAudio;

impl AudioProbe for FfprobeAudio {
    fn duration_secs(&self, path: &Path) -> ReelResult<f64> {
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            format: ProbeFormat,
        }

        if !path.exists() {
            return Err(ReelError::not_found(format!(
                "audio file '{}' does not exist",
                path.display()
            )));
        }
        let out = std::process::Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-print_format",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| ReelError::not_found(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(ReelError::not_found(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)?;
        parse_duration(parsed.format.duration.as_deref()).ok_or_else(|| {
            ReelError::not_found(format!("no duration reported for '{}'", path.display()))
        })
    }
}

fn parse_duration(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// [`ImageProbe`] that reads image headers with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateProbe;

impl ImageProbe for ImageCrateProbe {
    fn dimensions(&self, path: &Path) -> ReelResult<Size> {
        let (w, h) = image::image_dimensions(path).map_err(|e| {
            ReelError::not_found(format!("unreadable image '{}': {e}", path.display()))
        })?;
        if w == 0 || h == 0 {
            return Err(ReelError::not_found(format!(
                "image '{}' is empty",
                path.display()
            )));
        }
        Ok(Size::new(f64::from(w), f64::from(h)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
