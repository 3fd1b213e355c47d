use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Fps, Rgb8},
    foundation::error::{ReelError, ReelResult},
    manifest::model::Manifest,
    media::mix::BACKGROUND_VOLUME,
    resolve::elevenlabs::DEFAULT_VOICE_ID,
    upload::b2::B2Credentials,
};

pub const ENV_OMDB_API_KEY: &str = "GTA_OMDB_API_KEY";
pub const ENV_TMDB_API_KEY: &str = "GTA_TMDB_API_KEY";
pub const ENV_ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const ENV_B2_KEY_ID: &str = "B2_APPLICATION_KEY_ID";
pub const ENV_B2_KEY: &str = "B2_APPLICATION_KEY";
pub const ENV_B2_BUCKET: &str = "B2_BUCKET_NAME";

/// Render job settings. Every field has a default, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Root of the poster/headshot/narration caches.
    pub cache_dir: PathBuf,
    /// Image used when a poster or headshot cannot be resolved.
    pub placeholder_image: PathBuf,
    /// Gain of the background music bed.
    pub background_volume: f64,
    pub text_color: Rgb8,
    pub font_file: Option<PathBuf>,
    pub overwrite: bool,
    /// Remove the local video once an upload has succeeded.
    pub delete_local_after_upload: bool,
    pub voice_id: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas::PORTRAIT_1080,
            fps: Fps::default(),
            cache_dir: PathBuf::from("cache"),
            placeholder_image: PathBuf::from("assets/placeholder.png"),
            background_volume: BACKGROUND_VOLUME,
            text_color: Rgb8::WHITE,
            font_file: None,
            overwrite: true,
            delete_local_after_upload: false,
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

impl RenderSettings {
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.background_volume.is_finite() || !(0.0..=1.0).contains(&self.background_volume) {
            return Err(ReelError::validation(
                "background_volume must be within [0, 1]",
            ));
        }
        if self.voice_id.trim().is_empty() {
            return Err(ReelError::validation("voice_id must be non-empty"));
        }
        Ok(())
    }
}

/// Credentials for the remote collaborators. Absent keys disable the matching service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub omdb: Option<String>,
    pub tmdb: Option<String>,
    pub elevenlabs: Option<String>,
    pub b2_key_id: Option<String>,
    pub b2_key: Option<String>,
    pub b2_bucket: Option<String>,
}

impl ApiKeys {
    /// Read every key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through `lookup`; empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            omdb: get(ENV_OMDB_API_KEY),
            tmdb: get(ENV_TMDB_API_KEY),
            elevenlabs: get(ENV_ELEVENLABS_API_KEY),
            b2_key_id: get(ENV_B2_KEY_ID),
            b2_key: get(ENV_B2_KEY),
            b2_bucket: get(ENV_B2_BUCKET),
        }
    }

    /// Keys given in the manifest take precedence over the environment.
    pub fn with_manifest_overrides(mut self, manifest: &Manifest) -> Self {
        let pick = |m: &Option<String>| m.clone().filter(|v| !v.trim().is_empty());
        if let Some(k) = pick(&manifest.omdb_api_key) {
            self.omdb = Some(k);
        }
        if let Some(k) = pick(&manifest.tmdb_api_key) {
            self.tmdb = Some(k);
        }
        self
    }

    /// Complete B2 credentials, if every part is present.
    pub fn b2(&self) -> Option<B2Credentials> {
        Some(B2Credentials {
            key_id: self.b2_key_id.clone()?,
            key: self.b2_key.clone()?,
            bucket: self.b2_bucket.clone()?,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
