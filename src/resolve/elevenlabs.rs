use std::path::PathBuf;

use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::Fnv1a64,
    resolve::NarrationSynthesizer,
    resolve::cache::normalize_key,
    resolve::http,
};

pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
/// Stock "Rachel" voice.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// Longest slug of the spoken text kept in cache file names.
const SLUG_CHARS: usize = 32;

/// Text-to-speech through ElevenLabs, memoized on disk at
/// `<cache>/narration/<slug>-<hash>.mp3` where the hash covers voice, model and text.
pub struct ElevenLabsNarrator {
    agent: ureq::Agent,
    api_key: String,
    voice_id: String,
    model_id: String,
    base_url: String,
    cache_dir: PathBuf,
}

impl ElevenLabsNarrator {
    pub fn new(api_key: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            agent: http::agent(),
            api_key: api_key.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: ELEVENLABS_BASE_URL.to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deterministic cache location of the clip for `text`.
    pub fn cache_path(&self, text: &str) -> PathBuf {
        let mut h = Fnv1a64::new_default();
        h.write_str(&self.voice_id);
        h.write_str(&self.model_id);
        h.write_str(text);
        let slug: String = normalize_key(text).chars().take(SLUG_CHARS).collect();
        let name = if slug.is_empty() {
            format!("{:016x}.mp3", h.finish())
        } else {
            format!("{slug}-{:016x}.mp3", h.finish())
        };
        self.cache_dir.join("narration").join(name)
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": { "stability": 0.5, "similarity_boost": 0.5 },
        })
    }
}

impl NarrationSynthesizer for ElevenLabsNarrator {
    fn synthesize(&self, text: &str) -> ReelResult<Option<PathBuf>> {
        // Captions use line breaks for layout; speak them as one sentence.
        let spoken = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if spoken.is_empty() {
            return Ok(None);
        }
        let path = self.cache_path(&spoken);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "narration cache hit");
            return Ok(Some(path));
        }

        let resp = self
            .agent
            .post(&format!("{}/text-to-speech/{}", self.base_url, self.voice_id))
            .set("Accept", "audio/mpeg")
            .set("Content-Type", "application/json")
            .set("xi-api-key", &self.api_key)
            .send_json(self.request_body(&spoken))
            .map_err(|e| http::classify("elevenlabs text-to-speech", e))?;
        let bytes = http::read_bytes("elevenlabs text-to-speech", resp)?;
        if bytes.first() == Some(&b'{') {
            return Err(ReelError::network(format!(
                "elevenlabs returned JSON instead of audio: {}",
                String::from_utf8_lossy(&bytes).trim()
            )));
        }
        http::write_atomic(&path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "synthesized narration");
        Ok(Some(path))
    }
}
