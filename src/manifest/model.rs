use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize as _;
use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::{
    foundation::error::{ReelError, ReelResult},
    layout::grid::GRID_CELLS,
};

/// Top-level key holding the explicit, ordered hint list.
pub const HINTS_KEY: &str = "hints";
/// Legacy hint detection: any top-level key containing this (case-insensitive).
pub const HINT_KEY_TOKEN: &str = "hint";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A movie shown as one poster of a hint.
pub struct MovieRef {
    /// Movie title (catalog query).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// IMDB page URL; the `tt…` id is used for lookups and cache keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_url: Option<String>,
    /// Local poster; skips resolution when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<PathBuf>,
    /// Release year, disambiguates remakes.
    #[serde(
        default,
        deserialize_with = "de_release_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<u16>,
}

impl MovieRef {
    /// Movie known only by title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        let has_title = self.title.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_imdb = self.imdb_url.as_deref().is_some_and(|u| !u.trim().is_empty());
        if !has_title && !has_imdb {
            return Err(ReelError::validation(
                "movie entry needs a 'title' or an 'imdb_url'",
            ));
        }
        if let Some(url) = &self.imdb_url
            && has_imdb
            && imdb_id_from_url(url).is_none()
        {
            return Err(ReelError::validation(format!(
                "imdb_url '{url}' does not contain a title id (tt…)"
            )));
        }
        Ok(())
    }

    /// IMDB title id (`tt0111161`) extracted from `imdb_url`.
    pub fn imdb_id(&self) -> Option<String> {
        self.imdb_url.as_deref().and_then(imdb_id_from_url)
    }

    /// Name used in logs and error messages.
    pub fn display_name(&self) -> String {
        match (&self.title, self.imdb_id()) {
            (Some(t), _) => t.clone(),
            (None, Some(id)) => id,
            (None, None) => "<unnamed movie>".to_string(),
        }
    }
}

/// Find the first `tt` followed by at least 7 digits.
pub fn imdb_id_from_url(url: &str) -> Option<String> {
    let bytes = url.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b't' && bytes[i + 1] == b't' {
            let digits = bytes[i + 2..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits >= 7 {
                return Some(url[i..i + 2 + digits].to_string());
            }
        }
        i += 1;
    }
    None
}

fn de_release_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u16),
        Text(String),
    }

    match Option::<Year>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Year::Number(y)) => Ok(Some(y)),
        Some(Year::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Year::Text(s)) => s
            .trim()
            .get(..4)
            .and_then(|y| y.parse::<u16>().ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid release_year '{s}'"))),
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One hint: a caption plus exactly three movies.
pub struct Hint {
    pub caption: String,
    pub movies: Vec<MovieRef>,
}

impl Hint {
    pub fn validate(&self, label: &str) -> ReelResult<()> {
        if self.caption.trim().is_empty() {
            return Err(ReelError::validation(format!(
                "{label}: caption must be non-empty"
            )));
        }
        if self.movies.len() != GRID_CELLS {
            return Err(ReelError::validation(format!(
                "{label}: expected exactly {GRID_CELLS} movies, found {}",
                self.movies.len()
            )));
        }
        for (i, movie) in self.movies.iter().enumerate() {
            movie
                .validate()
                .map_err(|e| ReelError::validation(format!("{label} movie {}: {e}", i + 1)))?;
        }
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct RawHint {
    caption: String,
    #[serde(default)]
    movies: Option<Vec<MovieRef>>,
    #[serde(default)]
    image_paths: Option<Vec<PathBuf>>,
}

impl RawHint {
    fn into_hint(self, label: &str) -> ReelResult<Hint> {
        let movies = match (self.movies, self.image_paths) {
            (Some(movies), None) => movies,
            (None, Some(paths)) => paths.into_iter().map(movie_from_path).collect(),
            (Some(_), Some(_)) => {
                return Err(ReelError::validation(format!(
                    "{label}: use either 'movies' or 'image_paths', not both"
                )));
            }
            (None, None) => {
                return Err(ReelError::validation(format!(
                    "{label}: missing 'movies'"
                )));
            }
        };
        Ok(Hint {
            caption: self.caption,
            movies,
        })
    }
}

fn movie_from_path(path: PathBuf) -> MovieRef {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| path.display().to_string());
    MovieRef {
        title: Some(title),
        poster_path: Some(path),
        ..MovieRef::default()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The actor being guessed.
pub struct Answer {
    /// Actor name; shown on the answer card and used as the headshot query.
    pub caption: String,
    /// Local headshot; skips resolution when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Declarative input of one render job.
///
/// Deserialization accepts two hint layouts: the tagged `"hints": [...]` array, or
/// the legacy layout where every top-level object whose key contains `"hint"`
/// (case-insensitive) is a hint, taken in document order.
pub struct Manifest {
    pub hints: Vec<Hint>,
    pub answer: Answer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_audio: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<PathBuf>,
    pub enable_voice_overs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_intro_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> ReelResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Interpret and validate a parsed JSON document.
    pub fn from_value(value: Value) -> ReelResult<Self> {
        let Value::Object(map) = value else {
            return Err(ReelError::validation("manifest must be a JSON object"));
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> ReelResult<Self> {
        let mut answer = None;
        let mut background_audio = None;
        let mut background_video = None;
        let mut enable_voice_overs = None;
        let mut intro_text = None;
        let mut answer_intro_text = None;
        let mut omdb_api_key = None;
        let mut tmdb_api_key = None;
        let mut hint_entries = Vec::<(String, Value)>::new();

        // Single pass in document order; the legacy hint order depends on it.
        for (key, value) in map {
            match key.as_str() {
                "answer" => answer = parse_opt::<Answer>(&key, value)?,
                "background_audio" => background_audio = parse_opt(&key, value)?,
                "background_video" => background_video = parse_opt(&key, value)?,
                "enable_voice_overs" => enable_voice_overs = parse_opt(&key, value)?,
                "intro_text" => intro_text = parse_opt(&key, value)?,
                "answer_intro_text" => answer_intro_text = parse_opt(&key, value)?,
                "omdb_api_key" => omdb_api_key = parse_opt(&key, value)?,
                "tmdb_api_key" => tmdb_api_key = parse_opt(&key, value)?,
                _ if key.to_lowercase().contains(HINT_KEY_TOKEN) => {
                    hint_entries.push((key.clone(), value));
                }
                _ => {}
            }
        }

        let answer = answer.ok_or_else(|| ReelError::validation("manifest is missing 'answer'"))?;
        let manifest = Self {
            hints: collect_hints(hint_entries)?,
            answer,
            background_audio,
            background_video,
            enable_voice_overs: enable_voice_overs.unwrap_or(false),
            intro_text,
            answer_intro_text,
            omdb_api_key,
            tmdb_api_key,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check every shape rule; all failures here are fatal to the job.
    pub fn validate(&self) -> ReelResult<()> {
        for (i, hint) in self.hints.iter().enumerate() {
            hint.validate(&hint_label(i))?;
        }
        if self.answer.caption.trim().is_empty() {
            return Err(ReelError::validation("answer caption must be non-empty"));
        }
        Ok(())
    }

    /// Pretty JSON in the tagged layout.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'de> serde::Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(map).map_err(D::Error::custom)
    }
}

/// Label of the `index`-th hint (`hint-1`, `hint-2`, ...).
pub fn hint_label(index: usize) -> String {
    format!("hint-{}", index + 1)
}

fn parse_opt<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> ReelResult<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ReelError::validation(format!("{key}: {e}")))
}

fn collect_hints(entries: Vec<(String, Value)>) -> ReelResult<Vec<Hint>> {
    let mut tagged: Option<Vec<Hint>> = None;
    let mut legacy = Vec::<Hint>::new();

    for (key, value) in entries {
        match value {
            Value::Array(items) if key == HINTS_KEY => {
                let mut hints = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let label = hint_label(i);
                    let raw: RawHint = serde_json::from_value(item)
                        .map_err(|e| ReelError::validation(format!("{label}: {e}")))?;
                    hints.push(raw.into_hint(&label)?);
                }
                tagged = Some(hints);
            }
            Value::Object(_) => {
                let raw: RawHint = serde_json::from_value(value)
                    .map_err(|e| ReelError::validation(format!("hint '{key}': {e}")))?;
                legacy.push(raw.into_hint(&format!("hint '{key}'"))?);
            }
            _ => {
                return Err(ReelError::validation(format!(
                    "hint '{key}' must be an object with 'caption' and 'movies'"
                )));
            }
        }
    }

    match tagged {
        Some(_) if !legacy.is_empty() => Err(ReelError::validation(
            "manifest mixes a 'hints' list with legacy hint keys",
        )),
        Some(hints) => Ok(hints),
        None => Ok(legacy),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
