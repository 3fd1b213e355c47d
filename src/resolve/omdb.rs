use std::path::Path;

use crate::{
    foundation::error::{ReelError, ReelResult},
    manifest::model::MovieRef,
    resolve::cache::{CachedPosters, PosterFetcher},
    resolve::http,
};

pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Poster lookups against the OMDb API: by IMDB id (`?i=`) when the movie has
/// one, otherwise by title (`?t=`) and optional year (`&y=`).
pub struct OmdbPosters {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
}

impl OmdbPosters {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            agent: http::agent(),
            api_key: api_key.into(),
            base_url: OMDB_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Wrap in the disk cache rooted at `cache_dir`.
    pub fn cached(self, cache_dir: impl Into<std::path::PathBuf>) -> CachedPosters<Self> {
        CachedPosters::new(cache_dir, self)
    }

    fn lookup(&self, movie: &MovieRef) -> ReelResult<serde_json::Value> {
        let mut req = self.agent.get(&self.base_url).query("apikey", &self.api_key);
        if let Some(id) = movie.imdb_id() {
            req = req.query("i", &id);
        } else {
            let title = movie
                .title
                .as_deref()
                .ok_or_else(|| ReelError::validation("movie needs a title or an IMDB URL"))?;
            req = req.query("t", title);
            if let Some(year) = movie.release_year {
                req = req.query("y", &year.to_string());
            }
        }
        let resp = req.call().map_err(|e| http::classify("omdb lookup", e))?;
        http::read_json("omdb lookup", resp)
    }
}

/// Extract the poster URL from an OMDb response body.
pub fn poster_url(body: &serde_json::Value, movie: &str) -> ReelResult<String> {
    if body.get("Response").and_then(|v| v.as_str()) == Some("False") {
        let reason = body
            .get("Error")
            .and_then(|v| v.as_str())
            .unwrap_or("Movie not found!");
        return Err(ReelError::not_found(format!("omdb: {movie}: {reason}")));
    }
    match body.get("Poster").and_then(|v| v.as_str()) {
        Some(url) if !url.is_empty() && url != "N/A" => Ok(url.to_string()),
        _ => Err(ReelError::not_found(format!(
            "omdb: no poster available for {movie}"
        ))),
    }
}

impl PosterFetcher for OmdbPosters {
    fn fetch_poster(&self, movie: &MovieRef, dest: &Path) -> ReelResult<()> {
        let name = movie.display_name();
        tracing::info!(movie = %name, "looking up poster");
        let body = self.lookup(movie)?;
        let url = poster_url(&body, &name)?;
        http::download_to(&self.agent, &url, dest)
    }
}
