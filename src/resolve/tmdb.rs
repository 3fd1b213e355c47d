use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{ReelError, ReelResult},
    manifest::generate::{Credit, CreditSource},
    resolve::cache::{CachedHeadshots, HeadshotFetcher},
    resolve::http,
};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Thin TMDB client (bearer-token auth) shared by the headshot and credit lookups.
#[derive(Clone)]
pub struct TmdbClient {
    agent: ureq::Agent,
    token: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            agent: http::agent(),
            token: token.into(),
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_urls(mut self, api: impl Into<String>, images: impl Into<String>) -> Self {
        self.base_url = api.into();
        self.image_base_url = images.into();
        self
    }

    fn get(&self, what: &str, path: &str, query: &[(&str, &str)]) -> ReelResult<serde_json::Value> {
        let mut req = self
            .agent
            .get(&format!("{}{path}", self.base_url))
            .set("accept", "application/json")
            .set("Authorization", &format!("Bearer {}", self.token));
        for (k, v) in query {
            req = req.query(k, v);
        }
        let resp = req.call().map_err(|e| http::classify(what, e))?;
        http::read_json(what, resp)
    }

    /// Best match of a person search.
    pub fn search_person(&self, name: &str) -> ReelResult<serde_json::Value> {
        let body = self.get(
            "tmdb person search",
            "/search/person",
            &[("query", name), ("include_adult", "false"), ("language", "en-US"), ("page", "1")],
        )?;
        first_result(&body, name)
    }
}

fn first_result(body: &serde_json::Value, name: &str) -> ReelResult<serde_json::Value> {
    body.get("results")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .cloned()
        .ok_or_else(|| ReelError::not_found(format!("tmdb: actor not found: {name}")))
}

/// Headshot URL of a person search result.
pub fn profile_url(person: &serde_json::Value, image_base_url: &str, name: &str) -> ReelResult<String> {
    person
        .get("profile_path")
        .and_then(|p| p.as_str())
        .filter(|p| !p.is_empty())
        .map(|p| format!("{image_base_url}{p}"))
        .ok_or_else(|| ReelError::not_found(format!("tmdb: no headshot available for {name}")))
}

/// Cast credits of a `movie_credits` response (crew is ignored).
pub fn cast_credits(body: &serde_json::Value) -> ReelResult<Vec<Credit>> {
    match body.get("cast") {
        Some(cast) => Ok(serde_json::from_value(cast.clone())?),
        None => Ok(Vec::new()),
    }
}

/// Headshots from TMDB person profiles.
pub struct TmdbHeadshots {
    client: TmdbClient,
}

impl TmdbHeadshots {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }

    /// Wrap in the disk cache rooted at `cache_dir`.
    pub fn cached(self, cache_dir: impl Into<PathBuf>) -> CachedHeadshots<Self> {
        CachedHeadshots::new(cache_dir, self)
    }
}

impl HeadshotFetcher for TmdbHeadshots {
    fn fetch_headshot(&self, name: &str, dest: &Path) -> ReelResult<()> {
        tracing::info!(name, "looking up headshot");
        let person = self.client.search_person(name)?;
        let url = profile_url(&person, &self.client.image_base_url, name)?;
        http::download_to(&self.client.agent, &url, dest)
    }
}

/// Filmographies from TMDB (`/person/{id}/movie_credits`).
pub struct TmdbCredits {
    client: TmdbClient,
}

impl TmdbCredits {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

impl CreditSource for TmdbCredits {
    fn movie_credits(&self, actor: &str) -> ReelResult<Vec<Credit>> {
        let person = self.client.search_person(actor)?;
        let id = person
            .get("id")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| ReelError::not_found(format!("tmdb: no person id for {actor}")))?;
        let body = self.client.get(
            "tmdb movie credits",
            &format!("/person/{id}/movie_credits"),
            &[("language", "en-US")],
        )?;
        cast_credits(&body)
    }
}
