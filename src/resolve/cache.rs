use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{ReelError, ReelResult},
    manifest::model::MovieRef,
    resolve::{HeadshotResolver, PosterResolver},
};

/// Lowercase ASCII alphanumerics; every other run collapses to one `_`; trimmed.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// Deterministic cache key for a movie poster: the IMDB id when known, else the
/// normalized title with `_<year>` appended when a year is given.
pub fn poster_key(movie: &MovieRef) -> ReelResult<String> {
    if let Some(id) = movie.imdb_id() {
        return Ok(id);
    }
    let title = movie
        .title
        .as_deref()
        .map(normalize_key)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ReelError::not_found(format!(
                "movie '{}' has no usable cache key",
                movie.display_name()
            ))
        })?;
    Ok(match movie.release_year {
        Some(year) => format!("{title}_{year}"),
        None => title,
    })
}

/// Something that can download a poster to a given path.
pub trait PosterFetcher {
    fn fetch_poster(&self, movie: &MovieRef, dest: &Path) -> ReelResult<()>;
}

/// Something that can download a person's headshot to a given path.
pub trait HeadshotFetcher {
    fn fetch_headshot(&self, name: &str, dest: &Path) -> ReelResult<()>;
}

/// Disk memoization in front of a [`PosterFetcher`].
///
/// Files live at `<root>/posters/<key>.jpg`. An existing file short-circuits the
/// fetch, so resolving the same movie twice costs one network round trip.
pub struct CachedPosters<F> {
    root: PathBuf,
    fetcher: F,
}

impl<F: PosterFetcher> CachedPosters<F> {
    pub fn new(root: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    pub fn path_for(&self, movie: &MovieRef) -> ReelResult<PathBuf> {
        Ok(self.root.join("posters").join(format!("{}.jpg", poster_key(movie)?)))
    }
}

impl<F: PosterFetcher> PosterResolver for CachedPosters<F> {
    fn resolve(&self, movie: &MovieRef) -> ReelResult<PathBuf> {
        let path = self.path_for(movie)?;
        cached_or_fetch(&path, || self.fetcher.fetch_poster(movie, &path))
    }
}

/// Disk memoization in front of a [`HeadshotFetcher`], at `<root>/headshots/<key>.jpg`.
pub struct CachedHeadshots<F> {
    root: PathBuf,
    fetcher: F,
}

impl<F: HeadshotFetcher> CachedHeadshots<F> {
    pub fn new(root: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            root: root.into(),
            fetcher,
        }
    }

    pub fn path_for(&self, name: &str) -> ReelResult<PathBuf> {
        let key = normalize_key(name);
        if key.is_empty() {
            return Err(ReelError::not_found(format!(
                "person name '{name}' has no usable cache key"
            )));
        }
        Ok(self.root.join("headshots").join(format!("{key}.jpg")))
    }
}

impl<F: HeadshotFetcher> HeadshotResolver for CachedHeadshots<F> {
    fn resolve(&self, name: &str) -> ReelResult<PathBuf> {
        let path = self.path_for(name)?;
        cached_or_fetch(&path, || self.fetcher.fetch_headshot(name, &path))
    }
}

fn cached_or_fetch(path: &Path, fetch: impl FnOnce() -> ReelResult<()>) -> ReelResult<PathBuf> {
    if path.is_file() {
        tracing::debug!(path = %path.display(), "asset cache hit");
        return Ok(path.to_path_buf());
    }
    fetch()?;
    if !path.is_file() {
        return Err(ReelError::not_found(format!(
            "fetcher reported success but '{}' is missing",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), "asset cached");
    Ok(path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/cache.rs"]
mod tests;
