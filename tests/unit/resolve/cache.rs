use std::cell::Cell;

use super::*;

struct CountingFetcher {
    calls: Cell<usize>,
    fail: bool,
}

impl CountingFetcher {
    fn new(fail: bool) -> Self {
        Self {
            calls: Cell::new(0),
            fail,
        }
    }
}

impl PosterFetcher for CountingFetcher {
    fn fetch_poster(&self, _movie: &MovieRef, dest: &Path) -> ReelResult<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ReelError::not_found("no such movie"));
        }
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(dest, b"jpeg").unwrap();
        Ok(())
    }
}

impl HeadshotFetcher for CountingFetcher {
    fn fetch_headshot(&self, _name: &str, dest: &Path) -> ReelResult<()> {
        self.calls.set(self.calls.get() + 1);
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(dest, b"jpeg").unwrap();
        Ok(())
    }
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "reelquiz_cache_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn keys_are_normalized() {
    assert_eq!(normalize_key("  The Dark Knight: Rises! "), "the_dark_knight_rises");
    assert_eq!(normalize_key("Amélie"), "am_lie");
    assert_eq!(normalize_key("***"), "");
}

#[test]
fn poster_key_prefers_imdb_id_then_title_and_year() {
    let mut movie = MovieRef::titled("Forrest Gump");
    assert_eq!(poster_key(&movie).unwrap(), "forrest_gump");
    movie.release_year = Some(1994);
    assert_eq!(poster_key(&movie).unwrap(), "forrest_gump_1994");
    movie.imdb_url = Some("https://www.imdb.com/title/tt0109830/".to_string());
    assert_eq!(poster_key(&movie).unwrap(), "tt0109830");
}

#[test]
fn resolving_twice_fetches_once() {
    let root = scratch("twice");
    let posters = CachedPosters::new(&root, CountingFetcher::new(false));
    let movie = MovieRef::titled("Cast Away");
    let first = posters.resolve(&movie).unwrap();
    let second = posters.resolve(&movie).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, root.join("posters").join("cast_away.jpg"));
    assert_eq!(posters.fetcher.calls.get(), 1);
}

#[test]
fn fetch_failure_is_propagated_and_not_cached() {
    let root = scratch("fail");
    let posters = CachedPosters::new(&root, CountingFetcher::new(true));
    let movie = MovieRef::titled("Unknown Film");
    assert!(posters.resolve(&movie).unwrap_err().is_recoverable());
    assert!(posters.resolve(&movie).is_err());
    assert_eq!(posters.fetcher.calls.get(), 2);
}

#[test]
fn headshots_are_cached_by_name() {
    let root = scratch("headshots");
    let headshots = CachedHeadshots::new(&root, CountingFetcher::new(false));
    let a = headshots.resolve("Tom Hanks").unwrap();
    let b = headshots.resolve("tom  hanks").unwrap();
    assert_eq!(a, b);
    assert_eq!(headshots.fetcher.calls.get(), 1);
    assert!(headshots.resolve("!!!").is_err());
}
