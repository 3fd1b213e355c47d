use serde::Deserialize;

use crate::{
    foundation::error::{ReelError, ReelResult},
    layout::grid::GRID_CELLS,
    manifest::model::{Answer, Hint, Manifest, MovieRef},
};

/// Movies needed for a full quiz: three hints of three posters.
pub const QUIZ_MOVIES: usize = GRID_CELLS * GRID_CELLS;
/// Cast orders at or beyond this contribute nothing to the score.
pub const MAX_CAST_ORDER: f64 = 50.0;
const POPULARITY_WEIGHT: f64 = 0.8;
const ORDER_WEIGHT: f64 = 0.2;

pub const DEFAULT_HINT_CAPTIONS: [&str; GRID_CELLS] = [
    "Hardest\nLevel\nHints",
    "Medium\nLevel\nHints",
    "Easiest\nLevel\nHints",
];

/// One cast credit as reported by a filmography source.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Credit {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    /// `YYYY-MM-DD`, possibly empty.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Billing position (0 = top billed).
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub character: Option<String>,
}

/// A credit that survived filtering, with its combined score.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RankedMovie {
    pub title: String,
    pub release_year: Option<u16>,
    pub popularity: f64,
    pub cast_order: u32,
    pub score: f64,
}

impl RankedMovie {
    fn to_movie_ref(&self) -> MovieRef {
        MovieRef {
            release_year: self.release_year,
            ..MovieRef::titled(self.title.clone())
        }
    }
}

/// Source of an actor's movie credits.
pub trait CreditSource {
    fn movie_credits(&self, actor: &str) -> ReelResult<Vec<Credit>>;
}

/// `0.8 × popularity + 0.2 × max(0, 1 − order/50) × 100`.
pub fn score(popularity: f64, order: u32) -> f64 {
    let order_score = (1.0 - f64::from(order) / MAX_CAST_ORDER).max(0.0);
    POPULARITY_WEIGHT * popularity + ORDER_WEIGHT * order_score * 100.0
}

fn release_year(date: Option<&str>) -> Option<u16> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

/// Keep credits with a title, a non-zero popularity and a cast order; sort by
/// score, best first (ties keep source order); keep at most `limit`.
pub fn rank_credits(credits: &[Credit], limit: usize) -> Vec<RankedMovie> {
    let mut ranked: Vec<RankedMovie> = credits
        .iter()
        .filter_map(|c| {
            let popularity = c.popularity.filter(|p| p.is_finite() && *p > 0.0)?;
            let order = c.order?;
            let title = c.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
            Some(RankedMovie {
                title: title.to_string(),
                release_year: release_year(c.release_date.as_deref()),
                popularity,
                cast_order: order,
                score: score(popularity, order),
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Build a quiz manifest for `actor` from its nine best-ranked movies.
///
/// The first hint gets the least known titles (ranks 7-9) and the last hint the
/// best known (ranks 1-3), so the quiz gets easier as it goes.
pub fn manifest_for_actor(
    actor: &str,
    ranked: &[RankedMovie],
    captions: [&str; GRID_CELLS],
) -> ReelResult<Manifest> {
    if actor.trim().is_empty() {
        return Err(ReelError::validation("actor name must be non-empty"));
    }
    if ranked.len() < QUIZ_MOVIES {
        return Err(ReelError::validation(format!(
            "need at least {QUIZ_MOVIES} ranked movies for '{actor}', found {}",
            ranked.len()
        )));
    }
    let hints = ranked[..QUIZ_MOVIES]
        .chunks(GRID_CELLS)
        .rev()
        .zip(captions)
        .map(|(group, caption)| Hint {
            caption: caption.to_string(),
            movies: group.iter().map(RankedMovie::to_movie_ref).collect(),
        })
        .collect();
    let manifest = Manifest {
        hints,
        answer: Answer {
            caption: actor.trim().to_string(),
            image_path: None,
        },
        background_audio: None,
        background_video: None,
        enable_voice_overs: false,
        intro_text: None,
        answer_intro_text: None,
        omdb_api_key: None,
        tmdb_api_key: None,
    };
    manifest.validate()?;
    Ok(manifest)
}

/// Fetch, rank and group an actor's filmography into a manifest.
#[tracing::instrument(skip(source))]
pub fn generate_manifest(source: &dyn CreditSource, actor: &str) -> ReelResult<Manifest> {
    let credits = source.movie_credits(actor)?;
    let ranked = rank_credits(&credits, QUIZ_MOVIES);
    tracing::info!(
        credits = credits.len(),
        ranked = ranked.len(),
        "ranked filmography"
    );
    manifest_for_actor(actor, &ranked, DEFAULT_HINT_CAPTIONS)
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/generate.rs"]
mod tests;
