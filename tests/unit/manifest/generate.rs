use super::*;

fn credit(title: &str, popularity: f64, order: u32, date: &str) -> Credit {
    Credit {
        title: Some(title.to_string()),
        popularity: Some(popularity),
        order: Some(order),
        release_date: Some(date.to_string()),
        ..Credit::default()
    }
}

fn ranked(n: usize) -> Vec<RankedMovie> {
    (0..n)
        .map(|i| RankedMovie {
            title: format!("Movie {}", i + 1),
            release_year: Some(2000 + i as u16),
            popularity: 100.0 - i as f64,
            cast_order: 0,
            score: 100.0 - i as f64,
        })
        .collect()
}

#[test]
fn score_blends_popularity_and_billing() {
    assert_eq!(score(50.0, 0), 0.8 * 50.0 + 20.0);
    assert_eq!(score(50.0, 25), 0.8 * 50.0 + 10.0);
    assert_eq!(score(50.0, 80), 40.0);
}

#[test]
fn ranking_filters_and_sorts_descending() {
    let credits = vec![
        credit("Low", 5.0, 10, "1990-01-01"),
        credit("High", 90.0, 0, "2001-05-02"),
        Credit {
            order: None,
            ..credit("No Order", 99.0, 0, "")
        },
        credit("Zero Pop", 0.0, 0, "2010-01-01"),
        credit("Mid", 40.0, 3, ""),
    ];
    let ranked = rank_credits(&credits, 9);
    let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["High", "Mid", "Low"]);
    assert_eq!(ranked[0].release_year, Some(2001));
    assert_eq!(ranked[1].release_year, None);
}

#[test]
fn ranking_keeps_source_order_on_ties_and_truncates() {
    let credits = vec![
        credit("A", 10.0, 1, ""),
        credit("B", 10.0, 1, ""),
        credit("C", 10.0, 1, ""),
    ];
    let ranked = rank_credits(&credits, 2);
    let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}

#[test]
fn hardest_hint_gets_least_known_movies() {
    let m = manifest_for_actor("Tom Hanks", &ranked(12), DEFAULT_HINT_CAPTIONS).unwrap();
    assert_eq!(m.hints.len(), 3);
    assert_eq!(m.hints[0].caption, "Hardest\nLevel\nHints");
    let first: Vec<&str> = m.hints[0]
        .movies
        .iter()
        .map(|mv| mv.title.as_deref().unwrap())
        .collect();
    assert_eq!(first, vec!["Movie 7", "Movie 8", "Movie 9"]);
    let last: Vec<&str> = m.hints[2]
        .movies
        .iter()
        .map(|mv| mv.title.as_deref().unwrap())
        .collect();
    assert_eq!(last, vec!["Movie 1", "Movie 2", "Movie 3"]);
    assert_eq!(m.hints[2].movies[0].release_year, Some(2000));
    assert_eq!(m.answer.caption, "Tom Hanks");
    assert!(!m.enable_voice_overs);
}

#[test]
fn fewer_than_nine_movies_is_rejected() {
    let err = manifest_for_actor("Tom Hanks", &ranked(8), DEFAULT_HINT_CAPTIONS).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

struct FixedCredits(Vec<Credit>);

impl CreditSource for FixedCredits {
    fn movie_credits(&self, _actor: &str) -> ReelResult<Vec<Credit>> {
        Ok(self.0.clone())
    }
}

#[test]
fn generated_manifest_round_trips_through_json() {
    let credits = (0..10)
        .map(|i| credit(&format!("Film {i}"), 10.0 + f64::from(i), 0, "1999-01-01"))
        .collect();
    let m = generate_manifest(&FixedCredits(credits), "Meryl Streep").unwrap();
    let back = Manifest::from_json_str(&m.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, m);
    // Film 9 is the most popular, so it lands in the easiest hint.
    assert_eq!(back.hints[2].movies[0].title.as_deref(), Some("Film 9"));
}
