use super::*;

fn movies_json(prefix: &str) -> Value {
    serde_json::json!([
        { "title": format!("{prefix} One"), "release_year": 1994 },
        { "title": format!("{prefix} Two"), "release_year": "2001" },
        { "imdb_url": "https://www.imdb.com/title/tt0109830/" }
    ])
}

#[test]
fn tagged_manifest_keeps_list_order() {
    let value = serde_json::json!({
        "hints": [
            { "caption": "Hard", "movies": movies_json("A") },
            { "caption": "Easy", "movies": movies_json("B") }
        ],
        "answer": { "caption": "Tom Hanks" },
        "background_audio": "assets/music.mp3",
        "enable_voice_overs": true
    });
    let m = Manifest::from_value(value).unwrap();
    assert_eq!(m.hints.len(), 2);
    assert_eq!(m.hints[0].caption, "Hard");
    assert_eq!(m.hints[1].caption, "Easy");
    assert_eq!(m.hints[0].movies[1].release_year, Some(2001));
    assert_eq!(m.hints[0].movies[2].imdb_id().as_deref(), Some("tt0109830"));
    assert!(m.enable_voice_overs);
    assert_eq!(m.background_audio, Some(PathBuf::from("assets/music.mp3")));
    assert_eq!(m.background_video, None);
}

#[test]
fn legacy_hint_keys_follow_document_order() {
    let raw = r#"{
        "zeta_hint": { "caption": "First", "image_paths": ["a/one.jpg", "a/two.jpg", "a/three.jpg"] },
        "background_audio": "music.mp3",
        "Hint_Alpha": { "caption": "Second", "movies": [
            { "title": "X" }, { "title": "Y" }, { "title": "Z" }
        ] },
        "notes": "ignored metadata",
        "answer": { "caption": "Meryl Streep", "image_path": "meryl.jpg" }
    }"#;
    let m = Manifest::from_json_str(raw).unwrap();
    let captions: Vec<&str> = m.hints.iter().map(|h| h.caption.as_str()).collect();
    assert_eq!(captions, vec!["First", "Second"]);
    assert_eq!(m.hints[0].movies[0].title.as_deref(), Some("one"));
    assert_eq!(
        m.hints[0].movies[0].poster_path,
        Some(PathBuf::from("a/one.jpg"))
    );
    assert!(!m.enable_voice_overs);
    assert_eq!(m.answer.image_path, Some(PathBuf::from("meryl.jpg")));
}

#[test]
fn wrong_movie_count_is_fatal() {
    let value = serde_json::json!({
        "hints": [ { "caption": "Hard", "movies": [ { "title": "Only" }, { "title": "Two" } ] } ],
        "answer": { "caption": "Tom Hanks" }
    });
    let err = Manifest::from_value(value).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("exactly 3 movies"));
}

#[test]
fn movie_without_title_or_imdb_is_rejected() {
    let value = serde_json::json!({
        "hints": [ { "caption": "Hard", "movies": [
            { "poster_path": "p.jpg" }, { "title": "B" }, { "title": "C" }
        ] } ],
        "answer": { "caption": "Tom Hanks" }
    });
    assert!(Manifest::from_value(value).is_err());
}

#[test]
fn missing_answer_is_rejected() {
    let value = serde_json::json!({
        "hints": [ { "caption": "Hard", "movies": movies_json("A") } ]
    });
    let err = Manifest::from_value(value).unwrap_err();
    assert!(err.to_string().contains("answer"));
}

#[test]
fn mixing_layouts_is_rejected() {
    let value = serde_json::json!({
        "hints": [ { "caption": "Hard", "movies": movies_json("A") } ],
        "hint3": { "caption": "Legacy", "movies": movies_json("B") },
        "answer": { "caption": "Tom Hanks" }
    });
    assert!(Manifest::from_value(value).is_err());
}

#[test]
fn non_object_hint_entry_is_rejected() {
    let value = serde_json::json!({
        "hint1": "three movies please",
        "answer": { "caption": "Tom Hanks" }
    });
    assert!(Manifest::from_value(value).is_err());
}

#[test]
fn manifest_without_hints_is_accepted() {
    let value = serde_json::json!({ "answer": { "caption": "Tom Hanks" } });
    let m = Manifest::from_value(value).unwrap();
    assert!(m.hints.is_empty());
    let tagged = serde_json::json!({ "hints": [], "answer": { "caption": "Tom Hanks" } });
    assert!(Manifest::from_value(tagged).unwrap().hints.is_empty());
}

#[test]
fn imdb_ids_are_extracted() {
    assert_eq!(
        imdb_id_from_url("https://www.imdb.com/title/tt0111161/?ref_=nv").as_deref(),
        Some("tt0111161")
    );
    assert_eq!(imdb_id_from_url("https://example.com/tt12"), None);
    let bad = MovieRef {
        imdb_url: Some("https://example.com/movie".to_string()),
        ..MovieRef::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn serde_round_trip_uses_tagged_layout() {
    let value = serde_json::json!({
        "hint_1": { "caption": "Hard", "movies": movies_json("A") },
        "answer": { "caption": "Tom Hanks" }
    });
    let m = Manifest::from_value(value).unwrap();
    let json = m.to_json_pretty().unwrap();
    assert!(json.contains("\"hints\""));
    let back: Manifest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
