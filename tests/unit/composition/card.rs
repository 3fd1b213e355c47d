use super::*;
use crate::composition::model::ElementKind;
use crate::foundation::core::Point;

fn narration(secs: f64) -> Option<Narration> {
    Some(Narration {
        source: PathBuf::from("cache/narration/intro.mp3"),
        duration: secs,
    })
}

#[test]
fn intro_card_defaults() {
    let seg = title_card(&CardSpec::intro(DEFAULT_INTRO_TEXT, Canvas::PORTRAIT_1080)).unwrap();
    assert_eq!(seg.kind, SegmentKind::Intro);
    assert_eq!(seg.duration, INTRO_SECS);
    assert_eq!(seg.nominal_duration, INTRO_SECS);
    assert_eq!(seg.background, Fill::Solid(Rgb8::BLACK));
    assert_eq!(seg.elements.len(), 1);
    let ElementKind::Text(text) = &seg.elements[0].kind else {
        panic!("expected text element");
    };
    assert_eq!(text.font_size, HEADLINE_FONT_PX);
    assert_eq!(text.color, Rgb8::WHITE);
    assert_eq!(text.offset_y, 0.0);
    assert_eq!(seg.elements[0].duration, INTRO_SECS);
}

#[test]
fn longer_narration_extends_card_and_text() {
    let spec = CardSpec::answer_intro(DEFAULT_ANSWER_INTRO_TEXT, Canvas::PORTRAIT_1080)
        .with_narration(narration(4.25));
    let seg = title_card(&spec).unwrap();
    assert_eq!(seg.nominal_duration, ANSWER_INTRO_SECS);
    assert_eq!(seg.duration, 4.25);
    assert_eq!(seg.elements[0].end(), 4.25);
}

#[test]
fn shorter_narration_keeps_nominal_length() {
    let spec =
        CardSpec::intro("Who is it?", Canvas::PORTRAIT_1080).with_narration(narration(1.2));
    let seg = title_card(&spec).unwrap();
    assert_eq!(seg.duration, INTRO_SECS);
    assert_eq!(seg.narration.as_ref().map(|n| n.duration), Some(1.2));
}

#[test]
fn looping_background_is_carried() {
    let bg = Fill::Loop {
        source: PathBuf::from("assets/bg.mp4"),
    };
    let seg = title_card(
        &CardSpec::intro("Who is it?", Canvas::PORTRAIT_1080).with_background(bg.clone()),
    )
    .unwrap();
    assert_eq!(seg.background, bg);
}

#[test]
fn answer_card_offsets_text_and_centres_headshot() {
    let headshot = Headshot {
        source: PathBuf::from("cache/headshots/tom_hanks.jpg"),
        intrinsic: Size::new(400.0, 600.0),
    };
    let seg = answer_card(&CardSpec::answer("Tom Hanks", Canvas::PORTRAIT_1080), &headshot)
        .unwrap();
    assert_eq!(seg.kind, SegmentKind::Answer);
    assert_eq!(seg.duration, ANSWER_SECS);
    assert_eq!(seg.elements.len(), 2);

    let ElementKind::Text(text) = &seg.elements[0].kind else {
        panic!("expected text first");
    };
    assert_eq!(text.offset_y, ANSWER_TEXT_OFFSET_Y);
    assert_eq!(text.font_size, ANSWER_FONT_PX);

    let placed = seg.elements[1].placement_at(2.0).unwrap();
    assert_eq!(placed.origin, Point::new(340.0, 660.0));
    assert_eq!(placed.size, Size::new(400.0, 600.0));
}

#[test]
fn empty_text_is_rejected() {
    assert!(title_card(&CardSpec::intro("   ", Canvas::PORTRAIT_1080)).is_err());
}

#[test]
fn negotiate_takes_the_longer_of_nominal_and_narration() {
    assert_eq!(negotiate(5.0, None), 5.0);
    assert_eq!(negotiate(5.0, narration(3.2).as_ref()), 5.0);
    assert_eq!(negotiate(5.0, narration(8.4).as_ref()), 8.4);
}
