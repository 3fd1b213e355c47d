use std::path::PathBuf;

use super::*;
use crate::composition::card::{CardSpec, title_card};
use crate::composition::model::Narration;

fn card(text: &str, secs: f64, narration: Option<f64>) -> Segment {
    let mut spec = CardSpec::intro(text, Canvas::PORTRAIT_1080);
    spec.duration = secs;
    spec.label = text.to_string();
    title_card(&spec.with_narration(narration.map(|d| Narration {
        source: PathBuf::from(format!("{text}.mp3")),
        duration: d,
    })))
    .unwrap()
}

#[test]
fn starts_are_prefix_sums_of_durations() {
    let program = Program::assemble(
        Canvas::PORTRAIT_1080,
        Fps::default(),
        vec![
            card("a", 5.0, None),
            card("b", 3.0, Some(4.5)),
            card("c", 2.0, Some(1.0)),
        ],
    )
    .unwrap();
    let starts: Vec<f64> = program.entries.iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![0.0, 5.0, 9.5]);
    assert_eq!(program.duration(), 11.5);
}

#[test]
fn consecutive_entries_touch_without_overlap() {
    let program = ProgramBuilder::new(Canvas::PORTRAIT_1080, Fps::default())
        .push(card("a", 1.25, None))
        .extend(vec![card("b", 2.5, None), card("c", 0.75, Some(3.0))])
        .build()
        .unwrap();
    for pair in program.entries.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start);
    }
    let total: f64 = program.entries.iter().map(|e| e.segment.duration).sum();
    assert_eq!(program.duration(), total);
}

#[test]
fn entry_at_finds_half_open_ranges() {
    let program = Program::assemble(
        Canvas::PORTRAIT_1080,
        Fps::default(),
        vec![card("a", 5.0, None), card("b", 3.0, None)],
    )
    .unwrap();
    assert_eq!(program.entry_at(0.0).unwrap().segment.label, "a");
    assert_eq!(program.entry_at(4.999).unwrap().segment.label, "a");
    assert_eq!(program.entry_at(5.0).unwrap().segment.label, "b");
    assert!(program.entry_at(8.0).is_none());
}

#[test]
fn placed_elements_use_absolute_times() {
    let program = Program::assemble(
        Canvas::PORTRAIT_1080,
        Fps::default(),
        vec![card("a", 5.0, None), card("b", 3.0, None)],
    )
    .unwrap();
    let spans: Vec<(usize, f64, f64)> = program
        .placed_elements()
        .map(|p| (p.entry, p.start(), p.end()))
        .collect();
    assert_eq!(spans, vec![(0, 0.0, 5.0), (1, 5.0, 8.0)]);
}

#[test]
fn empty_program_is_rejected() {
    assert!(Program::assemble(Canvas::PORTRAIT_1080, Fps::default(), Vec::new()).is_err());
}

#[test]
fn plan_json_round_trips() {
    let program = Program::assemble(
        Canvas::PORTRAIT_1080,
        Fps::default(),
        vec![card("a", 5.0, None)],
    )
    .unwrap();
    let json = program.to_json_pretty().unwrap();
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}
