use super::*;
use crate::composition::card::{CardSpec, title_card};
use crate::composition::model::Narration;
use crate::composition::reveal::{RevealImage, RevealSpec, reveal_segment};
use crate::encode::sink::default_mp4_config;
use crate::foundation::core::Size;
use crate::media::mix::build_audio_plan;

fn program(background: Fill) -> Program {
    let intro = title_card(
        &CardSpec::intro("Guess who?", Canvas::PORTRAIT_1080).with_narration(Some(Narration {
            source: PathBuf::from("voice/intro.mp3"),
            duration: 6.0,
        })),
    )
    .unwrap();
    let reveal = reveal_segment(&RevealSpec {
        label: "hint-1".to_string(),
        caption: "Hardest\nLevel\nHints".to_string(),
        images: std::array::from_fn(|i| RevealImage {
            source: PathBuf::from(format!("posters/{i}.jpg")),
            intrinsic: Size::new(600.0, 900.0),
        }),
        canvas: Canvas::PORTRAIT_1080,
        text_color: Rgb8::WHITE,
        background,
        narration: None,
    })
    .unwrap();
    Program::assemble(Canvas::PORTRAIT_1080, Fps::default(), vec![intro, reveal]).unwrap()
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(default_mp4_config("").validate().is_err());
    let mut cfg = default_mp4_config("out/quiz.mp4");
    assert!(cfg.validate().is_ok());
    cfg.font_file = Some(PathBuf::from("definitely/missing/font.ttf"));
    assert!(cfg.validate().is_err());
}

#[test]
fn every_image_element_gets_its_own_still_input() {
    let program = program(Fill::Solid(Rgb8::BLACK));
    let audio = build_audio_plan(&program, None, 0.1).unwrap();
    let job = plan_job(&program, &audio, &default_mp4_config("out.mp4")).unwrap();
    let stills = job
        .inputs
        .iter()
        .filter(|i| matches!(i, InputSource::Still { .. }))
        .count();
    assert_eq!(stills, 9);
    assert_eq!(job.duration, 23.0);
    // intro narration only
    assert!(job.has_audio);
    assert_eq!(job.inputs.len(), 10);
}

#[test]
fn windows_use_absolute_program_time() {
    let program = program(Fill::Solid(Rgb8::BLACK));
    let audio = build_audio_plan(&program, None, 0.1).unwrap();
    let job = plan_job(&program, &audio, &default_mp4_config("out.mp4")).unwrap();
    let g = &job.filter_graph;
    // The reveal starts at 6 s (narrated intro); poster 1 goes fullscreen at 11 s.
    assert!(g.contains("enable='gte(t,11)*lt(t,12.5)'"));
    assert!(g.contains("setpts=PTS-STARTPTS+12.5/TB"));
    assert!(g.contains("eval=frame"));
    assert!(g.contains("drawtext=text=Hardest\nLevel\nHints"));
    assert!(g.contains("text_align=C"));
    assert!(g.ends_with("[aout]"));
    assert!(g.contains("[vout]"));
    assert!(g.contains("adelay=0:all=1"));
    assert!(g.contains("apad=whole_dur=6"));
}

#[test]
fn looped_background_video_is_cropped_to_frame() {
    let program = program(Fill::Loop {
        source: PathBuf::from("bg/loop.mp4"),
    });
    let audio = build_audio_plan(&program, None, 0.1).unwrap();
    let job = plan_job(&program, &audio, &default_mp4_config("out.mp4")).unwrap();
    assert!(job.inputs.contains(&InputSource::LoopVideo {
        path: PathBuf::from("bg/loop.mp4"),
        duration: 17.0,
    }));
    assert!(
        job.filter_graph
            .contains("force_original_aspect_ratio=increase,crop=1080:1920")
    );
}

#[test]
fn background_music_is_mixed_at_bed_volume() {
    let program = program(Fill::Solid(Rgb8::BLACK));
    let audio = build_audio_plan(&program, Some(Path::new("music.mp3")), 0.1).unwrap();
    let job = plan_job(&program, &audio, &default_mp4_config("out.mp4")).unwrap();
    assert!(job.filter_graph.contains("volume=0.1,atrim=end=23"));
    assert!(job.filter_graph.contains("amix=inputs=2"));
    assert!(job.inputs.contains(&InputSource::LoopAudio {
        path: PathBuf::from("music.mp3")
    }));
}

#[test]
fn silent_programs_drop_the_audio_track() {
    let program = Program::assemble(
        Canvas::PORTRAIT_1080,
        Fps::default(),
        vec![title_card(&CardSpec::intro("Hi", Canvas::PORTRAIT_1080)).unwrap()],
    )
    .unwrap();
    let audio = build_audio_plan(&program, None, 0.1).unwrap();
    let cfg = default_mp4_config("out/quiz.mp4");
    let job = plan_job(&program, &audio, &cfg).unwrap();
    assert!(!job.has_audio);
    let args: Vec<String> = job
        .args(&cfg)
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert!(args.contains(&"-an".to_string()));
    assert!(args.contains(&"+faststart".to_string()));
    assert_eq!(args.first().map(String::as_str), Some("-y"));
    assert_eq!(args.last().map(String::as_str), Some("out/quiz.mp4"));
}

#[test]
fn ensure_parent_dir_creates_missing_dirs() {
    let dir = std::env::temp_dir().join(format!("reelquiz_parent_{}", std::process::id()));
    let out = dir.join("nested/out.mp4");
    ensure_parent_dir(&out).unwrap();
    assert!(dir.join("nested").is_dir());
    ensure_parent_dir(Path::new("bare.mp4")).unwrap();
}
