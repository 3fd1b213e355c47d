use std::path::PathBuf;

use crate::{
    composition::dsl::{SegmentBuilder, caption},
    composition::model::{Fill, Motion, Narration, Segment, SegmentKind},
    foundation::core::{Canvas, Rgb8, Size},
    foundation::error::{ReelError, ReelResult},
    layout::grid::contain_fit,
};

pub const INTRO_SECS: f64 = 5.0;
pub const ANSWER_INTRO_SECS: f64 = 3.0;
pub const ANSWER_SECS: f64 = 5.0;

pub const HEADLINE_FONT_PX: f32 = 140.0;
pub const ANSWER_FONT_PX: f32 = 70.0;
/// The answer name sits above the centred headshot.
pub const ANSWER_TEXT_OFFSET_Y: f64 = -500.0;

pub const DEFAULT_INTRO_TEXT: &str = "Can you\nguess this\nactor from\nonly their\nfilms?";
pub const DEFAULT_ANSWER_INTRO_TEXT: &str = "The answer is ...";

/// Inputs of a text card.
#[derive(Clone, Debug)]
pub struct CardSpec {
    pub label: String,
    pub kind: SegmentKind,
    pub text: String,
    pub canvas: Canvas,
    /// Nominal visual length in seconds.
    pub duration: f64,
    pub font_size: f32,
    pub text_color: Rgb8,
    pub text_offset_y: f64,
    pub background: Fill,
    pub narration: Option<Narration>,
}

impl CardSpec {
    fn headline(
        label: &str,
        kind: SegmentKind,
        text: impl Into<String>,
        canvas: Canvas,
        duration: f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            kind,
            text: text.into(),
            canvas,
            duration,
            font_size: HEADLINE_FONT_PX,
            text_color: Rgb8::WHITE,
            text_offset_y: 0.0,
            background: Fill::Solid(Rgb8::BLACK),
            narration: None,
        }
    }

    /// Opening question card.
    pub fn intro(text: impl Into<String>, canvas: Canvas) -> Self {
        Self::headline("intro", SegmentKind::Intro, text, canvas, INTRO_SECS)
    }

    /// "The answer is ..." transition card.
    pub fn answer_intro(text: impl Into<String>, canvas: Canvas) -> Self {
        Self::headline(
            "answer-intro",
            SegmentKind::AnswerIntro,
            text,
            canvas,
            ANSWER_INTRO_SECS,
        )
    }

    /// Closing card carrying the actor name.
    pub fn answer(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            font_size: ANSWER_FONT_PX,
            text_offset_y: ANSWER_TEXT_OFFSET_Y,
            ..Self::headline("answer", SegmentKind::Answer, name, canvas, ANSWER_SECS)
        }
    }

    pub fn with_background(mut self, background: Fill) -> Self {
        self.background = background;
        self
    }

    pub fn with_narration(mut self, narration: Option<Narration>) -> Self {
        self.narration = narration;
        self
    }

    fn builder(&self) -> ReelResult<SegmentBuilder> {
        if self.text.trim().is_empty() {
            return Err(ReelError::validation(format!(
                "card '{}' text must be non-empty",
                self.label
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::validation(format!(
                "card '{}' font size must be finite and > 0",
                self.label
            )));
        }
        self.canvas.validate()?;

        let b = SegmentBuilder::new(self.label.clone(), self.kind, self.duration)
            .background(self.background.clone())
            .narration(self.narration.clone());
        let len = b.duration();
        Ok(b.phase("card", 0.0, self.duration).text(
            "text",
            0.0,
            len,
            caption(
                self.text.clone(),
                self.font_size,
                self.text_color,
                self.text_offset_y,
            ),
        ))
    }
}

/// Effective length of a segment with nominal visual length `nominal`.
///
/// A narration longer than `nominal` stretches the segment; a shorter one is
/// padded with silence. The clip itself is never cut.
pub fn negotiate(nominal: f64, narration: Option<&Narration>) -> f64 {
    narration.map_or(nominal, |n| n.negotiate(nominal))
}

/// Actor headshot shown on the answer card.
#[derive(Clone, Debug, PartialEq)]
pub struct Headshot {
    pub source: PathBuf,
    /// Unscaled image size in pixels.
    pub intrinsic: Size,
}

/// Build a text card: background plus text spanning the whole (possibly narrated) segment.
pub fn title_card(spec: &CardSpec) -> ReelResult<Segment> {
    spec.builder()?.build()
}

/// Build the answer card: a title card with a centred headshot drawn over it.
pub fn answer_card(spec: &CardSpec, headshot: &Headshot) -> ReelResult<Segment> {
    let b = spec.builder()?;
    let len = b.duration();
    let placement = contain_fit(headshot.intrinsic, spec.canvas);
    b.image(
        "headshot",
        0.0,
        len,
        headshot.source.clone(),
        headshot.intrinsic,
        Motion::Fixed(placement),
    )
    .build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/card.rs"]
mod tests;
