use std::path::PathBuf;

use crate::{
    animation::rect::RectAnim,
    foundation::core::{Placement, Rgb8, Size},
    foundation::error::{ReelError, ReelResult},
};

/// Slack allowed when checking that element spans stay inside their segment.
const SPAN_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Role of a segment in the program.
pub enum SegmentKind {
    /// Opening question card.
    Intro,
    /// Three-poster hint reveal.
    Reveal,
    /// "The answer is ..." transition card.
    AnswerIntro,
    /// Closing card with the actor name and headshot.
    Answer,
    /// Free-standing title card.
    Card,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Full-frame background behind every element of a segment.
pub enum Fill {
    /// Flat color.
    Solid(Rgb8),
    /// Video looped (or truncated) to the segment duration and scaled to cover the frame.
    Loop {
        /// Video file path.
        source: PathBuf,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Voice-over clip attached to a segment.
pub struct Narration {
    /// Audio file path.
    pub source: PathBuf,
    /// Measured clip length in seconds.
    pub duration: f64,
}

impl Narration {
    /// Effective length of a segment with nominal visual length `nominal` narrated by `self`.
    ///
    /// A longer clip extends the segment; a shorter clip is padded. The clip itself is
    /// never cut.
    pub fn negotiate(&self, nominal: f64) -> f64 {
        nominal.max(self.duration)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text drawn horizontally centred.
pub struct TextOverlay {
    /// UTF-8 text; `\n` separates lines.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color.
    pub color: Rgb8,
    /// Vertical offset of the text block from the frame centre, in pixels (negative is up).
    pub offset_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Where an image sits while it is visible.
pub enum Motion {
    /// Static placement.
    Fixed(Placement),
    /// Placement animated from the element start.
    Animated(RectAnim),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Raster image drawn at a placement.
pub struct ImageOverlay {
    /// Image file path.
    pub source: PathBuf,
    /// Unscaled image size in pixels.
    pub intrinsic: Size,
    /// Placement over time.
    pub motion: Motion,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual payload of an element.
pub enum ElementKind {
    /// Text overlay.
    Text(TextOverlay),
    /// Image overlay.
    Image(ImageOverlay),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A visual element placed on its segment's local timeline.
pub struct Element {
    /// Identifier, unique within the segment.
    pub id: String,
    /// Start offset from the segment start, in seconds.
    pub start: f64,
    /// Visible length in seconds.
    pub duration: f64,
    /// What is drawn.
    pub kind: ElementKind,
}

impl Element {
    /// Local end offset (exclusive).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// `true` when the element is visible at segment-local time `t`.
    pub fn is_active(&self, t: f64) -> bool {
        self.start <= t && t < self.end()
    }

    /// Image placement at segment-local time `t`; `None` for text or inactive elements.
    pub fn placement_at(&self, t: f64) -> Option<Placement> {
        if !self.is_active(t) {
            return None;
        }
        match &self.kind {
            ElementKind::Text(_) => None,
            ElementKind::Image(img) => Some(match img.motion {
                Motion::Fixed(p) => p,
                Motion::Animated(anim) => anim.sample(t - self.start, img.intrinsic),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named sub-interval of a segment (title, one image slot, ...).
pub struct Phase {
    /// Phase name.
    pub label: String,
    /// Local start in seconds.
    pub start: f64,
    /// Length in seconds.
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A self-contained timed visual unit. Immutable once built.
pub struct Segment {
    /// Human-readable name (for logs and plans).
    pub label: String,
    /// Role in the program.
    pub kind: SegmentKind,
    /// Visual length before any narration override.
    pub nominal_duration: f64,
    /// Actual length: the nominal length, extended to fit a longer narration.
    pub duration: f64,
    /// Full-frame background.
    pub background: Fill,
    /// Optional voice-over, padded to `duration`.
    pub narration: Option<Narration>,
    /// Sub-intervals of the nominal layout.
    pub phases: Vec<Phase>,
    /// Elements in paint order (later elements draw on top).
    pub elements: Vec<Element>,
}

impl Segment {
    /// Validate durations and element spans.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.nominal_duration.is_finite() || self.nominal_duration <= 0.0 {
            return Err(ReelError::validation(format!(
                "segment '{}' nominal duration must be finite and > 0",
                self.label
            )));
        }
        if !self.duration.is_finite() || self.duration + SPAN_EPSILON < self.nominal_duration {
            return Err(ReelError::validation(format!(
                "segment '{}' duration must be >= its nominal duration",
                self.label
            )));
        }
        if let Some(n) = &self.narration {
            if !n.duration.is_finite() || n.duration < 0.0 {
                return Err(ReelError::validation(format!(
                    "segment '{}' narration duration must be finite and >= 0",
                    self.label
                )));
            }
            if n.duration > self.duration + SPAN_EPSILON {
                return Err(ReelError::validation(format!(
                    "segment '{}' is shorter than its narration",
                    self.label
                )));
            }
        }
        for el in &self.elements {
            if !el.start.is_finite() || !el.duration.is_finite() || el.start < 0.0 {
                return Err(ReelError::validation(format!(
                    "element '{}' of segment '{}' has an invalid span",
                    el.id, self.label
                )));
            }
            if el.duration <= 0.0 {
                return Err(ReelError::validation(format!(
                    "element '{}' of segment '{}' must have duration > 0",
                    el.id, self.label
                )));
            }
            if el.end() > self.duration + SPAN_EPSILON {
                return Err(ReelError::validation(format!(
                    "element '{}' ends after segment '{}'",
                    el.id, self.label
                )));
            }
            if let ElementKind::Image(img) = &el.kind
                && (img.intrinsic.width <= 0.0 || img.intrinsic.height <= 0.0)
            {
                return Err(ReelError::validation(format!(
                    "image element '{}' has an empty intrinsic size",
                    el.id
                )));
            }
        }
        Ok(())
    }

    /// Elements visible at segment-local time `t`, in paint order.
    pub fn active_elements(&self, t: f64) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |el| el.is_active(t))
    }

    /// Total length of the declared phases.
    pub fn phase_total(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
