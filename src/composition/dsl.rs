use std::path::PathBuf;

use crate::{
    composition::model::{
        Element, ElementKind, Fill, ImageOverlay, Motion, Narration, Phase, Segment, SegmentKind,
        TextOverlay,
    },
    foundation::core::{Rgb8, Size},
    foundation::error::{ReelError, ReelResult},
};

/// Builder for [`Segment`](crate::Segment) values.
///
/// Set the narration before adding elements that should last until the end of the
/// segment: [`SegmentBuilder::duration`] already accounts for it.
pub struct SegmentBuilder {
    label: String,
    kind: SegmentKind,
    nominal: f64,
    background: Fill,
    narration: Option<Narration>,
    phases: Vec<Phase>,
    elements: Vec<Element>,
}

impl SegmentBuilder {
    /// Create a builder for a segment with a nominal visual length in seconds.
    pub fn new(label: impl Into<String>, kind: SegmentKind, nominal: f64) -> Self {
        Self {
            label: label.into(),
            kind,
            nominal,
            background: Fill::Solid(Rgb8::BLACK),
            narration: None,
            phases: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Set the full-frame background.
    pub fn background(mut self, fill: Fill) -> Self {
        self.background = fill;
        self
    }

    /// Attach (or clear) the voice-over.
    pub fn narration(mut self, narration: Option<Narration>) -> Self {
        self.narration = narration;
        self
    }

    /// Effective segment length given the current narration.
    pub fn duration(&self) -> f64 {
        crate::composition::card::negotiate(self.nominal, self.narration.as_ref())
    }

    /// Declare a named phase.
    pub fn phase(mut self, label: impl Into<String>, start: f64, duration: f64) -> Self {
        self.phases.push(Phase {
            label: label.into(),
            start,
            duration,
        });
        self
    }

    /// Append a text element.
    pub fn text(
        mut self,
        id: impl Into<String>,
        start: f64,
        duration: f64,
        text: TextOverlay,
    ) -> Self {
        self.elements.push(Element {
            id: id.into(),
            start,
            duration,
            kind: ElementKind::Text(text),
        });
        self
    }

    /// Append an image element.
    pub fn image(
        mut self,
        id: impl Into<String>,
        start: f64,
        duration: f64,
        source: impl Into<PathBuf>,
        intrinsic: Size,
        motion: Motion,
    ) -> Self {
        self.elements.push(Element {
            id: id.into(),
            start,
            duration,
            kind: ElementKind::Image(ImageOverlay {
                source: source.into(),
                intrinsic,
                motion,
            }),
        });
        self
    }

    /// Build and validate the final [`Segment`](crate::Segment).
    pub fn build(self) -> ReelResult<Segment> {
        let duration = self.duration();
        let mut seen = std::collections::BTreeSet::new();
        for el in &self.elements {
            if !seen.insert(el.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate element id '{}' in segment '{}'",
                    el.id, self.label
                )));
            }
        }
        let seg = Segment {
            label: self.label,
            kind: self.kind,
            nominal_duration: self.nominal,
            duration,
            background: self.background,
            narration: self.narration,
            phases: self.phases,
            elements: self.elements,
        };
        seg.validate()?;
        Ok(seg)
    }
}

/// Centred text at `font_size`, offset vertically by `offset_y`.
pub fn caption(text: impl Into<String>, font_size: f32, color: Rgb8, offset_y: f64) -> TextOverlay {
    TextOverlay {
        text: text.into(),
        font_size,
        color,
        offset_y,
    }
}
