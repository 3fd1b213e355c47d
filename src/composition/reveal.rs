use std::path::PathBuf;

use crate::{
    animation::ease::TRANSITION_SECS,
    animation::rect::RectAnim,
    composition::card::HEADLINE_FONT_PX,
    composition::dsl::{SegmentBuilder, caption},
    composition::model::{Fill, Motion, Narration, Segment, SegmentKind},
    foundation::core::{Canvas, Placement, Rgb8, Size},
    foundation::error::{ReelError, ReelResult},
    layout::grid::{GRID_CELLS, cover_fit, grid_cells},
};

/// Caption sub-card at the head of every reveal.
pub const REVEAL_TITLE_SECS: f64 = 5.0;
/// Time budget per image: fullscreen + shrink, then a beat before the next image.
pub const REVEAL_SLOT_SECS: f64 = 4.0;
/// Nominal reveal length: `5 + 3 × 4`.
pub const REVEAL_SECS: f64 = REVEAL_TITLE_SECS + GRID_CELLS as f64 * REVEAL_SLOT_SECS;

#[derive(Clone, Debug, PartialEq)]
pub struct RevealImage {
    pub source: PathBuf,
    /// Unscaled image size in pixels.
    pub intrinsic: Size,
}

/// Inputs of a three-image reveal.
#[derive(Clone, Debug)]
pub struct RevealSpec {
    pub label: String,
    pub caption: String,
    /// Images in reveal order; image `i` settles in grid row `i`.
    pub images: [RevealImage; GRID_CELLS],
    pub canvas: Canvas,
    pub text_color: Rgb8,
    pub background: Fill,
    pub narration: Option<Narration>,
}

/// Geometry of one image's trip from fullscreen to its grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTrack {
    /// Local time the fullscreen phase begins.
    pub start: f64,
    pub fullscreen: Placement,
    pub shrink: RectAnim,
    /// Where the image rests once the shrink has finished: the grid cell itself.
    pub rest: Placement,
}

impl RevealTrack {
    pub fn plan(index: usize, intrinsic: Size, canvas: Canvas, cell: Placement) -> Self {
        let fullscreen = cover_fit(intrinsic, canvas);
        let shrink = RectAnim::new(fullscreen, cell, TRANSITION_SECS);
        Self {
            start: REVEAL_TITLE_SECS + index as f64 * REVEAL_SLOT_SECS,
            fullscreen,
            shrink,
            rest: cell,
        }
    }

    pub fn shrink_start(&self) -> f64 {
        self.start + TRANSITION_SECS
    }

    pub fn rest_start(&self) -> f64 {
        self.start + 2.0 * TRANSITION_SECS
    }
}

/// Build a reveal segment.
///
/// Layout on the local timeline:
/// - `[0, 5)`: caption;
/// - image `i`, from `s = 5 + 4i`: fullscreen cover for 1.5 s, shrink into grid cell
///   `i` for 1.5 s, then pinned in the cell until the segment ends.
///
/// Earlier images stay pinned while later ones animate on top of them.
pub fn reveal_segment(spec: &RevealSpec) -> ReelResult<Segment> {
    if spec.caption.trim().is_empty() {
        return Err(ReelError::validation(format!(
            "reveal '{}' caption must be non-empty",
            spec.label
        )));
    }
    spec.canvas.validate()?;

    let mut b = SegmentBuilder::new(spec.label.clone(), SegmentKind::Reveal, REVEAL_SECS)
        .background(spec.background.clone())
        .narration(spec.narration.clone())
        .phase("title", 0.0, REVEAL_TITLE_SECS)
        .text(
            "caption",
            0.0,
            REVEAL_TITLE_SECS,
            caption(
                spec.caption.clone(),
                HEADLINE_FONT_PX,
                spec.text_color,
                0.0,
            ),
        );
    let len = b.duration();

    let cells = grid_cells(spec.canvas);
    for (i, (image, cell)) in spec.images.iter().zip(cells).enumerate() {
        let track = RevealTrack::plan(i, image.intrinsic, spec.canvas, cell);
        let n = i + 1;
        b = b
            .phase(format!("poster-{n}"), track.start, REVEAL_SLOT_SECS)
            .image(
                format!("poster-{n}-fullscreen"),
                track.start,
                TRANSITION_SECS,
                image.source.clone(),
                image.intrinsic,
                Motion::Fixed(track.fullscreen),
            )
            .image(
                format!("poster-{n}-shrink"),
                track.shrink_start(),
                TRANSITION_SECS,
                image.source.clone(),
                image.intrinsic,
                Motion::Animated(track.shrink),
            )
            .image(
                format!("poster-{n}-pinned"),
                track.rest_start(),
                len - track.rest_start(),
                image.source.clone(),
                image.intrinsic,
                Motion::Fixed(track.rest),
            );
    }

    b.build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/reveal.rs"]
mod tests;
