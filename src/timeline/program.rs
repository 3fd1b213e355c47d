use crate::{
    composition::model::{Element, Segment, SegmentKind},
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A segment placed at an absolute time in the program.
pub struct ProgramEntry {
    /// Absolute start in seconds.
    pub start: f64,
    /// The placed segment.
    pub segment: Segment,
}

impl ProgramEntry {
    /// Absolute end (exclusive).
    pub fn end(&self) -> f64 {
        self.start + self.segment.duration
    }
}

/// An element resolved onto the program's absolute timeline.
#[derive(Clone, Copy, Debug)]
pub struct PlacedElement<'a> {
    /// Index of the owning entry.
    pub entry: usize,
    /// Absolute start of the owning segment.
    pub segment_start: f64,
    /// The element (times still segment-local).
    pub element: &'a Element,
}

impl PlacedElement<'_> {
    pub fn start(&self) -> f64 {
        self.segment_start + self.element.start
    }

    pub fn end(&self) -> f64 {
        self.segment_start + self.element.end()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Segments concatenated end to end into one continuous timeline.
///
/// Invariant: `entries[k].start` is the sum of the durations of `entries[..k]`, so
/// there are no gaps and no overlaps between consecutive segments.
pub struct Program {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Placed segments in playback order.
    pub entries: Vec<ProgramEntry>,
}

impl Program {
    /// Fold an ordered list of built segments into a program.
    ///
    /// Each segment starts where the previous one ends, using its effective
    /// (narration-negotiated) duration.
    pub fn assemble(
        canvas: Canvas,
        fps: Fps,
        segments: impl IntoIterator<Item = Segment>,
    ) -> ReelResult<Self> {
        canvas.validate()?;
        let (entries, _) = segments.into_iter().try_fold(
            (Vec::<ProgramEntry>::new(), 0.0f64),
            |(mut entries, start), segment| {
                segment.validate()?;
                let end = start + segment.duration;
                entries.push(ProgramEntry { start, segment });
                Ok::<_, ReelError>((entries, end))
            },
        )?;
        if entries.is_empty() {
            return Err(ReelError::validation("program must contain at least one segment"));
        }
        Ok(Self {
            canvas,
            fps,
            entries,
        })
    }

    /// Total length in seconds: the sum of all segment durations.
    pub fn duration(&self) -> f64 {
        self.entries.last().map(ProgramEntry::end).unwrap_or(0.0)
    }

    /// Entry playing at absolute time `t`.
    pub fn entry_at(&self, t: f64) -> Option<&ProgramEntry> {
        self.entries.iter().find(|e| e.start <= t && t < e.end())
    }

    /// Segment kinds in playback order.
    pub fn kinds(&self) -> Vec<SegmentKind> {
        self.entries.iter().map(|e| e.segment.kind).collect()
    }

    /// Every element of every segment with its absolute placement, in paint order.
    pub fn placed_elements(&self) -> impl Iterator<Item = PlacedElement<'_>> {
        self.entries.iter().enumerate().flat_map(|(idx, entry)| {
            entry.segment.elements.iter().map(move |element| PlacedElement {
                entry: idx,
                segment_start: entry.start,
                element,
            })
        })
    }

    /// Serialize the timeline as pretty JSON (the `plan` output).
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Incremental front-end to [`Program::assemble`].
pub struct ProgramBuilder {
    canvas: Canvas,
    fps: Fps,
    segments: Vec<Segment>,
}

impl ProgramBuilder {
    pub fn new(canvas: Canvas, fps: Fps) -> Self {
        Self {
            canvas,
            fps,
            segments: Vec::new(),
        }
    }

    /// Append a segment after everything pushed so far.
    pub fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Append several segments in order.
    pub fn extend(mut self, segments: impl IntoIterator<Item = Segment>) -> Self {
        self.segments.extend(segments);
        self
    }

    pub fn build(self) -> ReelResult<Program> {
        Program::assemble(self.canvas, self.fps, self.segments)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/program.rs"]
mod tests;
