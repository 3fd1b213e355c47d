/// Ordered, back-to-back program of segments.
pub mod program;
