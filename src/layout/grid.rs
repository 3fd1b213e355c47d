use crate::foundation::core::{Canvas, Placement, Point, Size};

/// Number of grid cells (and images) in a reveal segment.
pub const GRID_CELLS: usize = 3;

/// Target cells of the reveal grid: a single column of three cells placed in the
/// horizontal middle third of the frame, top to bottom.
pub fn grid_cells(canvas: Canvas) -> [Placement; GRID_CELLS] {
    let cell_w = canvas.width / 3;
    let cell_h = canvas.height / 3;
    let size = Size::new(f64::from(cell_w), f64::from(cell_h));
    std::array::from_fn(|row| {
        let row = row as u32;
        Placement::new(
            Point::new(f64::from(cell_w), f64::from(row * cell_h)),
            size,
        )
    })
}

/// Scale `original` so it covers the whole frame, centred.
///
/// The image is fitted to the frame height first; if it is then still narrower
/// than the frame it is fitted to the frame width instead. Sizes are rounded to
/// whole pixels and the centring offset is floored, so overflow lands evenly on
/// both sides (offsets are zero or negative).
pub fn cover_fit(original: Size, canvas: Canvas) -> Placement {
    let frame = canvas.size();
    let by_height = Size::new(
        (original.width * frame.height / original.height).round(),
        frame.height,
    );
    let size = if by_height.width < frame.width {
        Size::new(
            frame.width,
            (original.height * frame.width / original.width).round(),
        )
    } else {
        by_height
    };
    centered(size, canvas)
}

/// Keep `original` at its native size unless it exceeds the frame, in which case
/// shrink it uniformly to fit; centred either way.
pub fn contain_fit(original: Size, canvas: Canvas) -> Placement {
    let frame = canvas.size();
    let scale = (frame.width / original.width)
        .min(frame.height / original.height)
        .min(1.0);
    let size = Size::new(
        (original.width * scale).round(),
        (original.height * scale).round(),
    );
    centered(size, canvas)
}

/// Top-left placement that centres `size` in the frame (floored offsets).
pub fn centered(size: Size, canvas: Canvas) -> Placement {
    let frame = canvas.size();
    Placement::new(
        Point::new(
            ((frame.width - size.width) / 2.0).floor(),
            ((frame.height - size.height) / 2.0).floor(),
        ),
        size,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
