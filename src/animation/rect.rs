use crate::{
    animation::ease::{Ease, progress},
    foundation::core::{Placement, Point, Size},
    foundation::math::lerp,
};

/// A rectangle moving from one placement to another over a fixed window.
///
/// Position and size are interpolated with the same eased progress. When sampled
/// against an element's intrinsic size the element is scaled uniformly by the
/// smaller of the two axis ratios, so the aspect ratio never changes mid-flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectAnim {
    pub from: Placement,
    pub to: Placement,
    /// Transition length in seconds.
    pub window: f64,
    pub ease: Ease,
}

impl RectAnim {
    pub fn new(from: Placement, to: Placement, window: f64) -> Self {
        Self {
            from,
            to,
            window,
            ease: Ease::Smoothstep,
        }
    }

    /// Eased progress at local time `t` (seconds since the transition started).
    pub fn eased(&self, t: f64) -> f64 {
        self.ease.apply(progress(t, self.window))
    }

    pub fn position_at(&self, t: f64) -> Point {
        let e = self.eased(t);
        Point::new(
            lerp(self.from.origin.x, self.to.origin.x, e),
            lerp(self.from.origin.y, self.to.origin.y, e),
        )
    }

    pub fn size_at(&self, t: f64) -> Size {
        let e = self.eased(t);
        Size::new(
            lerp(self.from.size.width, self.to.size.width, e),
            lerp(self.from.size.height, self.to.size.height, e),
        )
    }

    /// Uniform scale applied to an element whose unscaled size is `original`.
    pub fn scale_at(&self, t: f64, original: Size) -> f64 {
        let target = self.size_at(t);
        let sw = target.width / original.width;
        let sh = target.height / original.height;
        sw.min(sh)
    }

    /// Rendered placement of an element of intrinsic size `original` at local time `t`.
    pub fn sample(&self, t: f64, original: Size) -> Placement {
        let scale = self.scale_at(t, original);
        Placement::new(
            self.position_at(t),
            Size::new(original.width * scale, original.height * scale),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rect.rs"]
mod tests;
