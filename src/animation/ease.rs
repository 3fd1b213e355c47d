/// Length of every animated transition (fullscreen hold, shrink-to-grid), in seconds.
pub const TRANSITION_SECS: f64 = 1.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    /// `3p² − 2p³`: zero slope at both ends.
    #[default]
    Smoothstep,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smoothstep => 3.0 * t * t - 2.0 * t * t * t,
        }
    }
}

/// Linear progress of `t` through a window of `window` seconds, clamped to `[0, 1]`.
///
/// A non-positive window is treated as already finished.
pub fn progress(t: f64, window: f64) -> f64 {
    if window <= 0.0 {
        return 1.0;
    }
    (t / window).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
