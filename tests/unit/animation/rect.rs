use super::*;
use crate::animation::ease::TRANSITION_SECS;

fn shrink() -> RectAnim {
    // A 1080x1600 poster covering a 1080x1920 frame shrinking into the middle grid cell.
    RectAnim::new(
        Placement::new(Point::new(-108.0, 0.0), Size::new(1296.0, 1920.0)),
        Placement::new(Point::new(360.0, 640.0), Size::new(360.0, 640.0)),
        TRANSITION_SECS,
    )
}

#[test]
fn start_state_is_exact() {
    let anim = shrink();
    assert_eq!(anim.position_at(0.0), anim.from.origin);
    assert_eq!(anim.size_at(0.0), anim.from.size);
}

#[test]
fn end_state_is_exact_and_holds() {
    let anim = shrink();
    for t in [TRANSITION_SECS, TRANSITION_SECS + 0.5, 10.0] {
        assert_eq!(anim.position_at(t), anim.to.origin);
        assert_eq!(anim.size_at(t), anim.to.size);
    }
}

#[test]
fn motion_is_monotonic_without_overshoot() {
    let anim = shrink();
    let mut prev = anim.position_at(0.0);
    for i in 1..=60 {
        let t = TRANSITION_SECS * f64::from(i) / 60.0;
        let p = anim.position_at(t);
        assert!(p.x >= prev.x && p.y >= prev.y);
        assert!(p.x <= anim.to.origin.x && p.y <= anim.to.origin.y);
        let s = anim.size_at(t);
        assert!(s.width >= anim.to.size.width && s.width <= anim.from.size.width);
        prev = p;
    }
}

#[test]
fn scale_preserves_aspect_ratio() {
    let anim = shrink();
    let original = Size::new(600.0, 900.0);
    for i in 0..=10 {
        let t = TRANSITION_SECS * f64::from(i) / 10.0;
        let placed = anim.sample(t, original);
        let ratio = placed.size.width / placed.size.height;
        assert!((ratio - 600.0 / 900.0).abs() < 1e-9);
        let target = anim.size_at(t);
        assert!(placed.size.width <= target.width + 1e-9);
        assert!(placed.size.height <= target.height + 1e-9);
    }
}

#[test]
fn scale_at_end_fits_inside_cell() {
    let anim = shrink();
    // 600x900 into 360x640: width-limited, 0.6.
    assert!((anim.scale_at(TRANSITION_SECS, Size::new(600.0, 900.0)) - 0.6).abs() < 1e-12);
}

#[test]
fn linear_ease_moves_halfway_at_half_window() {
    let mut anim = shrink();
    anim.ease = Ease::Linear;
    let p = anim.position_at(TRANSITION_SECS / 2.0);
    assert!((p.x - 126.0).abs() < 1e-9);
    assert!((p.y - 320.0).abs() < 1e-9);
}
