use super::*;

#[test]
fn portrait_grid_is_a_middle_column() {
    let cells = grid_cells(Canvas::PORTRAIT_1080);
    let ys: Vec<f64> = cells.iter().map(|c| c.origin.y).collect();
    assert_eq!(ys, vec![0.0, 640.0, 1280.0]);
    for cell in cells {
        assert_eq!(cell.origin.x, 360.0);
        assert_eq!(cell.size, Size::new(360.0, 640.0));
    }
}

#[test]
fn grid_uses_integer_division() {
    let cells = grid_cells(Canvas {
        width: 1000,
        height: 1000,
    });
    assert_eq!(cells[1].origin, Point::new(333.0, 333.0));
    assert_eq!(cells[2].origin, Point::new(333.0, 666.0));
    assert_eq!(cells[0].size, Size::new(333.0, 333.0));
}

#[test]
fn cover_fit_prefers_height_for_wide_images() {
    // 2000x1000 landscape poster on a portrait frame: height fit, centred horizontally.
    let p = cover_fit(Size::new(2000.0, 1000.0), Canvas::PORTRAIT_1080);
    assert_eq!(p.size, Size::new(3840.0, 1920.0));
    assert_eq!(p.origin, Point::new(-1380.0, 0.0));
}

#[test]
fn cover_fit_switches_to_width_for_narrow_images() {
    // 500x1000 is narrower than the frame after a height fit (960 < 1080).
    let p = cover_fit(Size::new(500.0, 1000.0), Canvas::PORTRAIT_1080);
    assert_eq!(p.size, Size::new(1080.0, 2160.0));
    assert_eq!(p.origin, Point::new(0.0, -120.0));
}

#[test]
fn cover_fit_always_covers_frame() {
    let canvas = Canvas::PORTRAIT_1080;
    for (w, h) in [(300.0, 450.0), (1920.0, 1080.0), (1080.0, 1920.0), (7.0, 3.0)] {
        let p = cover_fit(Size::new(w, h), canvas);
        assert!(p.size.width >= 1080.0 && p.size.height >= 1920.0);
        assert!(p.origin.x <= 0.0 && p.origin.y <= 0.0);
    }
}

#[test]
fn contain_fit_never_upscales() {
    let small = contain_fit(Size::new(400.0, 600.0), Canvas::PORTRAIT_1080);
    assert_eq!(small.size, Size::new(400.0, 600.0));
    assert_eq!(small.origin, Point::new(340.0, 660.0));

    let big = contain_fit(Size::new(2000.0, 3000.0), Canvas::PORTRAIT_1080);
    assert_eq!(big.size, Size::new(1080.0, 1620.0));
    assert_eq!(big.origin, Point::new(0.0, 150.0));
}
