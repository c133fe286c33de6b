use super::*;

#[test]
fn cover_size_picks_axis_by_ratio() {
    let canvas = Size::new(300.0, 300.0);
    // Landscape image: height matches.
    assert_eq!(cover_size(canvas, Size::new(800.0, 400.0), 1.0), Size::new(600.0, 300.0));
    // Portrait image: width matches.
    assert_eq!(cover_size(canvas, Size::new(400.0, 800.0), 1.0), Size::new(300.0, 600.0));
    // Zoom multiplies uniformly.
    assert_eq!(cover_size(canvas, Size::new(400.0, 800.0), 2.0), Size::new(600.0, 1200.0));
    assert_eq!(cover_size(canvas, Size::new(0.0, 10.0), 1.0), Size::ZERO);
}

#[test]
fn constrain_clamps_symmetrically() {
    let canvas = Size::new(300.0, 300.0);
    let drawn = Size::new(600.0, 300.0);
    assert_eq!(max_offset(canvas, drawn), Vec2::new(150.0, 0.0));
    assert_eq!(
        constrain(Vec2::new(500.0, 40.0), canvas, drawn),
        Vec2::new(150.0, 0.0)
    );
    assert_eq!(
        constrain(Vec2::new(-500.0, -40.0), canvas, drawn),
        Vec2::new(-150.0, 0.0)
    );
}

#[test]
fn constrained_rect_always_covers() {
    let canvas = Size::new(300.0, 200.0);
    for zoom in [1.0, 1.3, 2.0, 3.0] {
        let drawn = cover_size(canvas, Size::new(1000.0, 700.0), zoom);
        for p in [(-1e6, 0.0), (1e6, 1e6), (37.0, -12.0)] {
            let pos = constrain(Vec2::new(p.0, p.1), canvas, drawn);
            assert!(covers(image_rect(canvas, drawn, pos), canvas, 1e-9));
        }
    }
}

#[test]
fn image_transform_maps_corners() {
    let rect = Rect::new(-50.0, 10.0, 250.0, 160.0);
    let t = image_transform(Size::new(600.0, 300.0), rect);
    let p0 = t * crate::foundation::core::Point::ZERO;
    let p1 = t * crate::foundation::core::Point::new(600.0, 300.0);
    assert!((p0.x + 50.0).abs() < 1e-9 && (p0.y - 10.0).abs() < 1e-9);
    assert!((p1.x - 250.0).abs() < 1e-9 && (p1.y - 160.0).abs() < 1e-9);
}

#[test]
fn cover_source_rect_crops_overflowing_axis() {
    // 16:9 video into 9:16 target: crop the width.
    let r = cover_source_rect(Size::new(1280.0, 720.0), Size::new(1080.0, 1920.0));
    assert!((r.height() - 720.0).abs() < 1e-9);
    assert!((r.width() - 405.0).abs() < 1e-9);
    assert!((r.x0 - 437.5).abs() < 1e-9);

    // Tall source into square target: crop the height.
    let r = cover_source_rect(Size::new(100.0, 400.0), Size::new(50.0, 50.0));
    assert_eq!(r, Rect::new(0.0, 150.0, 100.0, 250.0));
}
