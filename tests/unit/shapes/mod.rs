use super::*;
use crate::foundation::core::{Point, Rect};

// Curved presets are flattened to cubics within 0.1px.
fn approx_rect(a: Rect, b: Rect) -> bool {
    const EPS: f64 = 0.15;
    (a.x0 - b.x0).abs() < EPS
        && (a.y0 - b.y0).abs() < EPS
        && (a.x1 - b.x1).abs() < EPS
        && (a.y1 - b.y1).abs() < EPS
}

#[test]
fn catalog_lists_ids_in_order() {
    assert_eq!(
        ShapeLibrary::names(),
        vec![
            "rectangle",
            "circle",
            "ellipse",
            "ellipseVertical",
            "heart",
            "star",
            "car",
            "rabbit",
            "roundedRect",
            "hexagon"
        ]
    );
    for id in ShapeLibrary::names() {
        assert_eq!(ShapeLibrary::get(id).unwrap().preset_id(), Some(id));
    }
}

#[test]
fn unknown_shape_falls_back_to_full_rectangle() {
    let r = ShapeLibrary::clip_region("nonexistent-shape", 200.0, 100.0);
    assert!(approx_rect(r.bounds(), Rect::new(0.0, 0.0, 200.0, 100.0)));
    assert!(r.contains(Point::new(1.0, 1.0)));
    assert!(r.contains(Point::new(199.0, 99.0)));
    assert!(ShapeLibrary::resolve("nope").is_rectangle());
}

#[test]
fn shapes_are_deterministic_and_size_dependent() {
    for id in ShapeLibrary::names() {
        let a = ShapeLibrary::clip_region(id, 120.0, 80.0);
        let b = ShapeLibrary::clip_region(id, 120.0, 80.0);
        assert_eq!(a, b, "{id}");
        let c = ShapeLibrary::clip_region(id, 60.0, 40.0);
        assert_ne!(a, c, "{id}");
    }
}

#[test]
fn circle_uses_shorter_side() {
    let r = ShapeLibrary::clip_region("circle", 200.0, 100.0);
    assert!(approx_rect(r.bounds(), Rect::new(50.0, 0.0, 150.0, 100.0)));
    assert!(r.contains(Point::new(100.0, 50.0)));
    assert!(!r.contains(Point::new(10.0, 50.0)));
}

#[test]
fn vertical_ellipse_is_seventy_percent_wide() {
    let r = ShapeLibrary::clip_region("ellipseVertical", 100.0, 100.0);
    assert!(approx_rect(r.bounds(), Rect::new(15.0, 0.0, 85.0, 100.0)));
}

#[test]
fn star_has_ten_vertices_and_hollow_corners() {
    let r = ShapeLibrary::clip_region("star", 100.0, 100.0);
    let vertices = r
        .path()
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_) | kurbo::PathEl::LineTo(_)))
        .count();
    assert_eq!(vertices, 10);
    assert!(r.contains(Point::new(50.0, 50.0)));
    assert!(r.contains(Point::new(50.0, 5.0)));
    assert!(!r.contains(Point::new(5.0, 5.0)));
}

#[test]
fn heart_and_rabbit_cover_their_centers() {
    let heart = ShapeLibrary::clip_region("heart", 100.0, 100.0);
    assert!(heart.contains(Point::new(50.0, 50.0)));
    assert!(!heart.contains(Point::new(50.0, 95.0)));

    let rabbit = ShapeLibrary::clip_region("rabbit", 100.0, 100.0);
    assert!(rabbit.contains(Point::new(50.0, 65.0)));
    assert!(rabbit.contains(Point::new(35.0, 20.0)));
    assert!(!rabbit.contains(Point::new(5.0, 5.0)));
}

#[test]
fn car_sits_in_lower_part_of_square() {
    let car = ShapeLibrary::clip_region("car", 100.0, 100.0);
    assert!(car.contains(Point::new(50.0, 60.0)));
    assert!(!car.contains(Point::new(50.0, 10.0)));
}

#[test]
fn rounded_rect_and_hexagon_bounds() {
    let rr = ShapeLibrary::clip_region("roundedRect", 200.0, 100.0);
    assert!(approx_rect(rr.bounds(), Rect::new(0.0, 0.0, 200.0, 100.0)));
    assert!(!rr.contains(Point::new(0.5, 0.5)));

    let hex = ShapeLibrary::clip_region("hexagon", 100.0, 100.0);
    let b = hex.bounds();
    assert!((b.y0 - 0.0).abs() < 1e-9 && (b.y1 - 100.0).abs() < 1e-9);
    assert!(b.width() < 100.0);
}

#[test]
fn custom_shape_scales_anisotropically() {
    let shape = custom_shape("diamond", "M50 0 L100 50 L50 100 L0 50 Z", 100.0, 100.0).unwrap();
    assert_eq!(shape.name(), "diamond");
    assert_eq!(shape.view_box().as_deref(), Some("0 0 100 100"));
    assert_eq!(shape.preset_id(), None);

    let r = shape.path(200.0, 50.0);
    assert!(approx_rect(r.bounds(), Rect::new(0.0, 0.0, 200.0, 50.0)));
    assert!(r.contains(Point::new(100.0, 25.0)));
    assert!(!r.contains(Point::new(10.0, 5.0)));
}

#[test]
fn custom_shape_rejects_bad_input() {
    assert!(custom_shape("x", "M0 0 L", 100.0, 100.0).is_err());
    assert!(custom_shape("x", "", 100.0, 100.0).is_err());
    assert!(custom_shape("x", "M0 0 L1 1 Z", 0.0, 100.0).is_err());
    assert!(custom_shape("x", "M0 0 L1 1 Z", 100.0, f64::NAN).is_err());
}

#[test]
fn custom_shape_def_converts() {
    let def: CustomShapeDef =
        serde_json::from_str(r#"{"name":"tri","path":"M0 10 L5 0 L10 10 Z","viewBoxWidth":10}"#)
            .unwrap();
    assert_eq!(def.view_box_height, 100.0);
    let shape = CropShape::try_from(&def).unwrap();
    let r = shape.path(10.0, 100.0);
    assert!(approx_rect(r.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0)));
}
