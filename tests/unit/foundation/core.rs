use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn canonical_scale_matches_preview_and_capture_widths() {
    assert!(approx(CanonicalSpace::scale_for_width(270.0), 0.5));
    assert!(approx(CanonicalSpace::scale_for_width(1080.0), 2.0));
    assert!(approx(CanonicalSpace::height_for_width(1080.0), 1920.0));
}

#[test]
fn placement_scaled_rect_has_no_drift() {
    let p = Placement::new(50.0, 100.0, 150.0, 200.0, 0.0);
    assert_eq!(p.scaled_rect(0.5), Rect::new(25.0, 50.0, 100.0, 150.0));
    assert_eq!(p.scaled_rect(2.0), Rect::new(100.0, 200.0, 400.0, 600.0));
}

#[test]
fn placement_affine_maps_source_corners_onto_scaled_rect() {
    let p = Placement::new(50.0, 100.0, 150.0, 200.0, 0.0);
    let a = p.to_affine(2.0, 30.0, 40.0);
    let tl = a * Point::new(0.0, 0.0);
    let br = a * Point::new(30.0, 40.0);
    assert!(approx(tl.x, 100.0) && approx(tl.y, 200.0));
    assert!(approx(br.x, 400.0) && approx(br.y, 600.0));
}

#[test]
fn placement_rotation_keeps_center_fixed() {
    let p = Placement::new(0.0, 0.0, 100.0, 50.0, 90.0);
    let a = p.to_affine(1.0, 100.0, 50.0);
    let c = a * Point::new(50.0, 25.0);
    assert!(approx(c.x, 50.0) && approx(c.y, 25.0));
}

#[test]
fn placement_patch_merges_only_set_fields() {
    let p = Placement::new(1.0, 2.0, 3.0, 4.0, 5.0);
    let q = p.merged(PlacementPatch::position(10.0, 20.0));
    assert_eq!(q, Placement::new(10.0, 20.0, 3.0, 4.0, 5.0));
    let r = q.merged(PlacementPatch::rotation(-15.0));
    assert_eq!(r, Placement::new(10.0, 20.0, 3.0, 4.0, -15.0));
}

#[test]
fn placement_contains_respects_rotation() {
    let p = Placement::new(0.0, 0.0, 100.0, 10.0, 90.0);
    // Rotated by 90 degrees the long axis is vertical.
    assert!(p.contains(Point::new(50.0, 45.0)));
    assert!(!p.contains(Point::new(5.0, 5.0)));
}

#[test]
fn display_delta_divides_by_scale() {
    let d = CanonicalSpace::display_delta_to_canonical(Vec2::new(10.0, 5.0), 0.5);
    assert_eq!(d, Vec2::new(20.0, 10.0));
    let z = CanonicalSpace::display_delta_to_canonical(Vec2::new(10.0, 5.0), 0.0);
    assert_eq!(z, Vec2::ZERO);
}

#[test]
fn straight_to_premul_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
}
