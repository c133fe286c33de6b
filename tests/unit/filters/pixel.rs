use super::*;
use crate::foundation::core::Rgba8Premul;

#[test]
fn grayscale_red_matches_luma() {
    assert_eq!(
        apply_pixel(FilterKind::Grayscale, [255, 0, 0, 255]),
        [54, 54, 54, 255]
    );
    assert_eq!(
        apply_pixel(FilterKind::Grayscale, [255, 255, 255, 255]),
        [255, 255, 255, 255]
    );
}

#[test]
fn outputs_are_clamped_and_alpha_kept() {
    assert_eq!(
        apply_pixel(FilterKind::Brightness, [250, 100, 0, 77]),
        [255, 120, 0, 77]
    );
    assert_eq!(apply_pixel(FilterKind::Warm, [250, 9, 10, 255]), [255, 9, 0, 255]);
    assert_eq!(apply_pixel(FilterKind::Cool, [10, 9, 250, 255]), [0, 9, 255, 255]);
    assert_eq!(apply_pixel(FilterKind::Contrast, [0, 128, 255, 1]), [0, 128, 255, 1]);
    assert_eq!(apply_pixel(FilterKind::Sepia, [255, 255, 255, 255]), [255, 255, 239, 255]);
}

#[test]
fn every_filter_is_deterministic() {
    let px = [17, 130, 201, 255];
    for kind in FILTER_LIST {
        assert_eq!(apply_pixel(kind, px), apply_pixel(kind, px));
        assert_eq!(apply_pixel(kind, px)[3], 255);
    }
}

#[test]
fn none_leaves_buffer_untouched() {
    let mut buf: Vec<u8> = (0..64u8).map(|v| v.wrapping_mul(37)).collect();
    let orig = buf.clone();
    apply_filter_rgba8_premul(&mut buf, 4, 4, FilterKind::None).unwrap();
    assert_eq!(buf, orig);
}

#[test]
fn transparent_pixels_stay_transparent() {
    let mut buf = vec![0u8, 0, 0, 0, 255, 0, 0, 255];
    apply_filter_rgba8_premul(&mut buf, 2, 1, FilterKind::Warm).unwrap();
    assert_eq!(&buf[..4], &[0, 0, 0, 0]);
    assert_eq!(&buf[4..], &[255, 0, 0, 255]);
}

#[test]
fn buffer_length_is_checked() {
    let mut buf = vec![0u8; 15];
    assert!(apply_filter_rgba8_premul(&mut buf, 2, 2, FilterKind::Sepia).is_err());
}

#[test]
fn surface_filter_applies_to_drawn_pixels() {
    let mut s = Surface::new(3, 2).unwrap();
    s.fill(Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    apply_filter(&mut s, FilterKind::Grayscale).unwrap();
    assert_eq!(s.pixel(2, 1), Some([54, 54, 54, 255]));
}

#[test]
fn ids_round_trip_and_toggle() {
    for kind in FILTER_LIST {
        assert_eq!(FilterKind::from_id(kind.id()), Some(kind));
    }
    assert_eq!(FilterKind::from_id("sparkle"), None);
    assert_eq!(FilterKind::None.toggled(FilterKind::Sepia), FilterKind::Sepia);
    assert_eq!(FilterKind::Sepia.toggled(FilterKind::Sepia), FilterKind::None);
    assert_eq!(FilterKind::Sepia.toggled(FilterKind::Cool), FilterKind::Cool);
}
