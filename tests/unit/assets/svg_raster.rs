use super::*;
use crate::assets::{decode::parse_svg, source::decode_any};

const RED_SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

#[test]
fn rasterize_fills_pixels() {
    let svg = parse_svg(RED_SQUARE).unwrap();
    let img = rasterize_svg(&svg, 4, 4).unwrap();
    assert_eq!((img.width, img.height), (4, 4));
    assert_eq!(img.pixel(2, 2), Some([255, 0, 0, 255]));

    let intrinsic = rasterize_svg_intrinsic(&svg).unwrap();
    assert_eq!((intrinsic.width, intrinsic.height), (10, 10));
}

#[test]
fn oversized_rasters_are_rejected() {
    let svg = parse_svg(RED_SQUARE).unwrap();
    assert!(rasterize_svg(&svg, MAX_DIM + 1, 4).is_err());
    assert!(rasterize_svg(&svg, 4, MAX_DIM + 1).is_err());
    assert!(rasterize_svg(&svg, MAX_DIM, MAX_DIM).is_err());
    assert!(rasterize_svg(&svg, 0, 4).is_err());
}

#[test]
fn huge_declared_svg_size_fails_to_decode() {
    let huge = br##"<svg xmlns="http://www.w3.org/2000/svg" width="60000" height="60000" viewBox="0 0 10 10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;
    let err = decode_any(huge).unwrap_err();
    assert!(err.to_string().contains("too large"), "{err}");

    let wide = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20000" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;
    assert!(decode_any(wide).is_err());
}
