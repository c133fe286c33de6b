use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn clamp_channel_saturates_and_rounds() {
    assert_eq!(clamp_channel(-3.0), 0);
    assert_eq!(clamp_channel(300.0), 255);
    assert_eq!(clamp_channel(54.2), 54);
    assert_eq!(clamp_channel(f32::NAN), 0);
}

#[test]
fn opaque_pixels_survive_premul_roundtrip() {
    let mut px = vec![12u8, 200, 99, 255, 0, 0, 0, 0];
    let orig = px.clone();
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, orig);
}

#[test]
fn transparent_pixels_become_zero() {
    let mut px = vec![50u8, 60, 70, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0]);
}
