use crate::foundation::{
    error::{KropperError, KropperResult},
    math::mul_div255_u8,
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for a single premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst`, both premultiplied RGBA8 of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> KropperResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(KropperError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every channel of `src` by the alpha of the matching `mask` pixel, in place.
///
/// Pixels outside the mask become fully transparent; antialiased mask edges give partial
/// coverage.
pub fn mask_alpha_in_place(src: &mut [u8], mask: &[u8]) -> KropperResult<()> {
    if src.len() != mask.len() || !src.len().is_multiple_of(4) {
        return Err(KropperError::render(
            "mask_alpha_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (s, m) in src.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = u16::from(m[3]);
        match w {
            255 => {}
            0 => s.fill(0),
            _ => {
                for c in s.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), w);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
