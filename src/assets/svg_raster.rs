use crate::{
    assets::{decode::PreparedSvg, store::PreparedImage},
    foundation::error::{KropperError, KropperResult},
};

/// Largest raster side allowed for an SVG rasterization.
const MAX_DIM: u32 = 16_384;
/// Largest raster area allowed for an SVG rasterization.
const MAX_PIXELS: u64 = 8_192 * 8_192;

/// Rasterize `tree` stretched to `width x height`, returning premultiplied RGBA8 bytes.
///
/// Sizes above `MAX_DIM` per side or `MAX_PIXELS` in total are rejected before anything is
/// allocated.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> KropperResult<Vec<u8>> {
    if width > MAX_DIM || height > MAX_DIM || u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(KropperError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| KropperError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Rasterize an SVG into a [`PreparedImage`] of the given size.
pub fn rasterize_svg(svg: &PreparedSvg, width: u32, height: u32) -> KropperResult<PreparedImage> {
    let data = rasterize_svg_to_premul_rgba8(&svg.tree, width, height)?;
    PreparedImage::from_premul(width, height, data)
}

/// Rasterize an SVG at its intrinsic document size.
pub fn rasterize_svg_intrinsic(svg: &PreparedSvg) -> KropperResult<PreparedImage> {
    let (w, h) = intrinsic_size(&svg.tree)?;
    rasterize_svg(svg, w, h)
}

fn intrinsic_size(tree: &usvg::Tree) -> KropperResult<(u32, u32)> {
    fn to_px(v: f32) -> KropperResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(KropperError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }
    let size = tree.size();
    Ok((to_px(size.width())?, to_px(size.height())?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
