//! Cover-fit geometry for the crop engine.

use crate::foundation::core::{Affine, Rect, Size, Vec2};

/// Size of the image drawn at `zoom`.
///
/// At `zoom = 1` the image covers the canvas: when the image is relatively wider than the canvas
/// its height matches the canvas height, otherwise its width matches the canvas width.
pub fn cover_size(canvas: Size, image: Size, zoom: f64) -> Size {
    if image.width <= 0.0 || image.height <= 0.0 || canvas.height <= 0.0 {
        return Size::ZERO;
    }
    let canvas_ratio = canvas.width / canvas.height;
    let image_ratio = image.width / image.height;
    if image_ratio > canvas_ratio {
        let h = canvas.height * zoom;
        Size::new(h * image_ratio, h)
    } else {
        let w = canvas.width * zoom;
        Size::new(w, w / image_ratio)
    }
}

/// Largest pan offset on each axis that keeps the canvas covered.
pub fn max_offset(canvas: Size, drawn: Size) -> Vec2 {
    Vec2::new(
        ((drawn.width - canvas.width) / 2.0).max(0.0),
        ((drawn.height - canvas.height) / 2.0).max(0.0),
    )
}

/// Clamp `position` into `[-max, max]` on both axes.
pub fn constrain(position: Vec2, canvas: Size, drawn: Size) -> Vec2 {
    let m = max_offset(canvas, drawn);
    Vec2::new(
        position.x.clamp(-m.x, m.x),
        position.y.clamp(-m.y, m.y),
    )
}

/// Rectangle the image occupies on the canvas: centered, then shifted by `position`.
pub fn image_rect(canvas: Size, drawn: Size, position: Vec2) -> Rect {
    let x = (canvas.width - drawn.width) / 2.0 + position.x;
    let y = (canvas.height - drawn.height) / 2.0 + position.y;
    Rect::new(x, y, x + drawn.width, y + drawn.height)
}

/// Transform mapping image pixels onto `rect`.
pub fn image_transform(image: Size, rect: Rect) -> Affine {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Affine::scale(0.0);
    }
    Affine::translate(rect.origin().to_vec2())
        * Affine::scale_non_uniform(rect.width() / image.width, rect.height() / image.height)
}

/// Return `true` when `rect` contains the whole canvas (up to `eps`).
pub fn covers(rect: Rect, canvas: Size, eps: f64) -> bool {
    rect.x0 <= eps
        && rect.y0 <= eps
        && rect.x1 >= canvas.width - eps
        && rect.y1 >= canvas.height - eps
}

/// Source rectangle for drawing a `source`-sized frame cover-fit into `target`.
///
/// The source is cropped symmetrically on the axis that overflows.
pub fn cover_source_rect(source: Size, target: Size) -> Rect {
    if source.width <= 0.0 || source.height <= 0.0 || target.width <= 0.0 || target.height <= 0.0
    {
        return Rect::ZERO;
    }
    let source_ratio = source.width / source.height;
    let target_ratio = target.width / target.height;
    if source_ratio > target_ratio {
        let sw = source.height * target_ratio;
        let sx = (source.width - sw) / 2.0;
        Rect::new(sx, 0.0, sx + sw, source.height)
    } else {
        let sh = source.width / target_ratio;
        let sy = (source.height - sh) / 2.0;
        Rect::new(0.0, sy, source.width, sy + sh)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/geometry.rs"]
mod tests;
