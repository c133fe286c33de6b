use serde::{Deserialize, Serialize};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Width of the canonical placement space shared by every frame consumer.
pub const CANONICAL_WIDTH: f64 = 540.0;
/// Height of the canonical placement space shared by every frame consumer.
pub const CANONICAL_HEIGHT: f64 = 960.0;

/// The fixed 540x960 logical coordinate system in which person images and stickers are stored.
///
/// Every renderer (arrange preview, booth preview, booth capture, thumbnails) derives its scale
/// through [`CanonicalSpace::scale_for_width`] so that placements never drift between outputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanonicalSpace;

impl CanonicalSpace {
    /// Canonical space size in logical units.
    pub const SIZE: Size = Size::new(CANONICAL_WIDTH, CANONICAL_HEIGHT);

    /// Scale factor mapping canonical units onto a target whose width is `target_width` pixels.
    pub fn scale_for_width(target_width: f64) -> f64 {
        target_width / CANONICAL_WIDTH
    }

    /// Target height that keeps the canonical 9:16 aspect for `target_width`.
    pub fn height_for_width(target_width: f64) -> f64 {
        target_width * CANONICAL_HEIGHT / CANONICAL_WIDTH
    }

    /// Convert a delta measured in display pixels into canonical units.
    pub fn display_delta_to_canonical(delta: Vec2, display_scale: f64) -> Vec2 {
        if display_scale <= 0.0 || !display_scale.is_finite() {
            return Vec2::ZERO;
        }
        delta / display_scale
    }
}

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Full-canvas rectangle in pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A placed rectangle in canonical space with a rotation in degrees around its center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Left edge in canonical units.
    pub x: f64,
    /// Top edge in canonical units.
    pub y: f64,
    /// Width in canonical units.
    pub width: f64,
    /// Height in canonical units.
    pub height: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl Placement {
    /// Build a placement.
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
        }
    }

    /// Center point in canonical units.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Axis-aligned rectangle (before rotation) at `scale`.
    pub fn scaled_rect(&self, scale: f64) -> Rect {
        Rect::new(
            self.x * scale,
            self.y * scale,
            (self.x + self.width) * scale,
            (self.y + self.height) * scale,
        )
    }

    /// Transform mapping a `src_w x src_h` raster onto this placement at `scale`.
    ///
    /// Order: translate to the scaled center, rotate, then draw centered at `-size/2`.
    pub fn to_affine(&self, scale: f64, src_w: f64, src_h: f64) -> Affine {
        let c = self.center();
        let w = self.width * scale;
        let h = self.height * scale;
        let sx = if src_w > 0.0 { w / src_w } else { 0.0 };
        let sy = if src_h > 0.0 { h / src_h } else { 0.0 };

        Affine::translate(Vec2::new(c.x * scale, c.y * scale))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::translate(Vec2::new(-w / 2.0, -h / 2.0))
            * Affine::scale_non_uniform(sx, sy)
    }

    /// Merge a partial override onto this placement; unset fields keep their value.
    pub fn merged(mut self, patch: PlacementPatch) -> Self {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        self
    }

    /// Return `true` when `p` (canonical units) lies inside the rotated rectangle.
    pub fn contains(&self, p: Point) -> bool {
        let c = self.center();
        let local = Affine::rotate(-self.rotation.to_radians()) * (p - c.to_vec2());
        local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0
    }
}

/// Partial override for a [`Placement`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPatch {
    /// New left edge.
    pub x: Option<f64>,
    /// New top edge.
    pub y: Option<f64>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
}

impl PlacementPatch {
    /// Patch that moves only the top-left corner.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that changes only the size.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that changes only the rotation.
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Byte array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
