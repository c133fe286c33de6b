use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect};

/// Closed clip path in surface pixel coordinates.
///
/// Filled with the non-zero winding rule.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipRegion(BezPath);

impl ClipRegion {
    /// Wrap an already closed path.
    pub fn new(path: BezPath) -> Self {
        Self(path)
    }

    /// Axis-aligned rectangle region.
    pub fn from_rect(rect: Rect) -> Self {
        Self(rect.to_path(0.1))
    }

    /// Full `width x height` rectangle anchored at the origin.
    pub fn full(width: f64, height: f64) -> Self {
        Self::from_rect(Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)))
    }

    /// Underlying path.
    pub fn path(&self) -> &BezPath {
        &self.0
    }

    /// Consume into the underlying path.
    pub fn into_path(self) -> BezPath {
        self.0
    }

    /// Tight bounding box.
    pub fn bounds(&self) -> Rect {
        self.0.bounding_box()
    }

    /// Non-zero winding containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.0.contains(p)
    }

    /// SVG path data (`d` attribute) for the region.
    pub fn to_svg(&self) -> String {
        self.0.to_svg()
    }
}

impl From<BezPath> for ClipRegion {
    fn from(value: BezPath) -> Self {
        Self(value)
    }
}
