//! Clip shapes for the crop engine.
//!
//! A shape maps a `width x height` box to a closed [`ClipRegion`]. Shapes are defined in
//! normalized coordinates and rebuilt for every size; nothing is cached across sizes.

pub(crate) mod custom;
pub(crate) mod presets;
pub(crate) mod region;

pub use custom::{CustomPath, CustomShapeDef};
pub use presets::PresetShape;
pub use region::ClipRegion;

use crate::foundation::error::KropperResult;

#[derive(Clone, Debug, PartialEq)]
enum ShapeKind {
    Preset(PresetShape),
    Custom(CustomPath),
}

/// A named clip shape, either built in or derived from SVG path data.
#[derive(Clone, Debug, PartialEq)]
pub struct CropShape {
    name: String,
    kind: ShapeKind,
}

impl CropShape {
    /// Wrap a preset.
    pub fn preset(shape: PresetShape) -> Self {
        Self {
            name: shape.display_name().to_owned(),
            kind: ShapeKind::Preset(shape),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset id, or `None` for custom shapes.
    pub fn preset_id(&self) -> Option<&'static str> {
        match &self.kind {
            ShapeKind::Preset(p) => Some(p.id()),
            ShapeKind::Custom(_) => None,
        }
    }

    /// Return `true` for the plain rectangle, which needs no border overlay.
    pub fn is_rectangle(&self) -> bool {
        matches!(self.kind, ShapeKind::Preset(PresetShape::Rectangle))
    }

    /// `viewBox` attribute for custom shapes.
    pub fn view_box(&self) -> Option<String> {
        match &self.kind {
            ShapeKind::Preset(_) => None,
            ShapeKind::Custom(c) => Some(c.view_box()),
        }
    }

    /// Clip region for a `width x height` box.
    pub fn path(&self, width: f64, height: f64) -> ClipRegion {
        match &self.kind {
            ShapeKind::Preset(p) => p.region(width, height),
            ShapeKind::Custom(c) => c.region(width, height),
        }
    }
}

/// Build a shape from SVG path data authored in a `view_box_width x view_box_height` box.
pub fn custom_shape(
    name: impl Into<String>,
    svg_path: &str,
    view_box_width: f64,
    view_box_height: f64,
) -> KropperResult<CropShape> {
    Ok(CropShape {
        name: name.into(),
        kind: ShapeKind::Custom(CustomPath::parse(
            svg_path,
            view_box_width,
            view_box_height,
        )?),
    })
}

impl TryFrom<&CustomShapeDef> for CropShape {
    type Error = crate::foundation::error::KropperError;

    fn try_from(def: &CustomShapeDef) -> KropperResult<Self> {
        custom_shape(
            def.name.clone(),
            &def.path,
            def.view_box_width,
            def.view_box_height,
        )
    }
}

/// Catalog of preset shapes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeLibrary;

impl ShapeLibrary {
    /// Preset ids in catalog order.
    pub fn names() -> Vec<&'static str> {
        PresetShape::ALL.iter().map(|s| s.id()).collect()
    }

    /// Look up a preset shape by id.
    pub fn get(id: &str) -> Option<CropShape> {
        PresetShape::from_id(id).map(CropShape::preset)
    }

    /// Clip region for `shape_id`; unknown ids fall back to the full rectangle.
    pub fn clip_region(shape_id: &str, width: f64, height: f64) -> ClipRegion {
        match PresetShape::from_id(shape_id) {
            Some(p) => p.region(width, height),
            None => {
                tracing::debug!(shape_id, "unknown shape id, using full rectangle");
                ClipRegion::full(width, height)
            }
        }
    }

    /// Resolve a shape id, falling back to the rectangle preset.
    pub fn resolve(shape_id: &str) -> CropShape {
        Self::get(shape_id).unwrap_or_else(|| CropShape::preset(PresetShape::Rectangle))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/mod.rs"]
mod tests;
