use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Affine, BezPath},
        error::{KropperError, KropperResult},
    },
    shapes::region::ClipRegion,
};

/// Serializable definition of an SVG-path based clip shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomShapeDef {
    /// Display name.
    pub name: String,
    /// SVG path data in view-box units.
    pub path: String,
    /// View-box width the path was authored against.
    #[serde(default = "default_view_box")]
    pub view_box_width: f64,
    /// View-box height the path was authored against.
    #[serde(default = "default_view_box")]
    pub view_box_height: f64,
}

fn default_view_box() -> f64 {
    100.0
}

/// Parsed SVG path plus the view box it was authored in.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomPath {
    path: BezPath,
    view_box_width: f64,
    view_box_height: f64,
}

impl CustomPath {
    /// Parse `svg_path` and validate the view box.
    pub fn parse(svg_path: &str, view_box_width: f64, view_box_height: f64) -> KropperResult<Self> {
        for (label, v) in [("width", view_box_width), ("height", view_box_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(KropperError::validation(format!(
                    "custom shape view box {label} must be finite and > 0"
                )));
            }
        }
        let path = BezPath::from_svg(svg_path.trim())
            .map_err(|e| KropperError::validation(format!("invalid custom shape path: {e}")))?;
        if path.elements().is_empty() {
            return Err(KropperError::validation("custom shape path is empty"));
        }
        Ok(Self {
            path,
            view_box_width,
            view_box_height,
        })
    }

    /// `viewBox` attribute value, e.g. `"0 0 100 100"`.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.view_box_width, self.view_box_height)
    }

    /// Scale the path anisotropically onto a `width x height` box.
    pub fn region(&self, width: f64, height: f64) -> ClipRegion {
        let xf = Affine::scale_non_uniform(
            width / self.view_box_width,
            height / self.view_box_height,
        );
        ClipRegion::new(xf * self.path.clone())
    }
}
