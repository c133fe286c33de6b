use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    assets::encode::DEFAULT_JPEG_QUALITY,
    foundation::{
        core::{CANONICAL_HEIGHT, CANONICAL_WIDTH, Canvas},
        error::{KropperError, KropperResult},
    },
    shapes::CustomShapeDef,
};

/// Environment variable overriding [`BoothOptions::jpeg_quality`].
pub const JPEG_QUALITY_ENV: &str = "KROPPER_JPEG_QUALITY";

/// Options for one crop engine instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropOptions {
    /// Width over height of the crop canvas the host should allocate.
    pub aspect_ratio: f64,
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Zoom applied on load and on reset.
    pub initial_zoom: f64,
    /// Draw the composition grid overlay.
    pub show_grid: bool,
    /// Number of grid cells per axis.
    pub grid_lines: u32,
    /// Preset shape id.
    pub shape: String,
    /// Zoom change per wheel notch.
    pub wheel_step: f64,
    /// Keep zoom at or above `1.0` so the image always covers the canvas.
    pub enforce_coverage: bool,
    /// SVG-path shape that takes priority over `shape`.
    pub custom_shape: Option<CustomShapeDef>,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            initial_zoom: 1.0,
            show_grid: true,
            grid_lines: 3,
            shape: "rectangle".to_owned(),
            wheel_step: 0.1,
            enforce_coverage: true,
            custom_shape: None,
        }
    }
}

impl CropOptions {
    /// Return options with a different zoom range.
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Return options with a different initial zoom.
    pub fn with_initial_zoom(mut self, initial_zoom: f64) -> Self {
        self.initial_zoom = initial_zoom;
        self
    }

    /// Return options with a different preset shape.
    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = shape.into();
        self
    }

    /// Return options with a custom shape override.
    pub fn with_custom_shape(mut self, custom: Option<CustomShapeDef>) -> Self {
        self.custom_shape = custom;
        self
    }

    /// Return options with the grid overlay configured.
    pub fn with_grid(mut self, show: bool, lines: u32) -> Self {
        self.show_grid = show;
        self.grid_lines = lines;
        self
    }

    /// Return options with the coverage floor toggled.
    pub fn with_enforce_coverage(mut self, enforce: bool) -> Self {
        self.enforce_coverage = enforce;
        self
    }

    /// Inclusive zoom range actually applied by the engine.
    ///
    /// With `enforce_coverage` the lower bound is raised to `1.0` (never above `max_zoom`).
    pub fn zoom_bounds(&self) -> (f64, f64) {
        let lo = if self.enforce_coverage {
            self.min_zoom.max(1.0).min(self.max_zoom)
        } else {
            self.min_zoom
        };
        (lo, self.max_zoom)
    }

    /// Clamp `zoom` into [`CropOptions::zoom_bounds`]. Non-finite input yields the initial zoom.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let (lo, hi) = self.zoom_bounds();
        if !zoom.is_finite() {
            return self.initial_zoom.clamp(lo, hi);
        }
        zoom.clamp(lo, hi)
    }

    /// Canvas size of `width` pixels wide at this aspect ratio.
    pub fn canvas_for_width(&self, width: u32) -> Canvas {
        let h = (f64::from(width) / self.aspect_ratio).round().max(1.0) as u32;
        Canvas::new(width, h)
    }

    /// Check value ranges.
    pub fn validate(&self) -> KropperResult<()> {
        let finite = [
            ("aspectRatio", self.aspect_ratio),
            ("minZoom", self.min_zoom),
            ("maxZoom", self.max_zoom),
            ("initialZoom", self.initial_zoom),
            ("wheelStep", self.wheel_step),
        ];
        for (name, v) in finite {
            if !v.is_finite() || v <= 0.0 {
                return Err(KropperError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(KropperError::validation(format!(
                "minZoom ({}) must not exceed maxZoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.initial_zoom < self.min_zoom || self.initial_zoom > self.max_zoom {
            return Err(KropperError::validation(format!(
                "initialZoom ({}) must lie within [{}, {}]",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if self.grid_lines == 0 {
            return Err(KropperError::validation("gridLines must be >= 1"));
        }
        Ok(())
    }
}

/// Options for the photo booth compositor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoothOptions {
    /// Width of the captured still.
    pub capture_width: u32,
    /// Height of the captured still.
    pub capture_height: u32,
    /// Preview surface size relative to the capture size.
    pub preview_scale: f64,
    /// JPEG quality for captured stills (1..=100).
    pub jpeg_quality: u8,
    /// Resolution hint passed to the camera.
    pub ideal_video_width: u32,
    /// Resolution hint passed to the camera.
    pub ideal_video_height: u32,
}

impl Default for BoothOptions {
    fn default() -> Self {
        Self {
            capture_width: 1080,
            capture_height: 1920,
            preview_scale: 0.3,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            ideal_video_width: 1280,
            ideal_video_height: 720,
        }
    }
}

impl BoothOptions {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `KROPPER_JPEG_QUALITY` when it holds an integer in `1..=100`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup` (keyed by environment variable name).
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(q) = lookup(JPEG_QUALITY_ENV)
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|q| (1..=100).contains(q))
        {
            self.jpeg_quality = q;
        }
        self
    }

    /// Return options with a different JPEG quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Return options with a different preview scale.
    pub fn with_preview_scale(mut self, scale: f64) -> Self {
        self.preview_scale = scale;
        self
    }

    /// Full-resolution capture canvas.
    pub fn capture_canvas(&self) -> Canvas {
        Canvas::new(self.capture_width, self.capture_height)
    }

    /// Live preview canvas (`capture * preview_scale`, rounded).
    pub fn preview_canvas(&self) -> Canvas {
        let w = (f64::from(self.capture_width) * self.preview_scale).round() as u32;
        let h = (f64::from(self.capture_height) * self.preview_scale).round() as u32;
        Canvas::new(w, h)
    }

    /// Check value ranges.
    pub fn validate(&self) -> KropperResult<()> {
        if self.capture_width == 0 || self.capture_height == 0 {
            return Err(KropperError::validation("capture size must be non-zero"));
        }
        // Canonical placements only line up when the capture shares the 540x960 aspect.
        let lhs = u64::from(self.capture_width) * CANONICAL_HEIGHT as u64;
        let rhs = u64::from(self.capture_height) * CANONICAL_WIDTH as u64;
        if lhs != rhs {
            return Err(KropperError::validation(format!(
                "capture size {}x{} must have a 9:16 aspect ratio",
                self.capture_width, self.capture_height
            )));
        }
        if !self.preview_scale.is_finite() || self.preview_scale <= 0.0 {
            return Err(KropperError::validation("previewScale must be finite and > 0"));
        }
        if self.preview_canvas().is_empty() {
            return Err(KropperError::validation("preview canvas would be empty"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(KropperError::validation("jpegQuality must be within 1..=100"));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KropperConfig {
    /// Crop engine options.
    pub crop: CropOptions,
    /// Photo booth options.
    pub booth: BoothOptions,
}

impl KropperConfig {
    /// Parse and validate configuration JSON.
    pub fn from_json_str(s: &str) -> KropperResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| KropperError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate configuration JSON from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KropperResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| KropperError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a configuration file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KropperResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KropperError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate both sections.
    pub fn validate(&self) -> KropperResult<()> {
        self.crop.validate()?;
        self.booth.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
