use kurbo::Line;

use crate::{
    assets::{
        encode::EncodedImage,
        source::{DataUrlLoader, ImageLoader, ImageSource},
    },
    config::options::CropOptions,
    crop::{engine::Kropper, gesture::InputEvent},
    foundation::{
        core::{Canvas, Point, Rgba8Premul},
        error::{KropperError, KropperResult},
    },
    render::{painter::Painter, surface::Surface},
};

const GRID_LINE_WIDTH: f64 = 1.0;
const BORDER_LIGHT_WIDTH: f64 = 2.0;
const BORDER_DARK_WIDTH: f64 = 3.0;
const BORDER_DASH: [f64; 2] = [5.0, 5.0];

/// Imperative commands a parent drives a crop widget with.
pub trait CropHandle {
    /// Export the visible region; `None` when there is nothing to export.
    fn crop(&mut self, mime: &str) -> Option<EncodedImage>;
    /// Return pan and zoom to their initial values.
    fn reset(&mut self);
    /// Set the zoom factor (clamped).
    fn set_zoom(&mut self, zoom: f64);
    /// Switch the clip shape.
    fn set_shape(&mut self, shape_id: &str);
    /// Load a new image.
    fn set_image(&mut self, src: ImageSource) -> KropperResult<()>;
}

/// Lifecycle wrapper around one [`Kropper`] plus a non-interactive overlay surface.
///
/// The overlay carries the composition grid and, for non-rectangular shapes, a dashed outline of
/// the clip. It is drawn separately so it never ends up in exports.
#[derive(Debug)]
pub struct CropWidget {
    engine: Option<Kropper>,
    src: Option<ImageSource>,
    overlay: Surface,
    painter: Painter,
    show_grid: bool,
    grid_cells: u32,
    show_shape_border: bool,
    overlay_dirty: bool,
}

impl CropWidget {
    /// Mount a widget on a `canvas`-sized surface, loading `data:` URLs only.
    pub fn mount(canvas: Canvas, options: CropOptions) -> KropperResult<Self> {
        Self::mount_with_loader(canvas, options, DataUrlLoader)
    }

    /// Mount a widget whose engine resolves URLs through `loader`.
    pub fn mount_with_loader(
        canvas: Canvas,
        options: CropOptions,
        loader: impl ImageLoader + 'static,
    ) -> KropperResult<Self> {
        let show_grid = options.show_grid;
        let grid_cells = options.grid_lines;
        let engine = Kropper::with_loader(canvas, options, loader)?;
        tracing::debug!(width = canvas.width, height = canvas.height, "crop widget mounted");
        Ok(Self {
            engine: Some(engine),
            src: None,
            overlay: Surface::for_canvas(canvas)?,
            painter: Painter::new(),
            show_grid,
            grid_cells,
            show_shape_border: true,
            overlay_dirty: true,
        })
    }

    /// Toggle the dashed shape outline.
    pub fn with_shape_border(mut self, show: bool) -> Self {
        self.show_shape_border = show;
        self.overlay_dirty = true;
        self
    }

    /// Forward a changed `src` to the engine. Returns `Ok(true)` when an image was loaded.
    ///
    /// Passing the current source again, or `None`, does nothing. A failed load leaves the
    /// previous source recorded so the same value can be retried.
    pub fn set_src(&mut self, src: Option<ImageSource>) -> KropperResult<bool> {
        if src == self.src {
            return Ok(false);
        }
        let Some(next) = src else {
            self.src = None;
            return Ok(false);
        };
        self.engine_mut()?.set_image(next.clone())?;
        self.src = Some(next);
        Ok(true)
    }

    /// Destroy the engine. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            self.src = None;
            tracing::debug!("crop widget unmounted");
        }
    }

    /// Return `true` while the engine is alive.
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    /// The mounted engine.
    pub fn engine(&self) -> Option<&Kropper> {
        self.engine.as_ref()
    }

    /// Forward an input event to the engine.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.engine
            .as_mut()
            .is_some_and(|engine| engine.handle_event(event))
    }

    /// Deliver an animation frame to the engine and refresh the overlay if needed.
    ///
    /// Returns `true` when anything was drawn.
    pub fn on_animation_frame(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let drew = engine.on_animation_frame();
        if !self.overlay_dirty {
            return drew;
        }
        match self.render_overlay() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "crop overlay redraw failed");
                drew
            }
        }
    }

    /// Overlay surface (grid and shape outline).
    pub fn overlay(&self) -> &Surface {
        &self.overlay
    }

    /// Redraw the overlay for the current shape.
    pub fn render_overlay(&mut self) -> KropperResult<()> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| KropperError::validation("crop widget is not mounted"))?;
        let shape = engine.shape();
        let canvas = engine.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));

        self.overlay.clear();
        if self.show_grid {
            let color = Rgba8Premul::from_straight_rgba(255, 255, 255, 128);
            for line in grid_lines(canvas, self.grid_cells) {
                self.painter
                    .stroke_line(&mut self.overlay, line.p0, line.p1, GRID_LINE_WIDTH, color)?;
            }
        }
        if self.show_shape_border && !shape.is_rectangle() {
            let outline = shape.path(w, h).into_path();
            self.painter.stroke_path(
                &mut self.overlay,
                &outline,
                &kurbo::Stroke::new(BORDER_LIGHT_WIDTH),
                Rgba8Premul::from_straight_rgba(255, 255, 255, 204),
            )?;
            self.painter.stroke_path(
                &mut self.overlay,
                &outline,
                &kurbo::Stroke::new(BORDER_DARK_WIDTH).with_dashes(0.0, BORDER_DASH),
                Rgba8Premul::from_straight_rgba(0, 0, 0, 77),
            )?;
        }
        self.overlay_dirty = false;
        Ok(())
    }

    fn engine_mut(&mut self) -> KropperResult<&mut Kropper> {
        self.engine
            .as_mut()
            .ok_or_else(|| KropperError::validation("crop widget is not mounted"))
    }
}

impl Drop for CropWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl CropHandle for CropWidget {
    fn crop(&mut self, mime: &str) -> Option<EncodedImage> {
        self.engine.as_mut()?.crop(mime)
    }

    fn reset(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_zoom(zoom);
        }
    }

    fn set_shape(&mut self, shape_id: &str) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_shape(shape_id);
            self.overlay_dirty = true;
        }
    }

    fn set_image(&mut self, src: ImageSource) -> KropperResult<()> {
        self.engine_mut()?.set_image(src)
    }
}

/// Inner grid lines splitting `canvas` into `cells x cells` equal parts: `cells - 1` vertical
/// lines followed by `cells - 1` horizontal ones.
pub fn grid_lines(canvas: Canvas, cells: u32) -> Vec<Line> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let n = f64::from(cells);
    let inner = 1..cells;
    let vertical = inner.clone().map(|i| {
        let x = w / n * f64::from(i);
        Line::new(Point::new(x, 0.0), Point::new(x, h))
    });
    let horizontal = inner.map(|i| {
        let y = h / n * f64::from(i);
        Line::new(Point::new(0.0, y), Point::new(w, y))
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/crop/widget.rs"]
mod tests;
