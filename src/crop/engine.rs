use crate::{
    assets::{
        encode::{DEFAULT_JPEG_QUALITY, EncodedImage, ExportFormat},
        source::{DataUrlLoader, ImageLoader, ImageSource},
        store::PreparedImage,
    },
    config::options::CropOptions,
    crop::{
        geometry,
        gesture::{GestureEffect, GestureTracker, InputEvent},
    },
    foundation::{
        core::{Canvas, Rect, Size, Vec2},
        error::{KropperError, KropperResult},
    },
    render::{painter::Painter, scheduler::AnimationFrames, surface::Surface},
    shapes::{ClipRegion, CropShape, ShapeLibrary},
};

/// Snapshot of the engine's interactive state.
#[derive(Clone, Debug, PartialEq)]
pub struct CropState {
    /// Pan offset relative to the centered image, in canvas pixels.
    pub position: Vec2,
    /// Current zoom factor.
    pub zoom: f64,
    /// A drag gesture is in progress.
    pub is_dragging: bool,
    /// Active preset shape id (the custom shape, when set, overrides it for drawing).
    pub shape: String,
}

/// Interactive crop engine: one canvas, one image, pan, zoom and a clip shape.
///
/// Mutations only schedule a redraw; the host calls [`Kropper::on_animation_frame`] to draw, so
/// any number of gestures between frames collapse into a single redraw.
pub struct Kropper {
    options: CropOptions,
    surface: Surface,
    painter: Painter,
    frames: AnimationFrames,
    loader: Box<dyn ImageLoader>,

    image: Option<PreparedImage>,
    position: Vec2,
    zoom: f64,
    shape_id: String,
    custom_shape: Option<CropShape>,
    gesture: GestureTracker,
    destroyed: bool,
}

impl std::fmt::Debug for Kropper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kropper")
            .field("canvas", &self.surface.canvas())
            .field("has_image", &self.image.is_some())
            .field("position", &self.position)
            .field("zoom", &self.zoom)
            .field("shape", &self.shape_id)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl Kropper {
    /// Create an engine drawing into a `canvas`-sized surface. Only `data:` URLs can be loaded;
    /// use [`Kropper::with_loader`] for other sources.
    pub fn new(canvas: Canvas, options: CropOptions) -> KropperResult<Self> {
        Self::with_loader(canvas, options, DataUrlLoader)
    }

    /// Create an engine resolving image URLs through `loader`.
    pub fn with_loader(
        canvas: Canvas,
        options: CropOptions,
        loader: impl ImageLoader + 'static,
    ) -> KropperResult<Self> {
        options.validate()?;
        let custom_shape = options
            .custom_shape
            .as_ref()
            .map(CropShape::try_from)
            .transpose()?;
        let zoom = options.clamp_zoom(options.initial_zoom);
        Ok(Self {
            surface: Surface::for_canvas(canvas)?,
            painter: Painter::new(),
            frames: AnimationFrames::new(),
            loader: Box::new(loader),
            image: None,
            position: Vec2::ZERO,
            zoom,
            shape_id: options.shape.clone(),
            custom_shape,
            gesture: GestureTracker::default(),
            destroyed: false,
            options,
        })
    }

    /// Load and show a new image, resetting pan and zoom.
    ///
    /// On failure the previous image and view are left untouched.
    #[tracing::instrument(skip_all)]
    pub fn set_image(&mut self, src: ImageSource) -> KropperResult<()> {
        if self.destroyed {
            return Err(KropperError::validation("crop engine was destroyed"));
        }
        let image = self.loader.load(&src).inspect_err(|err| {
            tracing::warn!(%err, "failed to load image");
        })?;
        tracing::debug!(width = image.width, height = image.height, "image loaded");

        self.image = Some(image);
        self.position = Vec2::ZERO;
        self.zoom = self.options.clamp_zoom(self.options.initial_zoom);
        self.frames.request();
        Ok(())
    }

    /// Render the visible region at canvas resolution, clipped by the shape, and encode it.
    ///
    /// Returns `None` when no image is loaded or export fails.
    #[tracing::instrument(skip(self))]
    pub fn crop(&mut self, mime: &str) -> Option<EncodedImage> {
        let image = self.image.as_ref()?;
        let mut out = match Surface::new(self.surface.width(), self.surface.height()) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "failed to allocate crop surface");
                return None;
            }
        };
        let clip = self.clip_region();
        let transform = geometry::image_transform(image_size(image), self.image_rect());
        let format = ExportFormat::from_mime(mime, DEFAULT_JPEG_QUALITY);

        let result = self
            .painter
            .draw_image(&mut out, image, transform, clip.as_ref())
            .and_then(|()| out.encode(format));
        match result {
            Ok(encoded) => Some(encoded),
            Err(err) => {
                tracing::warn!(%err, "crop export failed");
                None
            }
        }
    }

    /// Return pan to the origin and zoom to its initial value.
    pub fn reset(&mut self) {
        if self.destroyed {
            return;
        }
        self.position = Vec2::ZERO;
        self.zoom = self.options.clamp_zoom(self.options.initial_zoom);
        self.frames.request();
    }

    /// Set the zoom (clamped), re-constrain pan and schedule a redraw.
    pub fn set_zoom(&mut self, zoom: f64) {
        if self.destroyed {
            return;
        }
        self.zoom = self.options.clamp_zoom(zoom);
        self.constrain();
        self.frames.request();
    }

    /// Switch the preset clip shape for subsequent draws and exports.
    pub fn set_shape(&mut self, shape_id: impl Into<String>) {
        if self.destroyed {
            return;
        }
        self.shape_id = shape_id.into();
        self.frames.request();
    }

    /// Override (or clear) the custom shape, which takes priority over the preset.
    pub fn set_custom_shape(&mut self, shape: Option<CropShape>) {
        if self.destroyed {
            return;
        }
        self.custom_shape = shape;
        self.frames.request();
    }

    /// Current interactive state.
    pub fn state(&self) -> CropState {
        CropState {
            position: self.position,
            zoom: self.zoom,
            is_dragging: self.gesture.is_dragging(),
            shape: self.shape_id.clone(),
        }
    }

    /// Feed one input event. Returns `true` when the event changed pan or zoom.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if self.destroyed {
            return false;
        }
        let before = (self.position, self.zoom);
        match self.gesture.handle(event, self.position) {
            GestureEffect::None => return false,
            GestureEffect::PanTo(p) => {
                self.position = p;
                self.constrain();
            }
            GestureEffect::WheelStep(sign) => {
                let zoom = self.options.clamp_zoom(self.zoom + sign * self.options.wheel_step);
                if zoom == self.zoom {
                    return false;
                }
                self.zoom = zoom;
                self.constrain();
            }
            GestureEffect::Pinch { scale, pan } => {
                if let Some(scale) = scale {
                    self.zoom = self.options.clamp_zoom(self.zoom * scale);
                    self.constrain();
                }
                self.position += pan;
                self.constrain();
            }
        }
        // Image-less engines still track state but never draw.
        self.frames.request();
        (self.position, self.zoom) != before
    }

    /// Deliver an animation frame. Draws only when a redraw was requested; returns `true` if it
    /// drew.
    pub fn on_animation_frame(&mut self) -> bool {
        if self.destroyed || self.frames.take_due().is_none() {
            return false;
        }
        match self.draw() {
            Ok(drew) => drew,
            Err(err) => {
                tracing::warn!(%err, "crop redraw failed");
                false
            }
        }
    }

    /// Detach from input, cancel pending frames and drop the image. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.frames.cancel_all();
        self.gesture.reset();
        self.image = None;
        self.destroyed = true;
        tracing::debug!("crop engine destroyed");
    }

    /// Return `true` after [`Kropper::destroy`].
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Return `true` when a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.frames.is_pending()
    }

    /// Loaded image, if any.
    pub fn image(&self) -> Option<&PreparedImage> {
        self.image.as_ref()
    }

    /// Drawing surface (the on-screen canvas).
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.surface.canvas()
    }

    /// Options the engine was created with.
    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    /// Where the image is drawn on the canvas; empty without an image.
    pub fn image_rect(&self) -> Rect {
        let Some(image) = &self.image else {
            return Rect::ZERO;
        };
        let canvas = canvas_size(self.surface.canvas());
        let drawn = geometry::cover_size(canvas, image_size(image), self.zoom);
        geometry::image_rect(canvas, drawn, self.position)
    }

    /// Active shape: the custom override if set, otherwise the preset (rectangle fallback).
    pub fn shape(&self) -> CropShape {
        match &self.custom_shape {
            Some(s) => s.clone(),
            None => ShapeLibrary::resolve(&self.shape_id),
        }
    }

    /// Clip region for the current shape, `None` for the full-canvas rectangle.
    fn clip_region(&self) -> Option<ClipRegion> {
        let shape = self.shape();
        if shape.is_rectangle() {
            return None;
        }
        let c = self.surface.canvas();
        Some(shape.path(f64::from(c.width), f64::from(c.height)))
    }

    fn constrain(&mut self) {
        let Some(image) = &self.image else {
            return;
        };
        let canvas = canvas_size(self.surface.canvas());
        let drawn = geometry::cover_size(canvas, image_size(image), self.zoom);
        self.position = geometry::constrain(self.position, canvas, drawn);
    }

    fn draw(&mut self) -> KropperResult<bool> {
        self.surface.clear();
        let Some(image) = &self.image else {
            return Ok(false);
        };
        let transform = geometry::image_transform(image_size(image), self.image_rect());
        let clip = self.clip_region();
        self.painter
            .draw_image(&mut self.surface, image, transform, clip.as_ref())?;
        Ok(true)
    }
}

fn image_size(image: &PreparedImage) -> Size {
    Size::new(f64::from(image.width), f64::from(image.height))
}

fn canvas_size(canvas: Canvas) -> Size {
    Size::new(f64::from(canvas.width), f64::from(canvas.height))
}

#[cfg(test)]
#[path = "../../tests/unit/crop/engine.rs"]
mod tests;
