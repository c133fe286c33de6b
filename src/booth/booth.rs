use crate::{
    assets::{
        encode::ExportFormat,
        source::ImageLoader,
    },
    booth::compositor::{FrameImages, Scene, compose_scene, preload_frame_images, render_thumbnail},
    camera::{
        device::{Facing, MediaDevices},
        service::{Camera, CameraSession},
    },
    config::options::BoothOptions,
    filters::FilterKind,
    foundation::{
        clock::{Clock, SystemClock},
        core::CanonicalSpace,
        error::KropperResult,
    },
    frame::{CustomFrame, Sticker, StickerBoard},
    render::{painter::Painter, scheduler::AnimationFrames, surface::Surface},
};

/// Commands a parent drives the booth with.
pub trait BoothHandle {
    /// Open the booth: start the front camera and the preview loop. Returns `true` when streaming.
    fn open(&mut self) -> bool;
    /// Close the booth: cancel the preview loop and release the camera.
    fn close(&mut self);
    /// Take a full-resolution still; returns a JPEG data URL.
    fn capture(&mut self) -> Option<String>;
    /// Discard the still and resume the preview.
    fn retake(&mut self);
}

type CaptureCallback = Box<dyn FnMut(&str)>;

/// Live camera preview with a frame overlay, filters and stickers.
///
/// The preview loop runs on host-delivered animation frames while the booth is open and no still
/// is held. Captures render the same scene onto their own full-resolution surface.
pub struct PhotoBooth<D: MediaDevices> {
    options: BoothOptions,
    camera: Camera<D>,
    frames: Vec<CustomFrame>,
    images: FrameImages,
    selected: usize,
    filter: FilterKind,
    stickers: StickerBoard,
    preview: Surface,
    painter: Painter,
    scheduler: AnimationFrames,
    is_open: bool,
    captured: Option<String>,
    on_capture: Option<CaptureCallback>,
    clock: Box<dyn Clock>,
}

impl<D: MediaDevices> std::fmt::Debug for PhotoBooth<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoBooth")
            .field("is_open", &self.is_open)
            .field("frames", &self.frames.len())
            .field("selected", &self.selected)
            .field("filter", &self.filter)
            .field("captured", &self.captured.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: MediaDevices> PhotoBooth<D> {
    /// Closed booth over `frames` using camera `devices`.
    pub fn new(devices: D, frames: Vec<CustomFrame>, options: BoothOptions) -> KropperResult<Self> {
        options.validate()?;
        let camera = Camera::new(devices)
            .with_ideal_resolution(options.ideal_video_width, options.ideal_video_height)
            .with_jpeg_quality(options.jpeg_quality);
        Ok(Self {
            preview: Surface::for_canvas(options.preview_canvas())?,
            options,
            camera,
            frames,
            images: FrameImages::new(),
            selected: 0,
            filter: FilterKind::None,
            stickers: StickerBoard::new(),
            painter: Painter::new(),
            scheduler: AnimationFrames::new(),
            is_open: false,
            captured: None,
            on_capture: None,
            clock: Box::new(SystemClock),
        })
    }

    /// Return a booth stamping downloads with `clock`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Register a callback receiving each captured data URL.
    pub fn on_capture(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_capture = Some(Box::new(callback));
        self
    }

    /// Load the cut-outs of every frame through `loader`. Returns how many loaded.
    pub fn preload_images(&mut self, loader: &dyn ImageLoader) -> usize {
        self.images = preload_frame_images(&self.frames, loader);
        self.images.len()
    }

    /// Start the camera facing the user and schedule the first preview frame.
    pub fn open(&mut self) -> bool {
        self.is_open = true;
        self.captured = None;
        let streaming = self.camera.start_camera(Facing::User);
        self.scheduler.request();
        tracing::debug!(streaming, "photo booth opened");
        streaming
    }

    /// Cancel the preview loop, release the camera and drop any held still.
    pub fn close(&mut self) {
        if self.scheduler.cancel_all() {
            tracing::debug!("photo booth preview loop cancelled");
        }
        self.camera.stop_camera();
        self.is_open = false;
        self.captured = None;
    }

    /// Return `true` between [`PhotoBooth::open`] and [`PhotoBooth::close`].
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Return `true` while a preview frame is scheduled.
    pub fn is_previewing(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Deliver an animation frame. Returns `true` when the preview was redrawn.
    ///
    /// While the camera has no data yet nothing is drawn but the next frame is still scheduled.
    /// The loop ends once the booth is closed or a still is held.
    pub fn on_animation_frame(&mut self) -> bool {
        if self.scheduler.take_due().is_none() {
            return false;
        }
        if !self.is_open || self.captured.is_some() {
            return false;
        }
        let drew = match self.camera.current_frame() {
            Some(video) => {
                let scene = Scene {
                    video: Some(&video),
                    mirror: self.camera.facing().is_mirrored(),
                    filter: self.filter,
                    frame: self.frames.get(self.selected),
                    images: &self.images,
                    stickers: self.stickers.stickers(),
                };
                match compose_scene(&mut self.painter, &mut self.preview, &scene) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(%err, "preview composite failed");
                        false
                    }
                }
            }
            None => false,
        };
        self.scheduler.request();
        drew
    }

    /// Render the scene once at capture resolution and encode it as JPEG.
    ///
    /// Stops the preview loop and notifies the capture callback. Returns `None` when the booth is
    /// closed, the camera has no frame, or rendering fails.
    #[tracing::instrument(skip(self))]
    pub fn capture(&mut self) -> Option<String> {
        if !self.is_open || !self.camera.is_streaming() {
            return None;
        }
        let url = match self.render_capture() {
            Ok(Some(url)) => url,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(%err, "photo booth capture failed");
                return None;
            }
        };
        self.scheduler.cancel_all();
        self.captured = Some(url.clone());
        if let Some(cb) = self.on_capture.as_mut() {
            cb(&url);
        }
        Some(url)
    }

    /// Drop the held still and restart the preview loop.
    pub fn retake(&mut self) {
        self.captured = None;
        if self.is_open {
            self.scheduler.request();
        }
    }

    /// Captured still, if one is held.
    pub fn captured(&self) -> Option<&str> {
        self.captured.as_deref()
    }

    /// File name offered for downloading the still.
    pub fn download_name(&self) -> String {
        format!("photobooth-{}.jpg", self.clock.now_millis())
    }

    /// Restart the camera facing the other way. A closed booth keeps the camera released and
    /// returns `false`.
    pub fn switch_camera(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.camera.switch_camera()
    }

    /// Camera state (streaming flag, facing, last error).
    pub fn camera_session(&self) -> &CameraSession {
        self.camera.session()
    }

    /// Frames on offer.
    pub fn frames(&self) -> &[CustomFrame] {
        &self.frames
    }

    /// Index of the selected frame.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selected frame, if any frames were provided.
    pub fn selected_frame(&self) -> Option<&CustomFrame> {
        self.frames.get(self.selected)
    }

    /// Select frame `index` (ignored when out of range).
    pub fn select_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.selected = index;
        }
    }

    /// Cycle to the next frame, wrapping to the first.
    pub fn next_frame(&mut self) -> usize {
        if !self.frames.is_empty() {
            self.selected = (self.selected + 1) % self.frames.len();
        }
        self.selected
    }

    /// Cycle to the previous frame, wrapping to the last.
    pub fn prev_frame(&mut self) -> usize {
        let n = self.frames.len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
        self.selected
    }

    /// Active filter.
    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Select `filter` outright.
    pub fn select_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
    }

    /// Picker toggle: choosing the active filter again turns filtering off.
    pub fn toggle_filter(&mut self, filter: FilterKind) -> FilterKind {
        self.filter = self.filter.toggled(filter);
        self.filter
    }

    /// Toggle `sticker` on the board. Returns `true` when it is now placed.
    pub fn toggle_sticker(&mut self, sticker: &Sticker) -> bool {
        self.stickers.toggle(sticker)
    }

    /// Placed stickers.
    pub fn stickers(&self) -> &StickerBoard {
        &self.stickers
    }

    /// Placed stickers, for dragging. Positions are canonical units.
    pub fn stickers_mut(&mut self) -> &mut StickerBoard {
        &mut self.stickers
    }

    /// Preview surface.
    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    /// Preview pixels per canonical unit.
    pub fn preview_scale(&self) -> f64 {
        CanonicalSpace::scale_for_width(f64::from(self.preview.width()))
    }

    /// Options in effect.
    pub fn options(&self) -> &BoothOptions {
        &self.options
    }

    /// Thumbnail of frame `index`, `width` pixels wide.
    pub fn thumbnail(&mut self, index: usize, width: u32) -> KropperResult<Option<Surface>> {
        let Some(frame) = self.frames.get(index) else {
            return Ok(None);
        };
        render_thumbnail(&mut self.painter, frame, &self.images, width).map(Some)
    }

    fn render_capture(&mut self) -> KropperResult<Option<String>> {
        let Some(video) = self.camera.current_frame() else {
            return Ok(None);
        };
        let mut canvas = Surface::for_canvas(self.options.capture_canvas())?;
        let scene = Scene {
            video: Some(&video),
            mirror: self.camera.facing().is_mirrored(),
            filter: self.filter,
            frame: self.frames.get(self.selected),
            images: &self.images,
            stickers: self.stickers.stickers(),
        };
        compose_scene(&mut self.painter, &mut canvas, &scene)?;
        let encoded = canvas.encode(ExportFormat::Jpeg {
            quality: self.options.jpeg_quality,
        })?;
        Ok(Some(encoded.to_data_url()))
    }
}

impl<D: MediaDevices> BoothHandle for PhotoBooth<D> {
    fn open(&mut self) -> bool {
        PhotoBooth::open(self)
    }

    fn close(&mut self) {
        PhotoBooth::close(self);
    }

    fn capture(&mut self) -> Option<String> {
        PhotoBooth::capture(self)
    }

    fn retake(&mut self) {
        PhotoBooth::retake(self);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/booth/booth.rs"]
mod tests;
