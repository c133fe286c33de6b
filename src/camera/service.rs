use serde::Serialize;

use crate::{
    assets::{
        encode::{DEFAULT_JPEG_QUALITY, ExportFormat},
        store::PreparedImage,
    },
    camera::device::{Facing, MediaDevices, MediaStream, StreamConstraints},
    filters::{FilterKind, apply_filter},
    foundation::{
        core::{Rect, Size},
        error::{KropperError, KropperResult},
    },
    render::{painter::Painter, surface::Surface},
};

/// Observable camera state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSession {
    /// A stream is open and playing.
    pub is_streaming: bool,
    /// A still has been captured and not yet retaken.
    pub is_captured: bool,
    /// Camera currently requested.
    pub facing: Facing,
    /// Last acquisition failure, as a user-facing message.
    pub error: Option<String>,
}

/// Camera lifecycle around one exclusively owned [`MediaStream`].
///
/// At most one stream is alive at any time: starting always stops the previous stream first, and
/// dropping the camera stops whatever is still open.
pub struct Camera<D: MediaDevices> {
    devices: D,
    stream: Option<Box<dyn MediaStream>>,
    session: CameraSession,
    ideal_width: u32,
    ideal_height: u32,
    jpeg_quality: u8,
    painter: Painter,
}

impl<D: MediaDevices> std::fmt::Debug for Camera<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("session", &self.session)
            .field("has_stream", &self.stream.is_some())
            .finish()
    }
}

impl<D: MediaDevices> Camera<D> {
    /// Idle camera using `devices`.
    pub fn new(devices: D) -> Self {
        let defaults = StreamConstraints::new(Facing::User);
        Self {
            devices,
            stream: None,
            session: CameraSession::default(),
            ideal_width: defaults.ideal_width,
            ideal_height: defaults.ideal_height,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            painter: Painter::new(),
        }
    }

    /// Return a camera with a different resolution hint.
    pub fn with_ideal_resolution(mut self, width: u32, height: u32) -> Self {
        self.ideal_width = width;
        self.ideal_height = height;
        self
    }

    /// Return a camera encoding captures at `quality`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Release any open stream and open a new one facing `facing`.
    ///
    /// Failures are recorded in [`CameraSession::error`]; returns `true` when streaming.
    #[tracing::instrument(skip(self))]
    pub fn start_camera(&mut self, facing: Facing) -> bool {
        self.stop_camera();
        self.session.facing = facing;
        self.session.error = None;
        self.session.is_captured = false;

        let constraints = StreamConstraints::new(facing)
            .with_ideal_resolution(self.ideal_width, self.ideal_height);
        let mut stream = match self.devices.get_user_media(&constraints) {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(%err, "camera acquisition failed");
                self.session.error = Some(err.user_message());
                return false;
            }
        };
        if let Err(err) = stream.play() {
            tracing::warn!(%err, "camera playback was not started automatically");
        }
        let (w, h) = stream.resolution();
        tracing::debug!(width = w, height = h, "camera stream started");
        self.stream = Some(stream);
        self.session.is_streaming = true;
        true
    }

    /// Stop all tracks of the current stream, if any.
    pub fn stop_camera(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("camera stream stopped");
        }
        self.session.is_streaming = false;
    }

    /// Restart with the other camera.
    pub fn switch_camera(&mut self) -> bool {
        self.start_camera(self.session.facing.toggled())
    }

    /// Draw the current frame into `canvas` at native resolution, mirror it for the front camera,
    /// apply `filter` and return a JPEG data URL.
    ///
    /// Returns `None` when not streaming or when drawing or encoding fails.
    pub fn capture(&mut self, canvas: &mut Surface, filter: Option<FilterKind>) -> Option<String> {
        if !self.session.is_streaming {
            return None;
        }
        match self.capture_into(canvas, filter.unwrap_or_default()) {
            Ok(url) => {
                self.session.is_captured = true;
                Some(url)
            }
            Err(err) => {
                tracing::warn!(%err, "camera capture failed");
                None
            }
        }
    }

    /// Clear the captured flag so the preview can resume.
    pub fn retake(&mut self) {
        self.session.is_captured = false;
    }

    /// Current frame, or `None` while not streaming or before the stream has data.
    pub fn current_frame(&mut self) -> Option<PreparedImage> {
        let stream = self.stream.as_mut()?;
        if !stream.is_ready() {
            return None;
        }
        stream
            .frame()
            .inspect_err(|err| tracing::warn!(%err, "failed to read camera frame"))
            .ok()
    }

    /// Session snapshot.
    pub fn session(&self) -> &CameraSession {
        &self.session
    }

    /// Camera currently requested.
    pub fn facing(&self) -> Facing {
        self.session.facing
    }

    /// Return `true` while a stream is open.
    pub fn is_streaming(&self) -> bool {
        self.session.is_streaming
    }

    /// Device backend.
    pub fn devices(&self) -> &D {
        &self.devices
    }

    fn capture_into(&mut self, canvas: &mut Surface, filter: FilterKind) -> KropperResult<String> {
        let frame = self
            .current_frame()
            .ok_or_else(|| KropperError::render("no camera frame available"))?;
        canvas.resize(frame.width, frame.height)?;
        canvas.clear();
        let full = Size::new(f64::from(frame.width), f64::from(frame.height));
        let rect = Rect::from_origin_size((0.0, 0.0), full);
        self.painter.draw_image_rect(
            canvas,
            &frame,
            rect,
            rect,
            self.session.facing.is_mirrored(),
        )?;
        apply_filter(canvas, filter)?;
        let encoded = canvas.encode(ExportFormat::Jpeg {
            quality: self.jpeg_quality,
        })?;
        Ok(encoded.to_data_url())
    }
}

impl<D: MediaDevices> Drop for Camera<D> {
    fn drop(&mut self) {
        self.stop_camera();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/service.rs"]
mod tests;
