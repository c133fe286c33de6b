//! Webcam backend built on `nokhwa`.

use nokhwa::{
    Camera as NokhwaCamera,
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
};

use crate::{
    assets::store::PreparedImage,
    camera::device::{CameraError, Facing, MediaDevices, MediaStream, StreamConstraints},
    foundation::error::{KropperError, KropperResult},
};

const TARGET_FPS: u32 = 30;

/// Local webcams. Desktop platforms have no facing metadata, so `user` maps to the first device
/// and `environment` to the second when one exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct NokhwaDevices;

impl MediaDevices for NokhwaDevices {
    fn get_user_media(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let index = match constraints.facing {
            Facing::User => 0,
            Facing::Environment => 1,
        };
        let format = CameraFormat::new(
            Resolution::new(constraints.ideal_width, constraints.ideal_height),
            FrameFormat::MJPEG,
            TARGET_FPS,
        );
        let requested = || RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let mut cam = NokhwaCamera::new(CameraIndex::Index(index), requested())
            .or_else(|err| {
                if index == 0 {
                    return Err(err);
                }
                tracing::debug!(%err, "second camera unavailable, falling back to the first");
                NokhwaCamera::new(CameraIndex::Index(0), requested())
            })
            .map_err(|e| classify(&e.to_string()))?;
        cam.open_stream().map_err(|e| classify(&e.to_string()))?;

        let actual = cam.resolution();
        Ok(Box::new(NokhwaStream {
            cam,
            width: actual.width(),
            height: actual.height(),
            live: true,
        }))
    }
}

fn classify(msg: &str) -> CameraError {
    let lower = msg.to_ascii_lowercase();
    if lower.contains("permission") || lower.contains("denied") {
        CameraError::PermissionDenied
    } else if lower.contains("busy") || lower.contains("in use") {
        CameraError::Busy
    } else if lower.contains("not found") || lower.contains("no device") {
        CameraError::NotFound
    } else {
        CameraError::Backend(msg.to_owned())
    }
}

/// Open webcam stream.
pub struct NokhwaStream {
    cam: NokhwaCamera,
    width: u32,
    height: u32,
    live: bool,
}

impl std::fmt::Debug for NokhwaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NokhwaStream")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("live", &self.live)
            .finish()
    }
}

impl MediaStream for NokhwaStream {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame(&mut self) -> KropperResult<PreparedImage> {
        if !self.live {
            return Err(KropperError::render("stream was stopped"));
        }
        let buffer = self
            .cam
            .frame()
            .map_err(|e| KropperError::decode(format!("fetch webcam frame: {e}")))?;
        let rgb = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| KropperError::decode(format!("decode webcam frame: {e}")))?;
        let (w, h) = rgb.dimensions();
        let mut rgba = Vec::with_capacity((w as usize) * (h as usize) * 4);
        for px in rgb.into_raw().chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        PreparedImage::from_premul(w, h, rgba)
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        if let Err(err) = self.cam.stop_stream() {
            tracing::warn!(%err, "failed to stop webcam stream");
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        self.stop();
    }
}
