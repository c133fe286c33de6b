use crate::{
    assets::store::PreparedImage,
    camera::device::{CameraError, MediaDevices, MediaStream, StreamConstraints},
    foundation::error::{KropperError, KropperResult},
};

/// Device that "films" a fixed still image, for headless compositing and tests.
#[derive(Clone, Debug)]
pub struct StillImageDevices {
    image: PreparedImage,
    failure: Option<CameraError>,
}

impl StillImageDevices {
    /// Every opened stream yields `image`.
    pub fn new(image: PreparedImage) -> Self {
        Self {
            image,
            failure: None,
        }
    }

    /// Make every acquisition fail with `err`.
    pub fn failing(image: PreparedImage, err: CameraError) -> Self {
        Self {
            image,
            failure: Some(err),
        }
    }
}

impl MediaDevices for StillImageDevices {
    fn get_user_media(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        tracing::debug!(facing = ?constraints.facing, "still image stream opened");
        Ok(Box::new(StillImageStream {
            image: self.image.clone(),
            live: true,
        }))
    }
}

/// Stream returned by [`StillImageDevices`].
#[derive(Clone, Debug)]
pub struct StillImageStream {
    image: PreparedImage,
    live: bool,
}

impl MediaStream for StillImageStream {
    fn resolution(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }

    fn frame(&mut self) -> KropperResult<PreparedImage> {
        if !self.live {
            return Err(KropperError::render("stream was stopped"));
        }
        Ok(self.image.clone())
    }

    fn stop(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}
