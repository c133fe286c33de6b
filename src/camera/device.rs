use serde::{Deserialize, Serialize};

use crate::{assets::store::PreparedImage, foundation::error::KropperResult};

/// Media acquisition failure.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum CameraError {
    /// The user or platform denied camera access.
    #[error("camera permission denied")]
    PermissionDenied,
    /// No camera matches the request.
    #[error("no camera device found")]
    NotFound,
    /// The camera is held by another process.
    #[error("camera is busy")]
    Busy,
    /// The requested facing mode or resolution cannot be satisfied.
    #[error("camera constraints cannot be satisfied")]
    Overconstrained,
    /// Playback was refused by an autoplay policy.
    #[error("playback blocked by autoplay policy")]
    Autoplay,
    /// Any other backend failure.
    #[error("camera backend error: {0}")]
    Backend(String),
}

impl CameraError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "카메라 권한이 거부되었습니다. 설정에서 카메라 접근을 허용해주세요.".to_owned()
            }
            Self::NotFound => "카메라를 찾을 수 없습니다.".to_owned(),
            Self::Busy => "카메라가 다른 앱에서 사용 중입니다.".to_owned(),
            Self::Overconstrained => "요청한 카메라 설정을 지원하지 않습니다.".to_owned(),
            Self::Autoplay => "화면을 눌러 카메라 재생을 시작해주세요.".to_owned(),
            Self::Backend(msg) => format!("카메라를 시작할 수 없습니다: {msg}"),
        }
    }
}

/// Which camera to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Front camera; previews and captures are mirrored.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

impl Facing {
    /// The other camera.
    pub fn toggled(self) -> Self {
        match self {
            Self::User => Self::Environment,
            Self::Environment => Self::User,
        }
    }

    /// Return `true` when frames should be flipped horizontally.
    pub fn is_mirrored(self) -> bool {
        self == Self::User
    }
}

/// Stream request: facing mode plus an ideal (not exact) resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamConstraints {
    /// Requested camera.
    pub facing: Facing,
    /// Preferred frame width.
    pub ideal_width: u32,
    /// Preferred frame height.
    pub ideal_height: u32,
}

impl StreamConstraints {
    /// Constraints for `facing` at 1280x720.
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            ideal_width: 1280,
            ideal_height: 720,
        }
    }

    /// Return constraints with a different resolution hint.
    pub fn with_ideal_resolution(mut self, width: u32, height: u32) -> Self {
        self.ideal_width = width;
        self.ideal_height = height;
        self
    }
}

/// A live video stream exclusively owned by one camera session.
pub trait MediaStream {
    /// Native frame size.
    fn resolution(&self) -> (u32, u32);

    /// Return `true` once frames can be read (the video has current data).
    fn is_ready(&self) -> bool {
        true
    }

    /// Start playback. An [`CameraError::Autoplay`] refusal is not fatal.
    fn play(&mut self) -> Result<(), CameraError> {
        Ok(())
    }

    /// Read the current frame as premultiplied RGBA8.
    fn frame(&mut self) -> KropperResult<PreparedImage>;

    /// Stop all tracks. Further calls do nothing.
    fn stop(&mut self);

    /// Return `true` until [`MediaStream::stop`] is called.
    fn is_live(&self) -> bool;
}

/// Source of media streams (`getUserMedia`).
pub trait MediaDevices {
    /// Open a stream matching `constraints`.
    fn get_user_media(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError>;
}

#[cfg(test)]
#[path = "../../tests/unit/camera/device.rs"]
mod tests;
