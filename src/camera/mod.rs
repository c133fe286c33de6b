//! Camera capture: device ports, the session-owning [`Camera`] service and stream backends.

pub(crate) mod device;
pub(crate) mod service;
pub(crate) mod synthetic;
#[cfg(feature = "camera-nokhwa")]
pub(crate) mod webcam;

pub use device::{CameraError, Facing, MediaDevices, MediaStream, StreamConstraints};
#[cfg(feature = "camera-nokhwa")]
pub use webcam::{NokhwaDevices, NokhwaStream};
pub use service::{Camera, CameraSession};
pub use synthetic::{StillImageDevices, StillImageStream};
