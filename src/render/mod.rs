//! Raster drawing: surfaces, the `vello_cpu` painter, compositing helpers and frame scheduling.

pub(crate) mod composite;
pub(crate) mod painter;
pub(crate) mod scheduler;
pub(crate) mod surface;

pub use painter::{Painter, mirror_x};
pub use scheduler::{AnimationFrames, FrameRequestId};
pub use surface::Surface;
