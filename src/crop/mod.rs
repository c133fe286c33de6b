//! Interactive crop engine: cover-fit geometry, gesture tracking, the [`Kropper`] engine and its
//! widget wrapper.

pub(crate) mod engine;
pub(crate) mod geometry;
pub(crate) mod gesture;
pub(crate) mod widget;

pub use engine::{CropState, Kropper};
pub use gesture::{InputEvent, Touches};
pub use widget::{CropHandle, CropWidget, grid_lines};
