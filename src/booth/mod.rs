//! Photo booth: live camera preview composited with a two-person frame, filters and stickers.
//!
//! `compositor` holds the scene drawing shared by the preview loop, captures and thumbnails;
//! `booth` owns the camera, the loop and the picker state.

pub(crate) mod booth;
pub(crate) mod compositor;

pub use booth::{BoothHandle, PhotoBooth};
pub use compositor::{
    FrameImages, Scene, compose_scene, draw_frame_overlays, preload_frame_images, render_thumbnail,
};
