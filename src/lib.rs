//! Kropper crops photos into decorative shapes and composites live camera frames with
//! two-person photo frames.
//!
//! The pieces, bottom up:
//!
//! - [`shapes`]: preset and custom clip shapes producing a [`shapes::ClipRegion`]
//! - [`crop`]: the [`Kropper`] engine (pan, zoom, pinch, shaped export) and [`CropWidget`]
//! - [`filters`]: per-pixel color filters
//! - [`camera`]: the [`Camera`] service over pluggable [`MediaDevices`]
//! - [`frame`]: the [`CustomFrame`] model, its step-gated [`FrameEditor`] and stickers
//! - [`booth`]: the [`PhotoBooth`] preview loop and full-resolution capture
//!
//! All drawing happens on CPU surfaces ([`Surface`]) through a `vello_cpu`-backed [`Painter`].
//! Frame placements live in a 540x960 canonical space and are scaled by `target_width / 540`
//! wherever they are drawn.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub mod booth;
pub mod camera;
pub mod config;
pub mod crop;
pub mod filters;
pub mod frame;
pub mod render;
pub mod shapes;

pub use crate::foundation::clock::{Clock, SystemClock, next_id};
pub use crate::foundation::core::{
    Affine, BezPath, CANONICAL_HEIGHT, CANONICAL_WIDTH, CanonicalSpace, Canvas, Placement,
    PlacementPatch, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{KropperError, KropperResult};

pub use crate::assets::color::parse_hex_color;
pub use crate::assets::decode::{PreparedSvg, decode_image, parse_svg};
pub use crate::assets::encode::{
    DEFAULT_JPEG_QUALITY, EncodedImage, ExportFormat, decode_data_url, encode_rgba8_premul,
};
pub use crate::assets::source::{
    DataUrlLoader, FsImageLoader, ImageLoader, ImageSource, decode_any,
};
pub use crate::assets::store::PreparedImage;
pub use crate::assets::svg_raster::rasterize_svg;

pub use crate::booth::{BoothHandle, PhotoBooth};
pub use crate::camera::{Camera, CameraError, CameraSession, Facing, MediaDevices, MediaStream};
pub use crate::config::{BoothOptions, CropOptions, KropperConfig};
pub use crate::crop::{CropHandle, CropState, CropWidget, InputEvent, Kropper};
pub use crate::filters::FilterKind;
pub use crate::frame::{
    CustomFrame, FrameEditor, FrameEditorHandle, FrameEditorStep, PersonImage, PersonKind,
};
pub use crate::render::{Painter, Surface};
pub use crate::shapes::{CropShape, ShapeLibrary};
