//! Options for the crop engine and photo booth, with JSON and environment loading.

pub(crate) mod options;

pub use options::{BoothOptions, CropOptions, JPEG_QUALITY_ENV, KropperConfig};
