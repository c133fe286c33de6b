//! Image inputs and outputs: decoding, loading by URL, SVG rasterization and export encoding.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod source;
pub(crate) mod store;
pub(crate) mod svg_raster;
