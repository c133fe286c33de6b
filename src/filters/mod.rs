//! Per-pixel color filters applied to a drawn surface before overlays are composited.

pub(crate) mod pixel;

pub use pixel::{FILTER_LIST, FilterKind, apply_filter, apply_filter_rgba8_premul, apply_pixel};
