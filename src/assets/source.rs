use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::{
        decode::{decode_image, looks_like_svg, parse_svg},
        encode::decode_data_url,
        store::{PreparedImage, normalize_rel_path},
        svg_raster::rasterize_svg_intrinsic,
    },
    foundation::error::{KropperError, KropperResult},
};

/// Where an image comes from: a URL-ish string resolved by an [`ImageLoader`], or an
/// already-decoded raster.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// A `data:` URL or a loader-relative path.
    Url(String),
    /// In-memory image.
    Prepared(PreparedImage),
}

impl ImageSource {
    /// URL string if this source is URL-based.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(u) => Some(u),
            Self::Prepared(_) => None,
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        Self::Url(value.to_owned())
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        Self::Url(value)
    }
}

impl From<PreparedImage> for ImageSource {
    fn from(value: PreparedImage) -> Self {
        Self::Prepared(value)
    }
}

/// Resolves image URLs into decoded rasters.
pub trait ImageLoader {
    /// Load and decode `url`. Failures are reported as [`KropperError::Decode`].
    fn load_url(&self, url: &str) -> KropperResult<PreparedImage>;

    /// Resolve any [`ImageSource`].
    fn load(&self, source: &ImageSource) -> KropperResult<PreparedImage> {
        match source {
            ImageSource::Url(url) => self.load_url(url),
            ImageSource::Prepared(img) => Ok(img.clone()),
        }
    }
}

/// Decode raw bytes that may be either a raster format or an SVG document.
pub fn decode_any(bytes: &[u8]) -> KropperResult<PreparedImage> {
    if looks_like_svg(bytes) {
        let svg = parse_svg(bytes)?;
        return rasterize_svg_intrinsic(&svg);
    }
    decode_image(bytes)
}

/// Loader that only understands `data:` URLs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataUrlLoader;

impl ImageLoader for DataUrlLoader {
    fn load_url(&self, url: &str) -> KropperResult<PreparedImage> {
        if !url.starts_with("data:") {
            return Err(KropperError::decode(format!(
                "unsupported image url \"{}\"",
                truncate(url)
            )));
        }
        load_data_url(url)
    }
}

/// Loader resolving relative paths under a root directory, plus `data:` URLs.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> KropperResult<PathBuf> {
        let rel = url.strip_prefix("file://").unwrap_or(url);
        let norm = normalize_rel_path(rel)?;
        Ok(self.root.join(norm))
    }
}

impl ImageLoader for FsImageLoader {
    fn load_url(&self, url: &str) -> KropperResult<PreparedImage> {
        if url.starts_with("data:") {
            return load_data_url(url);
        }
        let path = self.resolve(url)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image {}", path.display()))
            .map_err(|e| KropperError::decode(format!("{e:#}")))?;
        decode_any(&bytes).map_err(|e| KropperError::decode(format!("{}: {e}", path.display())))
    }
}

fn load_data_url(url: &str) -> KropperResult<PreparedImage> {
    let (_mime, bytes) = decode_data_url(url)?;
    decode_any(&bytes).map_err(|e| match e {
        KropperError::Decode(_) => e,
        other => KropperError::decode(other.to_string()),
    })
}

fn truncate(url: &str) -> &str {
    match url.char_indices().nth(64) {
        Some((i, _)) => &url[..i],
        None => url,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
