use std::sync::Arc;

use crate::foundation::error::{KropperError, KropperResult};

/// Decoded raster image in premultiplied RGBA8 form.
///
/// Cheap to clone: the pixel buffer is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap premultiplied RGBA8 bytes, validating the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> KropperResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| KropperError::validation("image size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(KropperError::validation(format!(
                "image buffer length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Solid-color image, mostly useful for tests and synthetic camera frames.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(premul.repeat((width as usize) * (height as usize))),
        }
    }

    /// Width over height, or `1.0` for degenerate images.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Normalize and validate root-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> KropperResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(KropperError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(KropperError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(KropperError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(KropperError::validation("asset path must be non-empty"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
