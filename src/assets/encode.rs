use std::io::Cursor;

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::foundation::{
    error::{KropperError, KropperResult},
    math::unpremultiply_rgba8_in_place,
};

/// Default lossy quality used for JPEG exports (`0.9` in 0..1 terms).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Raster export format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    Png,
    /// Baseline JPEG at the given quality (1..=100). Transparent pixels become black.
    Jpeg {
        /// Encoder quality.
        quality: u8,
    },
}

impl ExportFormat {
    /// Resolve a MIME type. Unknown types fall back to PNG.
    pub fn from_mime(mime: &str, jpeg_quality: u8) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Self::Jpeg {
                quality: jpeg_quality.clamp(1, 100),
            },
            "image/png" => Self::Png,
            other => {
                tracing::debug!(mime = other, "unsupported export mime, falling back to png");
                Self::Png
            }
        }
    }

    /// MIME type of the produced bytes.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Encoded raster plus its MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Render as a `data:<mime>;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Encode a premultiplied RGBA8 buffer.
pub fn encode_rgba8_premul(
    width: u32,
    height: u32,
    rgba8_premul: &[u8],
    format: ExportFormat,
) -> KropperResult<EncodedImage> {
    if width == 0 || height == 0 {
        return Err(KropperError::encode("cannot encode an empty surface"));
    }
    let expected = (width as usize) * (height as usize) * 4;
    if rgba8_premul.len() != expected {
        return Err(KropperError::encode(format!(
            "buffer length {} does not match {width}x{height}",
            rgba8_premul.len()
        )));
    }

    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => {
            let mut straight = rgba8_premul.to_vec();
            unpremultiply_rgba8_in_place(&mut straight);
            let img = image::RgbaImage::from_raw(width, height, straight)
                .ok_or_else(|| KropperError::encode("rgba buffer size mismatch"))?;
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .context("encode png")?;
        }
        ExportFormat::Jpeg { quality } => {
            // Premultiplied color is already the color composited over black.
            let rgb: Vec<u8> = rgba8_premul
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut bytes,
                quality.clamp(1, 100),
            );
            encoder
                .encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
                .context("encode jpeg")?;
        }
    }

    Ok(EncodedImage {
        mime: format.mime(),
        bytes,
    })
}

/// Split a `data:` URL into its MIME type and decoded payload.
pub fn decode_data_url(url: &str) -> KropperResult<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| KropperError::decode("not a data url"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| KropperError::decode("data url has no payload"))?;

    let (mime, is_base64) = match meta.strip_suffix(";base64") {
        Some(m) => (m, true),
        None => (meta, false),
    };
    let mime = if mime.is_empty() {
        "text/plain".to_owned()
    } else {
        mime.to_owned()
    };

    let bytes = if is_base64 {
        STANDARD
            .decode(payload.trim())
            .context("decode base64 data url payload")?
    } else {
        percent_decode(payload)
    };
    Ok((mime, bytes))
}

fn percent_decode(s: &str) -> Vec<u8> {
    fn hex(b: u8) -> Option<u8> {
        (b as char).to_digit(16).map(|v| v as u8)
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(&[hi, lo]) = bytes.get(i + 1..i + 3)
            && let (Some(hi), Some(lo)) = (hex(hi), hex(lo))
        {
            out.push(hi << 4 | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
