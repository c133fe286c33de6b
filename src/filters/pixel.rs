use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        error::{KropperError, KropperResult},
        math::{clamp_channel, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    },
    render::surface::Surface,
};

const BRIGHTNESS_GAIN: f32 = 1.2;
const CONTRAST_GAIN: f32 = 1.3;
const TINT_SHIFT: f32 = 20.0;
const VINTAGE_MIX: f32 = 0.6;
const VINTAGE_FADE: f32 = 12.0;

/// Color filter identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Leave pixels untouched.
    #[default]
    None,
    /// Brighter.
    Brightness,
    /// Luma grayscale.
    Grayscale,
    /// Classic sepia tone.
    Sepia,
    /// Stretch around mid gray.
    Contrast,
    /// Shift toward red.
    Warm,
    /// Shift toward blue.
    Cool,
    /// Faded sepia.
    Vintage,
}

/// Every filter, in picker order.
pub const FILTER_LIST: [FilterKind; 8] = [
    FilterKind::None,
    FilterKind::Brightness,
    FilterKind::Grayscale,
    FilterKind::Sepia,
    FilterKind::Contrast,
    FilterKind::Warm,
    FilterKind::Cool,
    FilterKind::Vintage,
];

impl FilterKind {
    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Brightness => "brightness",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Contrast => "contrast",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Vintage => "vintage",
        }
    }

    /// Label shown in the filter picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "원본",
            Self::Brightness => "밝게",
            Self::Grayscale => "흑백",
            Self::Sepia => "세피아",
            Self::Contrast => "선명하게",
            Self::Warm => "따뜻하게",
            Self::Cool => "시원하게",
            Self::Vintage => "빈티지",
        }
    }

    /// Look a filter up by id.
    pub fn from_id(id: &str) -> Option<Self> {
        FILTER_LIST.into_iter().find(|f| f.id() == id)
    }

    /// Picker toggle: choosing the active filter again switches back to [`FilterKind::None`].
    pub fn toggled(self, picked: Self) -> Self {
        if self == picked { Self::None } else { picked }
    }
}

/// Apply `kind` to one straight-alpha pixel. Alpha is never changed.
pub fn apply_pixel(kind: FilterKind, px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px;
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    let (nr, ng, nb) = match kind {
        FilterKind::None => return px,
        FilterKind::Brightness => (r * BRIGHTNESS_GAIN, g * BRIGHTNESS_GAIN, b * BRIGHTNESS_GAIN),
        FilterKind::Grayscale => {
            let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
            (y, y, y)
        }
        FilterKind::Sepia => sepia(r, g, b),
        FilterKind::Contrast => (contrast(r), contrast(g), contrast(b)),
        FilterKind::Warm => (r + TINT_SHIFT, g, b - TINT_SHIFT),
        FilterKind::Cool => (r - TINT_SHIFT, g, b + TINT_SHIFT),
        FilterKind::Vintage => {
            let (sr, sg, sb) = sepia(r, g, b);
            let mix = |orig: f32, toned: f32| {
                orig + (toned - orig) * VINTAGE_MIX + VINTAGE_FADE
            };
            (mix(r, sr), mix(g, sg), mix(b, sb))
        }
    };
    [clamp_channel(nr), clamp_channel(ng), clamp_channel(nb), a]
}

fn sepia(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        0.393 * r + 0.769 * g + 0.189 * b,
        0.349 * r + 0.686 * g + 0.168 * b,
        0.272 * r + 0.534 * g + 0.131 * b,
    )
}

fn contrast(c: f32) -> f32 {
    (c - 128.0) * CONTRAST_GAIN + 128.0
}

/// Filter a premultiplied RGBA8 buffer in place.
///
/// Pixels are unpremultiplied, filtered and premultiplied again, so transparency is preserved.
/// [`FilterKind::None`] leaves the buffer byte-for-byte unchanged.
pub fn apply_filter_rgba8_premul(
    rgba: &mut [u8],
    width: u32,
    height: u32,
    kind: FilterKind,
) -> KropperResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| KropperError::validation("filter buffer size overflow"))?;
    if rgba.len() != expected {
        return Err(KropperError::validation(format!(
            "filter buffer length {} does not match {width}x{height}",
            rgba.len()
        )));
    }
    if kind == FilterKind::None {
        return Ok(());
    }

    unpremultiply_rgba8_in_place(rgba);
    for px in rgba.chunks_exact_mut(4) {
        let out = apply_pixel(kind, [px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
    premultiply_rgba8_in_place(rgba);
    Ok(())
}

/// Filter everything drawn on `surface` so far.
pub fn apply_filter(surface: &mut Surface, kind: FilterKind) -> KropperResult<()> {
    let (w, h) = (surface.width(), surface.height());
    apply_filter_rgba8_premul(surface.data_mut(), w, h, kind)
}

#[cfg(test)]
#[path = "../../tests/unit/filters/pixel.rs"]
mod tests;
