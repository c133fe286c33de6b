use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        clock::{SystemClock, next_id},
        core::{Placement, Point},
        error::KropperResult,
    },
    render::{painter::Painter, surface::Surface},
};

/// Smallest side a sticker can be resized to, in canonical units.
pub const MIN_STICKER_SIZE: f64 = 20.0;
/// Where a toggled-on sticker lands (top-left, clear of faces).
const TOGGLE_ORIGIN: (f64, f64) = (30.0, 30.0);
const TOGGLE_SIZE: f64 = 60.0;

/// Sticker picker group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickerCategory {
    /// Decorations placed anywhere.
    General,
    /// Props meant to sit on a face.
    FaceTracking,
}

/// A sticker definition backed by an SVG document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    /// Unique id.
    pub id: String,
    /// Picker label.
    pub name: String,
    /// Picker group.
    pub category: StickerCategory,
    /// SVG document.
    pub svg: String,
}

const BUILTIN: [(&str, &str, StickerCategory, &str); 8] = [
    (
        "heart",
        "하트",
        StickerCategory::General,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M50 88 C20 65 5 45 15 25 C25 8 45 12 50 28 C55 12 75 8 85 25 C95 45 80 65 50 88 Z" fill="#ff4d6d"/></svg>"##,
    ),
    (
        "star",
        "별",
        StickerCategory::General,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M50 5 L61 38 L95 38 L67 58 L78 92 L50 71 L22 92 L33 58 L5 38 L39 38 Z" fill="#ffd43b"/></svg>"##,
    ),
    (
        "sparkle",
        "반짝",
        StickerCategory::General,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M50 0 Q55 45 100 50 Q55 55 50 100 Q45 55 0 50 Q45 45 50 0 Z" fill="#fff3bf"/></svg>"##,
    ),
    (
        "ring",
        "반지",
        StickerCategory::General,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="62" r="28" fill="none" stroke="#fab005" stroke-width="8"/><path d="M40 30 L50 14 L60 30 L50 38 Z" fill="#a5d8ff"/></svg>"##,
    ),
    (
        "crown",
        "왕관",
        StickerCategory::FaceTracking,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M10 75 L15 30 L35 55 L50 20 L65 55 L85 30 L90 75 Z" fill="#fcc419"/></svg>"##,
    ),
    (
        "glasses",
        "안경",
        StickerCategory::FaceTracking,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="28" cy="50" r="18" fill="none" stroke="#212529" stroke-width="6"/><circle cx="72" cy="50" r="18" fill="none" stroke="#212529" stroke-width="6"/><path d="M46 50 L54 50" stroke="#212529" stroke-width="6"/></svg>"##,
    ),
    (
        "veil",
        "면사포",
        StickerCategory::FaceTracking,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M20 20 Q50 0 80 20 L95 95 L5 95 Z" fill="#ffffff" fill-opacity="0.7"/></svg>"##,
    ),
    (
        "bowtie",
        "나비넥타이",
        StickerCategory::FaceTracking,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M5 25 L45 45 L45 55 L5 75 Z M95 25 L55 45 L55 55 L95 75 Z" fill="#212529"/><rect x="43" y="40" width="14" height="20" rx="3" fill="#343a40"/></svg>"##,
    ),
];

/// Built-in sticker catalog.
pub fn default_stickers() -> Vec<Sticker> {
    BUILTIN
        .iter()
        .map(|(id, name, category, svg)| Sticker {
            id: (*id).to_owned(),
            name: (*name).to_owned(),
            category: *category,
            svg: (*svg).to_owned(),
        })
        .collect()
}

/// A sticker placed on the canvas, in canonical units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSticker {
    /// Instance id.
    pub id: String,
    /// Sticker definition.
    pub sticker: Sticker,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Clockwise rotation in degrees around the center.
    pub rotation: f64,
}

impl PlacedSticker {
    /// Placement rectangle.
    pub fn placement(&self) -> Placement {
        Placement::new(self.x, self.y, self.width, self.height, self.rotation)
    }

    /// Return `true` when canonical point `p` is inside the rotated sticker.
    pub fn contains(&self, p: Point) -> bool {
        self.placement().contains(p)
    }

    /// Shift by `(dx, dy)`.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Resize around the top-left corner; each side is clamped to [`MIN_STICKER_SIZE`].
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(MIN_STICKER_SIZE);
        self.height = height.max(MIN_STICKER_SIZE);
    }

    /// Set the rotation, normalized into `[0, 360)`.
    pub fn rotate(&mut self, degrees: f64) {
        self.rotation = degrees.rem_euclid(360.0);
    }
}

/// Place `sticker` as a `size x size` square with its top-left corner at `(x, y)`.
pub fn create_placed_sticker(sticker: &Sticker, x: f64, y: f64, size: f64) -> PlacedSticker {
    PlacedSticker {
        id: next_id(&format!("placed-{}", sticker.id), &SystemClock),
        sticker: sticker.clone(),
        x,
        y,
        width: size,
        height: size,
        rotation: 0.0,
    }
}

/// Topmost sticker containing canonical point `p` (later stickers are drawn on top).
pub fn hit_test_sticker(p: Point, stickers: &[PlacedSticker]) -> Option<&PlacedSticker> {
    stickers.iter().rev().find(|s| s.contains(p))
}

/// Stickers on a booth canvas plus the current drag.
#[derive(Clone, Debug, Default)]
pub struct StickerBoard {
    stickers: Vec<PlacedSticker>,
    dragging: Option<String>,
    last: Point,
}

impl StickerBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed stickers, bottom to top.
    pub fn stickers(&self) -> &[PlacedSticker] {
        &self.stickers
    }

    /// Return `true` when an instance of `sticker_id` is on the board.
    pub fn is_active(&self, sticker_id: &str) -> bool {
        self.stickers.iter().any(|s| s.sticker.id == sticker_id)
    }

    /// Picker toggle: remove every instance of `sticker` if present, otherwise place one at the
    /// top-left. Returns `true` when the sticker is now on the board.
    pub fn toggle(&mut self, sticker: &Sticker) -> bool {
        if self.is_active(&sticker.id) {
            self.stickers.retain(|s| s.sticker.id != sticker.id);
            if self
                .dragging
                .as_ref()
                .is_some_and(|id| !self.stickers.iter().any(|s| &s.id == id))
            {
                self.dragging = None;
            }
            return false;
        }
        let (x, y) = TOGGLE_ORIGIN;
        self.stickers
            .push(create_placed_sticker(sticker, x, y, TOGGLE_SIZE));
        true
    }

    /// Add an already placed sticker on top.
    pub fn push(&mut self, placed: PlacedSticker) {
        self.stickers.push(placed);
    }

    /// Mutable access to one instance.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut PlacedSticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    /// Begin dragging the topmost sticker under `p`; returns its id.
    pub fn pointer_down(&mut self, p: Point) -> Option<String> {
        let id = hit_test_sticker(p, &self.stickers)?.id.clone();
        self.dragging = Some(id.clone());
        self.last = p;
        Some(id)
    }

    /// Move the dragged sticker by the delta since the last event.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(id) = self.dragging.clone() else {
            return false;
        };
        let d = p - self.last;
        self.last = p;
        match self.get_mut(&id) {
            Some(s) => {
                s.move_by(d.x, d.y);
                true
            }
            None => false,
        }
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.stickers.clear();
        self.dragging = None;
    }
}

/// Draw `stickers` onto `dst`, mapping canonical units by `scale`.
///
/// Each sticker is rasterized at its on-surface size through the painter's SVG cache.
pub fn draw_stickers(
    painter: &mut Painter,
    dst: &mut Surface,
    stickers: &[PlacedSticker],
    scale: f64,
) -> KropperResult<()> {
    for s in stickers {
        let w = (s.width * scale).round().max(1.0) as u32;
        let h = (s.height * scale).round().max(1.0) as u32;
        let transform = s.placement().to_affine(scale, f64::from(w), f64::from(h));
        painter.draw_svg(dst, &s.sticker.svg, w, h, transform)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/frame/sticker.rs"]
mod tests;
