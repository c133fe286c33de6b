use std::collections::HashMap;

use crate::{
    assets::{color::background_or_white, source::ImageLoader, store::PreparedImage},
    crop::geometry::cover_source_rect,
    filters::{FilterKind, apply_filter},
    foundation::{
        core::{Affine, CanonicalSpace, Size, Vec2},
        error::KropperResult,
    },
    frame::{CustomFrame, PersonKind, PlacedSticker, draw_stickers},
    render::{painter::Painter, surface::Surface},
};

const THUMBNAIL_FALLBACK_BACKGROUND: &str = "#f5f5f5";

/// Decoded cut-outs keyed by frame id and person.
#[derive(Clone, Debug, Default)]
pub struct FrameImages {
    images: HashMap<(String, PersonKind), PreparedImage>,
}

impl FrameImages {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the cut-out for `kind` in frame `frame_id`.
    pub fn insert(&mut self, frame_id: impl Into<String>, kind: PersonKind, image: PreparedImage) {
        self.images.insert((frame_id.into(), kind), image);
    }

    /// Cut-out for `kind` in frame `frame_id`, if it loaded.
    pub fn get(&self, frame_id: &str, kind: PersonKind) -> Option<&PreparedImage> {
        self.images.get(&(frame_id.to_owned(), kind))
    }

    /// Number of loaded cut-outs.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Return `true` when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Load every cropped cut-out referenced by `frames`.
///
/// A cut-out that fails to load is logged and skipped; its overlay is simply not drawn.
pub fn preload_frame_images(frames: &[CustomFrame], loader: &dyn ImageLoader) -> FrameImages {
    let mut out = FrameImages::new();
    for frame in frames {
        for kind in PersonKind::BOTH {
            let Some(url) = frame.person(kind).and_then(|p| p.cropped_url.as_deref()) else {
                continue;
            };
            match loader.load_url(url) {
                Ok(img) => out.insert(frame.id.clone(), kind, img),
                Err(err) => {
                    tracing::warn!(frame = %frame.id, person = kind.id(), %err, "frame image failed to load");
                }
            }
        }
    }
    tracing::debug!(frames = frames.len(), loaded = out.len(), "frame images preloaded");
    out
}

/// Everything one composite pass draws, bottom to top.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Camera frame, cover-fit to the surface. `None` leaves the surface transparent.
    pub video: Option<&'a PreparedImage>,
    /// Flip the video horizontally (front camera).
    pub mirror: bool,
    /// Filter applied to the video before overlays.
    pub filter: FilterKind,
    /// Frame whose cut-outs are overlaid.
    pub frame: Option<&'a CustomFrame>,
    /// Decoded cut-outs.
    pub images: &'a FrameImages,
    /// Stickers drawn last.
    pub stickers: &'a [PlacedSticker],
}

/// Composite `scene` onto `dst`.
///
/// Canonical placements are mapped with `scale = dst.width / 540`, so the same scene renders
/// identically (modulo resolution) on a preview surface and on a capture surface.
#[tracing::instrument(skip_all, fields(width = dst.width(), height = dst.height()))]
pub fn compose_scene(painter: &mut Painter, dst: &mut Surface, scene: &Scene<'_>) -> KropperResult<()> {
    dst.clear();
    let target = dst.canvas().rect();
    if let Some(video) = scene.video {
        let src = cover_source_rect(
            Size::new(f64::from(video.width), f64::from(video.height)),
            target.size(),
        );
        painter.draw_image_rect(dst, video, src, target, scene.mirror)?;
    }
    apply_filter(dst, scene.filter)?;

    let scale = CanonicalSpace::scale_for_width(target.width());
    if let Some(frame) = scene.frame {
        draw_frame_overlays(painter, dst, frame, scene.images, scale)?;
    }
    draw_stickers(painter, dst, scene.stickers, scale)
}

/// Draw `frame`'s loaded cut-outs (groom, then bride) at `scale` surface pixels per canonical unit.
pub fn draw_frame_overlays(
    painter: &mut Painter,
    dst: &mut Surface,
    frame: &CustomFrame,
    images: &FrameImages,
    scale: f64,
) -> KropperResult<()> {
    for kind in PersonKind::BOTH {
        let (Some(person), Some(img)) = (frame.person(kind), images.get(&frame.id, kind)) else {
            continue;
        };
        let transform =
            person
                .position
                .to_affine(scale, f64::from(img.width), f64::from(img.height));
        painter.draw_image(dst, img, transform, None)?;
    }
    Ok(())
}

/// Static preview of `frame` for a frame switcher, `width` pixels wide at the 9:16 aspect.
///
/// Cut-outs keep their own aspect ratio (height follows width) and are drawn unrotated.
pub fn render_thumbnail(
    painter: &mut Painter,
    frame: &CustomFrame,
    images: &FrameImages,
    width: u32,
) -> KropperResult<Surface> {
    let height = CanonicalSpace::height_for_width(f64::from(width)).round() as u32;
    let mut out = Surface::new(width, height)?;
    let background = if frame.background_color.trim().is_empty() {
        THUMBNAIL_FALLBACK_BACKGROUND
    } else {
        &frame.background_color
    };
    out.fill(background_or_white(background));

    let scale = CanonicalSpace::scale_for_width(f64::from(width));
    for kind in PersonKind::BOTH {
        let (Some(person), Some(img)) = (frame.person(kind), images.get(&frame.id, kind)) else {
            continue;
        };
        let pos = person.position;
        let s = pos.width * scale / f64::from(img.width.max(1));
        let transform = Affine::translate(Vec2::new(pos.x * scale, pos.y * scale)) * Affine::scale(s);
        painter.draw_image(&mut out, img, transform, None)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/booth/compositor.rs"]
mod tests;
