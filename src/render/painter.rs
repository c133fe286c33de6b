use std::sync::Arc;

use kurbo::PathEl;
use smallvec::SmallVec;

use crate::{
    assets::{decode::parse_svg, store::PreparedImage, svg_raster::rasterize_svg},
    foundation::{
        core::{Affine, BezPath, Point, Rect, Rgba8Premul},
        error::{KropperError, KropperResult},
    },
    render::{
        composite::{mask_alpha_in_place, over_in_place},
        surface::Surface,
    },
    shapes::ClipRegion,
};

const PAINT_CACHE_LEN: usize = 4;
const SVG_CACHE_LEN: usize = 16;

#[derive(Clone)]
struct CachedPaint {
    key: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

#[derive(Clone)]
struct CachedSvg {
    source: String,
    width: u32,
    height: u32,
    image: PreparedImage,
}

/// Stateless-from-the-caller's-view drawing helper backed by `vello_cpu`.
///
/// Each call rasterizes into a scratch layer and composites it source-over onto the target
/// [`Surface`], optionally masked by a [`ClipRegion`]. The render context, recently used image
/// paints and SVG rasters are reused between calls.
#[derive(Default)]
pub struct Painter {
    ctx: Option<vello_cpu::RenderContext>,
    paints: SmallVec<[CachedPaint; PAINT_CACHE_LEN]>,
    svgs: Vec<CachedSvg>,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("cached_paints", &self.paints.len())
            .field("cached_svgs", &self.svgs.len())
            .finish()
    }
}

impl Painter {
    /// New painter with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `image` with `transform` mapping image pixels to surface pixels.
    pub fn draw_image(
        &mut self,
        dst: &mut Surface,
        image: &PreparedImage,
        transform: Affine,
        clip: Option<&ClipRegion>,
    ) -> KropperResult<()> {
        if dst.is_empty() || image.width == 0 || image.height == 0 {
            return Ok(());
        }
        let paint = self.paint_for(image)?;
        let (w, h) = (f64::from(image.width), f64::from(image.height));
        self.draw_layer(dst, clip, |ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        })
    }

    /// Rasterize SVG `source` at `width x height` and draw it with `transform`.
    ///
    /// Rasters are cached by document and size, so a sticker redrawn every preview frame is
    /// parsed and rasterized once.
    pub fn draw_svg(
        &mut self,
        dst: &mut Surface,
        source: &str,
        width: u32,
        height: u32,
        transform: Affine,
    ) -> KropperResult<()> {
        let image = self.svg_raster(source, width, height)?;
        self.draw_image(dst, &image, transform, None)
    }

    /// Draw the `src` sub-rectangle of `image` stretched onto `dst_rect`, optionally mirrored
    /// horizontally across the surface width.
    pub fn draw_image_rect(
        &mut self,
        dst: &mut Surface,
        image: &PreparedImage,
        src: Rect,
        dst_rect: Rect,
        mirror: bool,
    ) -> KropperResult<()> {
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return Ok(());
        }
        let mut transform = Affine::translate(dst_rect.origin().to_vec2())
            * Affine::scale_non_uniform(
                dst_rect.width() / src.width(),
                dst_rect.height() / src.height(),
            )
            * Affine::translate(-src.origin().to_vec2());
        if mirror {
            transform = mirror_x(f64::from(dst.width())) * transform;
        }
        let clip = ClipRegion::from_rect(dst_rect);
        self.draw_image(dst, image, transform, Some(&clip))
    }

    /// Fill `rect` with a solid color.
    pub fn fill_rect(
        &mut self,
        dst: &mut Surface,
        rect: Rect,
        color: Rgba8Premul,
    ) -> KropperResult<()> {
        if dst.is_empty() {
            return Ok(());
        }
        self.draw_layer(dst, None, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        })
    }

    /// Fill a closed path (non-zero winding) with a solid color.
    pub fn fill_path(
        &mut self,
        dst: &mut Surface,
        path: &BezPath,
        color: Rgba8Premul,
    ) -> KropperResult<()> {
        if dst.is_empty() {
            return Ok(());
        }
        let cpu_path = bezpath_to_cpu(path);
        self.draw_layer(dst, None, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_path(&cpu_path);
        })
    }

    /// Stroke `path` with `style` (width, joins, caps and dashes).
    pub fn stroke_path(
        &mut self,
        dst: &mut Surface,
        path: &BezPath,
        style: &kurbo::Stroke,
        color: Rgba8Premul,
    ) -> KropperResult<()> {
        if style.width.is_nan() || style.width <= 0.0 {
            return Err(KropperError::validation("stroke width must be > 0"));
        }
        let outline = kurbo::stroke(path.iter(), style, &kurbo::StrokeOpts::default(), 0.1);
        self.fill_path(dst, &outline, color)
    }

    /// Stroke a straight segment `width` pixels wide.
    pub fn stroke_line(
        &mut self,
        dst: &mut Surface,
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8Premul,
    ) -> KropperResult<()> {
        let mut p = BezPath::new();
        p.move_to(from);
        p.line_to(to);
        self.stroke_path(dst, &p, &kurbo::Stroke::new(width), color)
    }

    fn draw_layer(
        &mut self,
        dst: &mut Surface,
        clip: Option<&ClipRegion>,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> KropperResult<()> {
        let width = dst.pixmap().width();
        let height = dst.pixmap().height();

        let mut layer = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            draw(ctx);
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
        });

        if let Some(clip) = clip {
            let mut mask = vello_cpu::Pixmap::new(width, height);
            let cpu_path = bezpath_to_cpu(clip.path());
            self.with_ctx_mut(width, height, |ctx| {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
                ctx.fill_path(&cpu_path);
                ctx.flush();
                ctx.render_to_pixmap(&mut mask);
            });
            mask_alpha_in_place(layer.data_as_u8_slice_mut(), mask.data_as_u8_slice())?;
        }

        over_in_place(dst.data_mut(), layer.data_as_u8_slice())
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn svg_raster(
        &mut self,
        source: &str,
        width: u32,
        height: u32,
    ) -> KropperResult<PreparedImage> {
        if let Some(pos) = self
            .svgs
            .iter()
            .position(|c| c.width == width && c.height == height && c.source == source)
        {
            let hit = self.svgs.remove(pos);
            let image = hit.image.clone();
            self.svgs.push(hit);
            return Ok(image);
        }

        let image = rasterize_svg(&parse_svg(source.as_bytes())?, width, height)?;
        if self.svgs.len() == SVG_CACHE_LEN {
            self.svgs.remove(0);
        }
        self.svgs.push(CachedSvg {
            source: source.to_owned(),
            width,
            height,
            image: image.clone(),
        });
        Ok(image)
    }

    fn paint_for(&mut self, image: &PreparedImage) -> KropperResult<vello_cpu::Image> {
        if let Some(pos) = self
            .paints
            .iter()
            .position(|c| Arc::ptr_eq(&c.key, &image.rgba8_premul))
        {
            let hit = self.paints.remove(pos);
            let paint = hit.paint.clone();
            self.paints.push(hit);
            return Ok(paint);
        }

        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        if self.paints.len() == PAINT_CACHE_LEN {
            self.paints.remove(0);
        }
        self.paints.push(CachedPaint {
            key: image.rgba8_premul.clone(),
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

/// Horizontal flip across a surface of the given width: `translate(width, 0) * scale(-1, 1)`.
pub fn mirror_x(width: f64) -> Affine {
    Affine::translate((width, 0.0)) * Affine::scale_non_uniform(-1.0, 1.0)
}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    // peniko colors are straight alpha.
    let [r, g, b, a] = c.to_array();
    let unpremul = |v: u8| -> u8 {
        if a == 0 {
            0
        } else {
            ((u32::from(v) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
        }
    };
    vello_cpu::peniko::Color::from_rgba8(unpremul(r), unpremul(g), unpremul(b), a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> KropperResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KropperError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KropperError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(KropperError::render("image byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, !opaque,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
