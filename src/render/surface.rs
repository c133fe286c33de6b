use crate::{
    assets::{
        encode::{EncodedImage, ExportFormat, encode_rgba8_premul},
        store::PreparedImage,
    },
    foundation::{
        core::{Canvas, Rgba8Premul},
        error::{KropperError, KropperResult},
    },
};

/// Premultiplied RGBA8 drawing target.
///
/// Plays the role of a canvas element: it is exclusively owned by one engine or compositor,
/// resized explicitly, and exported with [`Surface::encode`].
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Allocate a transparent surface. Zero-sized surfaces are allowed and draw nothing.
    pub fn new(width: u32, height: u32) -> KropperResult<Self> {
        let (w, h) = dims_u16(width, height)?;
        Ok(Self {
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Allocate a surface matching `canvas`.
    pub fn for_canvas(canvas: Canvas) -> KropperResult<Self> {
        Self::new(canvas.width, canvas.height)
    }

    /// Copy a decoded image into a new surface.
    pub fn from_image(image: &PreparedImage) -> KropperResult<Self> {
        let mut s = Self::new(image.width, image.height)?;
        let data = s.data_mut();
        if data.len() != image.rgba8_premul.len() {
            return Err(KropperError::validation(format!(
                "image buffer length {} does not match {}x{}",
                image.rgba8_premul.len(),
                image.width,
                image.height
            )));
        }
        data.copy_from_slice(&image.rgba8_premul);
        Ok(s)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width(), self.height())
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.canvas().is_empty()
    }

    /// Reallocate to `width x height` (contents are cleared). No-op when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> KropperResult<()> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        let (w, h) = dims_u16(width, height)?;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(())
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable premultiplied RGBA8 bytes, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data_mut().fill(0);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data_mut().chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Snapshot the contents as a shareable image.
    pub fn to_image(&self) -> PreparedImage {
        PreparedImage {
            width: self.width(),
            height: self.height(),
            rgba8_premul: std::sync::Arc::new(self.data().to_vec()),
        }
    }

    /// Encode the contents. Fails for zero-sized surfaces.
    pub fn encode(&self, format: ExportFormat) -> KropperResult<EncodedImage> {
        encode_rgba8_premul(self.width(), self.height(), self.data(), format)
    }

    pub(crate) fn pixmap(&self) -> &vello_cpu::Pixmap {
        &self.pixmap
    }
}

fn dims_u16(width: u32, height: u32) -> KropperResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KropperError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KropperError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
