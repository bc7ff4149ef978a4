//! The two pixel-aligned raster surfaces the user paints on.
//!
//! - The **image surface** holds the display-resolution image with the
//!   highlight overlay composited on top, so the user sees exactly
//!   which region is masked.
//! - The **mask surface** starts fully opaque black ("no edit") and
//!   receives solid white strokes ("edit this region").
//!
//! Both are `tiny-skia` pixmaps of identical size. Pixmaps store
//! premultiplied RGBA; conversions to and from the `image` crate's
//! straight-alpha buffers live here.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use tiny_skia::{Color, ColorU8, Pixmap};

use crate::types::{Dimensions, EditorError};

/// Image and mask surfaces of one document, always the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct Surfaces {
    image: Pixmap,
    mask: Pixmap,
}

impl Surfaces {
    /// The baseline state: the unmodified display image and an
    /// all-black mask of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SurfaceAllocation`] if the mask pixmap
    /// cannot be allocated.
    pub fn baseline(display_image: &Pixmap) -> Result<Self, EditorError> {
        let dimensions = Dimensions::new(display_image.width(), display_image.height());
        let mut mask = Pixmap::new(dimensions.width, dimensions.height)
            .ok_or(EditorError::SurfaceAllocation(dimensions))?;
        mask.fill(Color::BLACK);
        Ok(Self {
            image: display_image.clone(),
            mask,
        })
    }

    /// Size shared by both surfaces.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.mask.width(), self.mask.height())
    }

    /// The image surface (display image + highlight).
    #[must_use]
    pub const fn image(&self) -> &Pixmap {
        &self.image
    }

    /// The mask surface (black background, white strokes).
    #[must_use]
    pub const fn mask(&self) -> &Pixmap {
        &self.mask
    }

    /// Both surfaces mutably, for the stroke renderer.
    pub(crate) const fn parts_mut(&mut self) -> (&mut Pixmap, &mut Pixmap) {
        (&mut self.image, &mut self.mask)
    }

    /// The mask as a single-channel image: 0 = keep, 255 = inpaint.
    #[must_use]
    pub fn mask_luma(&self) -> GrayImage {
        let Dimensions { width, height } = self.dimensions();
        let mut out = GrayImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(self.mask.pixels()) {
            // The mask is opaque gray, so any channel is the value.
            *dst = Luma([src.demultiply().red()]);
        }
        out
    }

    /// Number of mask pixels marked for inpainting.
    #[must_use]
    pub fn masked_pixel_count(&self) -> usize {
        self.mask.pixels().iter().filter(|p| p.red() > 127).count()
    }
}

/// Copy a straight-alpha RGBA image into a premultiplied pixmap.
///
/// # Errors
///
/// Returns [`EditorError::SurfaceAllocation`] if the image is empty or
/// too large for a pixmap.
pub fn rgba_to_pixmap(image: &RgbaImage) -> Result<Pixmap, EditorError> {
    let dimensions = Dimensions::new(image.width(), image.height());
    let mut pixmap = Pixmap::new(dimensions.width, dimensions.height)
        .ok_or(EditorError::SurfaceAllocation(dimensions))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Convert a premultiplied pixmap back to a straight-alpha RGBA image.
#[must_use]
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
