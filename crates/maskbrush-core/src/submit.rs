//! Submission payload encoding and the one-at-a-time submission gate.
//!
//! The inpainting endpoint takes a two-part multipart form: the image
//! and the mask, both PNG, both at the image's original (pre-downscale)
//! size. The image part is the original decoded pixels; the mask part
//! is the display-resolution mask resampled up with nearest-neighbor so
//! it stays binary. Both therefore have the same dimensions by
//! construction.

use image::imageops::FilterType;
use image::{ExtendedColorType, GrayImage, ImageEncoder, RgbaImage};

use crate::types::{Dimensions, EditorError};

/// Multipart field name of the image part.
pub const IMAGE_FIELD: &str = "image";
/// Multipart field name of the mask part.
pub const MASK_FIELD: &str = "mask";
/// Filename sent with the image part.
pub const IMAGE_FILENAME: &str = "image.png";
/// Filename sent with the mask part.
pub const MASK_FILENAME: &str = "mask.png";
/// MIME type of both parts.
pub const PNG_MIME: &str = "image/png";

/// PNG-encoded image and mask, ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// The original image as an RGBA PNG.
    pub image_png: Vec<u8>,
    /// The mask as an 8-bit grayscale PNG (0 = keep, 255 = inpaint).
    pub mask_png: Vec<u8>,
    /// Size of both PNGs.
    pub dimensions: Dimensions,
}

impl SubmissionPayload {
    /// Encode `original` and `mask`, resampling the mask to the
    /// original's dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Encode`] if PNG encoding fails.
    pub fn encode(original: &RgbaImage, mask: &GrayImage) -> Result<Self, EditorError> {
        let dimensions = Dimensions::new(original.width(), original.height());
        let mask = resample_mask(mask, dimensions);

        let image_png = encode_png(original.as_raw(), dimensions, ExtendedColorType::Rgba8)?;
        let mask_png = encode_png(mask.as_raw(), dimensions, ExtendedColorType::L8)?;

        Ok(Self {
            image_png,
            mask_png,
            dimensions,
        })
    }
}

/// Resample a mask to `target` with nearest-neighbor.
///
/// Nearest-neighbor keeps a binary mask binary; any interpolating
/// filter would introduce gray edge pixels the server would have to
/// threshold.
#[must_use]
pub fn resample_mask(mask: &GrayImage, target: Dimensions) -> GrayImage {
    if mask.dimensions() == (target.width, target.height) {
        return mask.clone();
    }
    image::imageops::resize(mask, target.width, target.height, FilterType::Nearest)
}

fn encode_png(
    raw: &[u8],
    dimensions: Dimensions,
    color: ExtendedColorType,
) -> Result<Vec<u8>, EditorError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(raw, dimensions.width, dimensions.height, color)
        .map_err(|e| EditorError::Encode(e.to_string()))?;
    Ok(png_bytes)
}

/// Allows at most one submission in flight.
///
/// `Idle → Submitting → Idle`; the success/failure outcome is owned by
/// the caller, the gate only tracks whether a request is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionGate {
    in_flight: bool,
}

impl SubmissionGate {
    /// Mark a submission as started.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SubmissionInFlight`] if one is already
    /// pending; the gate is left unchanged.
    pub fn try_begin(&mut self) -> Result<(), EditorError> {
        if self.in_flight {
            return Err(EditorError::SubmissionInFlight);
        }
        self.in_flight = true;
        Ok(())
    }

    /// Mark the pending submission as finished, whatever its outcome.
    pub const fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Whether a submission is pending.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{Luma, Rgba};

    use super::*;

    #[test]
    fn payload_has_original_dimensions() {
        let original = RgbaImage::from_pixel(1000, 500, Rgba([10, 20, 30, 255]));
        let mask = GrayImage::from_pixel(800, 400, Luma([0]));
        let payload = SubmissionPayload::encode(&original, &mask).unwrap();
        assert_eq!(payload.dimensions, Dimensions::new(1000, 500));

        let image = image::load_from_memory(&payload.image_png).unwrap();
        let mask = image::load_from_memory(&payload.mask_png).unwrap();
        assert_eq!((image.width(), image.height()), (1000, 500));
        assert_eq!((mask.width(), mask.height()), (1000, 500));
    }

    #[test]
    fn image_part_keeps_original_pixels() {
        let original = RgbaImage::from_fn(30, 20, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            Rgba([x as u8, y as u8, 200, 255])
        });
        let mask = GrayImage::new(30, 20);
        let payload = SubmissionPayload::encode(&original, &mask).unwrap();
        let decoded = image::load_from_memory(&payload.image_png).unwrap().to_rgba8();
        assert_eq!(decoded, original);
    }

    #[test]
    fn mask_part_is_grayscale_png() {
        let original = RgbaImage::new(4, 4);
        let mask = GrayImage::from_pixel(4, 4, Luma([255]));
        let payload = SubmissionPayload::encode(&original, &mask).unwrap();
        let decoded = image::load_from_memory(&payload.mask_png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert!(decoded.to_luma8().pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn resampled_mask_stays_binary_and_aligned() {
        // Left half painted at display resolution.
        let mask = GrayImage::from_fn(80, 40, |x, _| Luma([if x < 40 { 255 } else { 0 }]));
        let up = resample_mask(&mask, Dimensions::new(100, 50));
        assert_eq!(up.dimensions(), (100, 50));
        assert!(up.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(up.get_pixel(10, 25).0[0], 255);
        assert_eq!(up.get_pixel(90, 25).0[0], 0);
    }

    #[test]
    fn same_size_mask_is_untouched() {
        let mask = GrayImage::from_fn(7, 5, |x, y| Luma([if (x + y) % 2 == 0 { 255 } else { 0 }]));
        assert_eq!(resample_mask(&mask, Dimensions::new(7, 5)), mask);
    }

    #[test]
    fn gate_blocks_second_submission() {
        let mut gate = SubmissionGate::default();
        assert!(!gate.is_submitting());
        gate.try_begin().unwrap();
        assert!(gate.is_submitting());
        assert!(matches!(
            gate.try_begin(),
            Err(EditorError::SubmissionInFlight)
        ));
        gate.finish();
        assert!(!gate.is_submitting());
        gate.try_begin().unwrap();
    }
}
