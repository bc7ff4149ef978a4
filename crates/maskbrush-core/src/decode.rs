//! Image decoding.
//!
//! Accepts raw file bytes (PNG, JPEG, BMP, WebP, GIF) and produces the
//! straight-alpha RGBA raster the editor works from. The EXIF
//! orientation tag is applied, so the raster is upright the way a
//! browser would show the file. Decoding happens before any editor
//! state is touched, so a corrupt file leaves the previously loaded
//! image in place.

use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};

use crate::types::{Dimensions, EditorError};

/// Decode raw image bytes into an upright RGBA raster.
///
/// # Errors
///
/// Returns [`EditorError::EmptyInput`] if `bytes` is empty.
/// Returns [`EditorError::ImageDecode`] if the format is unrecognized or
/// the data is corrupt.
/// Returns [`EditorError::EmptyImage`] if the decoded image has a
/// zero-sized axis.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, EditorError> {
    if bytes.is_empty() {
        return Err(EditorError::EmptyInput);
    }

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::from)?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut decoded = DynamicImage::from_decoder(decoder)?;
    decoded.apply_orientation(orientation);

    let rgba = decoded.to_rgba8();
    let dimensions = Dimensions::new(rgba.width(), rgba.height());
    if dimensions.is_empty() {
        return Err(EditorError::EmptyImage(dimensions));
    }
    Ok(rgba)
}
