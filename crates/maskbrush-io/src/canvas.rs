//! Drawing editor surfaces onto `<canvas>` elements.
//!
//! The editor core paints into its own raster buffers; this module
//! copies them onto the page with `putImageData` and reads back the
//! element's layout box for coordinate mapping. Canvas elements are
//! handed in by the components that mounted them, never looked up by
//! id.

use maskbrush_core::surface::pixmap_to_rgba;
use maskbrush_core::{ClientRect, RgbaImage, Surfaces};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Errors that can occur while drawing to a canvas.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The element did not provide a 2D rendering context.
    #[error("canvas has no 2d context")]
    NoContext,

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Narrow a mounted element to a canvas.
#[must_use]
pub fn as_canvas(element: &web_sys::Element) -> Option<HtmlCanvasElement> {
    element.clone().dyn_into::<HtmlCanvasElement>().ok()
}

/// The canvas's current layout box in CSS pixels.
///
/// Read fresh at the start of every stroke; layout changes (resize,
/// scroll, zoom) move it.
#[must_use]
pub fn client_rect(canvas: &HtmlCanvasElement) -> ClientRect {
    let r = canvas.get_bounding_client_rect();
    ClientRect::new(r.left(), r.top(), r.width(), r.height())
}

/// Draw both editor surfaces onto their canvases.
///
/// # Errors
///
/// Returns the first [`CanvasError`] encountered.
pub fn draw_surfaces(
    surfaces: &Surfaces,
    image_canvas: &HtmlCanvasElement,
    mask_canvas: Option<&HtmlCanvasElement>,
) -> Result<(), CanvasError> {
    draw_rgba(image_canvas, &pixmap_to_rgba(surfaces.image()))?;
    if let Some(mask_canvas) = mask_canvas {
        draw_rgba(mask_canvas, &pixmap_to_rgba(surfaces.mask()))?;
    }
    Ok(())
}

/// Resize `canvas` to the image's pixel size and copy the pixels in.
///
/// # Errors
///
/// Returns [`CanvasError::NoContext`] if the 2D context is unavailable
/// and [`CanvasError::JsError`] if `ImageData` creation or
/// `putImageData` fails.
pub fn draw_rgba(canvas: &HtmlCanvasElement, image: &RgbaImage) -> Result<(), CanvasError> {
    let (width, height) = image.dimensions();
    // Assigning width/height clears the canvas even when unchanged.
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }

    let context = context_2d(canvas)?;
    let data =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(image.as_raw().as_slice()), width, height)?;
    context.put_image_data(&data, 0.0, 0.0)?;
    Ok(())
}

/// Blank a canvas (no image loaded).
///
/// # Errors
///
/// Returns [`CanvasError::NoContext`] if the 2D context is unavailable.
pub fn clear(canvas: &HtmlCanvasElement) -> Result<(), CanvasError> {
    let context = context_2d(canvas)?;
    context.clear_rect(
        0.0,
        0.0,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
    Ok(())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
    canvas
        .get_context("2d")?
        .ok_or(CanvasError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CanvasError::NoContext)
}
