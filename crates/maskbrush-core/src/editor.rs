//! The mask editor, composed from two capabilities:
//!
//! - [`ImageCanvas`]: the loaded image, its display scale and its
//!   display-resolution raster.
//! - [`MaskLayer`]: the painted surfaces, the active stroke and the
//!   undo history.
//!
//! [`MaskEditor`] owns at most one document (an `ImageCanvas` paired
//! with a `MaskLayer`) and routes pointer events, undo, clear and
//! submission encoding to it. Loading a new image builds a complete
//! new document before replacing the old one, so a failed decode
//! leaves everything as it was and a stroke can never straddle two
//! images.

use image::RgbaImage;
use image::imageops::FilterType;
use tiny_skia::Pixmap;

use crate::config::EditorConfig;
use crate::coords::CoordinateMapper;
use crate::decode::decode_rgba;
use crate::history::History;
use crate::scale::DisplayScale;
use crate::stroke::{ActiveStroke, StrokeStyle};
use crate::submit::SubmissionPayload;
use crate::surface::{Surfaces, rgba_to_pixmap};
use crate::types::{BrushSize, ClientPoint, ClientRect, Dimensions, EditorError};

/// A decoded image fitted to the display canvas.
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    original: RgbaImage,
    scale: DisplayScale,
    display: Pixmap,
}

impl ImageCanvas {
    /// Decode file bytes and fit the result into `bounds`.
    ///
    /// # Errors
    ///
    /// Propagates decode errors from [`decode_rgba`] and
    /// [`EditorError::SurfaceAllocation`].
    pub fn decode(bytes: &[u8], bounds: Dimensions) -> Result<Self, EditorError> {
        Self::from_rgba(decode_rgba(bytes)?, bounds)
    }

    /// Fit an already decoded image into `bounds`.
    ///
    /// Downscaling uses a triangle (bilinear) filter; images that
    /// already fit are displayed pixel-for-pixel.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyImage`] for a zero-sized image and
    /// [`EditorError::SurfaceAllocation`] if the display raster cannot
    /// be allocated.
    pub fn from_rgba(original: RgbaImage, bounds: Dimensions) -> Result<Self, EditorError> {
        let dimensions = Dimensions::new(original.width(), original.height());
        if dimensions.is_empty() {
            return Err(EditorError::EmptyImage(dimensions));
        }

        let scale = DisplayScale::fit(dimensions, bounds);
        let display = if scale.is_downscaled() {
            let d = scale.display();
            rgba_to_pixmap(&image::imageops::resize(
                &original,
                d.width,
                d.height,
                FilterType::Triangle,
            ))?
        } else {
            rgba_to_pixmap(&original)?
        };

        Ok(Self {
            original,
            scale,
            display,
        })
    }

    /// The image as decoded, at its original size.
    #[must_use]
    pub const fn original(&self) -> &RgbaImage {
        &self.original
    }

    #[must_use]
    pub const fn scale(&self) -> &DisplayScale {
        &self.scale
    }

    /// The image at display size, without any overlay.
    #[must_use]
    pub const fn display_image(&self) -> &Pixmap {
        &self.display
    }
}

/// Painted surfaces plus the stroke and undo state that act on them.
#[derive(Debug, Clone)]
pub struct MaskLayer {
    surfaces: Surfaces,
    history: History<Surfaces>,
    stroke: Option<ActiveStroke>,
    style: StrokeStyle,
}

impl MaskLayer {
    /// A fresh layer over `display_image` whose history holds only the
    /// baseline.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SurfaceAllocation`] if the mask surface
    /// cannot be allocated.
    pub fn new(
        display_image: &Pixmap,
        style: StrokeStyle,
        history_limit: usize,
    ) -> Result<Self, EditorError> {
        let baseline = Surfaces::baseline(display_image)?;
        Ok(Self {
            history: History::new(baseline.clone(), history_limit),
            surfaces: baseline,
            stroke: None,
            style,
        })
    }

    /// Start a stroke, painting a dab under the pointer.
    ///
    /// A press while a stroke is still active (its release was never
    /// delivered) completes that stroke first.
    pub fn begin_stroke(
        &mut self,
        mapper: CoordinateMapper,
        pointer: ClientPoint,
        brush: BrushSize,
    ) {
        self.end_stroke();
        self.stroke = Some(ActiveStroke::begin(
            &mut self.surfaces,
            mapper,
            pointer,
            brush,
            self.style,
        ));
    }

    /// Extend the active stroke. Returns `false` if no stroke is active.
    pub fn extend_stroke(&mut self, pointer: ClientPoint, brush: BrushSize) -> bool {
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        stroke.extend(&mut self.surfaces, pointer, brush, self.style);
        true
    }

    /// Complete the active stroke and snapshot the surfaces.
    ///
    /// Returns `false` (and takes no snapshot) if no stroke is active.
    pub fn end_stroke(&mut self) -> bool {
        if self.stroke.take().is_none() {
            return false;
        }
        self.history.push(self.surfaces.clone());
        true
    }

    /// Restore the previous snapshot. A stroke still in progress is
    /// completed first, so it is the one undone.
    ///
    /// Returns `false` when only the baseline is left.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        match self.history.undo() {
            Some(previous) => {
                self.surfaces = previous.clone();
                true
            }
            None => false,
        }
    }

    /// Discard every stroke: surfaces and history return to the
    /// baseline.
    pub fn reset(&mut self) {
        self.stroke = None;
        let baseline = self.history.baseline().clone();
        self.history.reset(baseline.clone());
        self.surfaces = baseline;
    }

    #[must_use]
    pub const fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    /// Number of history entries, baseline included.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub const fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }
}

#[derive(Debug, Clone)]
struct Document {
    canvas: ImageCanvas,
    layer: MaskLayer,
}

/// The mask editor: configuration plus the currently loaded document.
#[derive(Debug, Clone)]
pub struct MaskEditor {
    config: EditorConfig,
    document: Option<Document>,
    generation: u64,
}

impl Default for MaskEditor {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            document: None,
            generation: 0,
        }
    }
}

impl MaskEditor {
    /// Create an editor with no image loaded.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            config,
            document: None,
            generation: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Decode `bytes` and make it the current document.
    ///
    /// On failure the previous document (if any) is kept untouched.
    ///
    /// # Errors
    ///
    /// Returns the decode or allocation error.
    pub fn load(&mut self, bytes: &[u8]) -> Result<DisplayScale, EditorError> {
        let canvas = ImageCanvas::decode(bytes, self.config.max_canvas)?;
        self.install(canvas)
    }

    /// Make an already decoded image the current document.
    ///
    /// # Errors
    ///
    /// Same as [`ImageCanvas::from_rgba`].
    pub fn load_rgba(&mut self, image: RgbaImage) -> Result<DisplayScale, EditorError> {
        let canvas = ImageCanvas::from_rgba(image, self.config.max_canvas)?;
        self.install(canvas)
    }

    fn install(&mut self, canvas: ImageCanvas) -> Result<DisplayScale, EditorError> {
        let style = StrokeStyle {
            overlay: self.config.overlay_color,
        };
        let layer = MaskLayer::new(canvas.display_image(), style, self.config.history_limit)?;
        let scale = *canvas.scale();
        self.document = Some(Document { canvas, layer });
        self.generation += 1;
        Ok(scale)
    }

    /// Incremented on every successful load; lets async work started
    /// against one image detect that another has replaced it.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Clamp a raw brush-size control value into the configured range.
    #[must_use]
    pub fn brush(&self, raw: f32) -> BrushSize {
        self.config.brush.clamp(raw)
    }

    /// Pointer pressed over the canvas, whose current bounding box is
    /// `rect`.
    ///
    /// Returns `true` if a stroke started (and the surfaces changed).
    /// Ignored without an image or with an unusable bounding box.
    ///
    /// The press itself paints a round dab, so a click without movement
    /// marks a brush-sized dot rather than nothing.
    pub fn pointer_down(&mut self, pointer: ClientPoint, rect: ClientRect, brush: BrushSize) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        let Some(mapper) = CoordinateMapper::new(rect, doc.canvas.scale().display()) else {
            return false;
        };
        doc.layer.begin_stroke(mapper, pointer, brush);
        true
    }

    /// Pointer moved. Returns `true` if a segment was painted.
    pub fn pointer_move(&mut self, pointer: ClientPoint, brush: BrushSize) -> bool {
        self.document
            .as_mut()
            .is_some_and(|doc| doc.layer.extend_stroke(pointer, brush))
    }

    /// Pointer released. Returns `true` if a stroke completed and was
    /// snapshotted.
    pub fn pointer_up(&mut self) -> bool {
        self.document
            .as_mut()
            .is_some_and(|doc| doc.layer.end_stroke())
    }

    /// Pointer left the canvas mid-stroke. Ends the stroke exactly like
    /// a release, snapshot included.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    /// Undo the latest stroke or clear. Returns `true` if anything was
    /// restored.
    pub fn undo(&mut self) -> bool {
        self.document.as_mut().is_some_and(|doc| doc.layer.undo())
    }

    /// Discard all strokes. Returns `false` with no image loaded.
    pub fn clear(&mut self) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        doc.layer.reset();
        true
    }

    /// Current surfaces, if an image is loaded.
    #[must_use]
    pub fn surfaces(&self) -> Option<&Surfaces> {
        self.document.as_ref().map(|doc| doc.layer.surfaces())
    }

    /// Display scale of the loaded image.
    #[must_use]
    pub fn scale(&self) -> Option<&DisplayScale> {
        self.document.as_ref().map(|doc| doc.canvas.scale())
    }

    /// The loaded image at original size.
    #[must_use]
    pub fn original(&self) -> Option<&RgbaImage> {
        self.document.as_ref().map(|doc| doc.canvas.original())
    }

    /// Number of history entries (0 with no image loaded).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.document
            .as_ref()
            .map_or(0, |doc| doc.layer.history_len())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.document.as_ref().is_some_and(|doc| doc.layer.can_undo())
    }

    #[must_use]
    pub fn is_stroking(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|doc| doc.layer.is_stroking())
    }

    /// Encode the original image and the upscaled mask for posting.
    ///
    /// Only reads editor state.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoImage`] with no image loaded, or
    /// [`EditorError::Encode`] if PNG encoding fails.
    pub fn encode_submission(&self) -> Result<SubmissionPayload, EditorError> {
        let doc = self.document.as_ref().ok_or(EditorError::NoImage)?;
        SubmissionPayload::encode(doc.canvas.original(), &doc.layer.surfaces().mask_luma())
    }
}
