//! maskbrush-core: Sans-IO mask editor core.
//!
//! Everything the mask editor does that is not a browser call lives
//! here: fitting an image into the bounded display canvas, mapping
//! pointer positions into canvas pixels, painting strokes onto the
//! pixel-aligned image and mask surfaces, the bounded undo history,
//! and encoding the image+mask pair for submission.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and raster buffers. All browser interaction lives in
//! `maskbrush-io`.

pub mod config;
pub mod coords;
pub mod decode;
pub mod editor;
pub mod history;
pub mod scale;
pub mod stroke;
pub mod submit;
pub mod surface;
pub mod types;

pub use config::{BrushRange, EditorConfig};
pub use coords::CoordinateMapper;
pub use editor::{ImageCanvas, MaskEditor, MaskLayer};
pub use history::History;
pub use scale::DisplayScale;
pub use submit::{SubmissionGate, SubmissionPayload};
pub use surface::Surfaces;
pub use types::{BrushSize, CanvasPoint, ClientPoint, ClientRect, Dimensions, EditorError};

/// Re-export `RgbaImage` and `GrayImage` so downstream crates can
/// reference raster data without depending on `image` directly.
pub use image::{GrayImage, RgbaImage};
