//! Shared types for the mask editor core.

use serde::{Deserialize, Serialize};

/// Image or canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pointer position in on-screen CSS pixels (viewport coordinates,
/// as reported by `clientX`/`clientY`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas element's bounding box in CSS pixels, as reported by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A position in canvas pixel space (the display surfaces' own grid).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// Horizontal position (pixels from left edge).
    pub x: f32,
    /// Vertical position (pixels from top edge).
    pub y: f32,
}

impl CanvasPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }
}

/// Brush line width in canvas pixels.
///
/// Only constructed through [`BrushRange::clamp`](crate::BrushRange::clamp),
/// so the width is always finite and within the configured range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BrushSize(pub(crate) f32);

impl BrushSize {
    /// Line width in canvas pixels.
    #[must_use]
    pub const fn width(self) -> f32 {
        self.0
    }

    /// Half the line width.
    #[must_use]
    pub fn radius(self) -> f32 {
        self.0 / 2.0
    }
}

/// Errors that can occur while editing or preparing a submission.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The selected file was empty.
    #[error("image file is empty")]
    EmptyInput,

    /// The image could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The decoded image has a zero-sized axis.
    #[error("image has no pixels ({0})")]
    EmptyImage(Dimensions),

    /// An operation that needs a loaded image was attempted without one.
    #[error("no image loaded")]
    NoImage,

    /// A raster surface could not be allocated.
    #[error("failed to allocate a {0} surface")]
    SurfaceAllocation(Dimensions),

    /// PNG encoding of the submission failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Editor configuration is invalid.
    #[error("invalid editor configuration: {0}")]
    InvalidConfig(String),

    /// A submission is already pending.
    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions::new(1000, 500).to_string(), "1000x500");
    }

    #[test]
    fn dimensions_empty() {
        assert!(Dimensions::new(0, 10).is_empty());
        assert!(Dimensions::new(10, 0).is_empty());
        assert!(!Dimensions::new(1, 1).is_empty());
    }

    #[test]
    fn aspect_ratio() {
        let ratio = Dimensions::new(1000, 500).aspect_ratio();
        assert!((ratio - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn canvas_point_distance() {
        let a = CanvasPoint::new(0.0, 0.0);
        let b = CanvasPoint::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn error_messages() {
        assert_eq!(EditorError::NoImage.to_string(), "no image loaded");
        assert_eq!(
            EditorError::SurfaceAllocation(Dimensions::new(3, 4)).to_string(),
            "failed to allocate a 3x4 surface"
        );
    }
}
