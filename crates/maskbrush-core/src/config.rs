//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::types::{BrushSize, Dimensions, EditorError};

/// Allowed brush widths and the initial brush-size control value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRange {
    /// Smallest brush width in canvas pixels.
    pub min: f32,
    /// Largest brush width in canvas pixels.
    pub max: f32,
    /// Initial value of the brush-size control.
    pub default: f32,
}

impl BrushRange {
    pub const DEFAULT_MIN: f32 = 1.0;
    pub const DEFAULT_MAX: f32 = 100.0;
    pub const DEFAULT_SIZE: f32 = 20.0;

    /// Clamp a raw control value into the range.
    ///
    /// Non-finite input (an empty or garbled control) falls back to
    /// the default size.
    #[must_use]
    pub fn clamp(&self, raw: f32) -> BrushSize {
        if raw.is_finite() {
            BrushSize(raw.clamp(self.min, self.max))
        } else {
            BrushSize(self.default)
        }
    }

    /// The brush size the control starts at.
    #[must_use]
    pub fn initial(&self) -> BrushSize {
        self.clamp(self.default)
    }
}

impl Default for BrushRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            default: Self::DEFAULT_SIZE,
        }
    }
}

/// Configuration for the mask editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Bounding box the display canvas is fitted into.
    pub max_canvas: Dimensions,

    /// Brush width limits.
    pub brush: BrushRange,

    /// Straight RGBA color of the highlight drawn over the image
    /// surface. Composited with darken blending.
    pub overlay_color: [u8; 4],

    /// Maximum number of history entries, baseline included.
    pub history_limit: usize,

    /// URL the image+mask pair is posted to.
    pub endpoint: String,
}

impl EditorConfig {
    pub const DEFAULT_MAX_WIDTH: u32 = 800;
    pub const DEFAULT_MAX_HEIGHT: u32 = 600;
    pub const DEFAULT_OVERLAY_COLOR: [u8; 4] = [0x4C, 0xAF, 0x50, 0xFF];
    pub const DEFAULT_HISTORY_LIMIT: usize = 32;
    pub const DEFAULT_ENDPOINT: &'static str = "/api/inpainting";

    /// Check the invariants the editor relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.max_canvas.is_empty() {
            return Err(EditorError::InvalidConfig(format!(
                "max canvas must be non-empty, got {}",
                self.max_canvas
            )));
        }
        let BrushRange { min, max, default } = self.brush;
        if !(min.is_finite() && max.is_finite() && default.is_finite()) {
            return Err(EditorError::InvalidConfig(
                "brush range must be finite".into(),
            ));
        }
        if min <= 0.0 || min > max {
            return Err(EditorError::InvalidConfig(format!(
                "brush range must satisfy 0 < min <= max, got {min}..={max}"
            )));
        }
        if !(min..=max).contains(&default) {
            return Err(EditorError::InvalidConfig(format!(
                "default brush size {default} outside {min}..={max}"
            )));
        }
        if self.history_limit < 2 {
            return Err(EditorError::InvalidConfig(format!(
                "history limit must be at least 2, got {}",
                self.history_limit
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(EditorError::InvalidConfig("endpoint is empty".into()));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_canvas: Dimensions::new(Self::DEFAULT_MAX_WIDTH, Self::DEFAULT_MAX_HEIGHT),
            brush: BrushRange::default(),
            overlay_color: Self::DEFAULT_OVERLAY_COLOR,
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
        }
    }
}
