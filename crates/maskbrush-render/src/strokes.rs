//! Recorded stroke files and replaying them through a [`MaskEditor`].
//!
//! A stroke file is a JSON array of strokes, each with a brush width
//! and a polyline in display-canvas pixels:
//!
//! ```json
//! [{ "brush": 24, "points": [[100, 80], [160, 90], [220, 140]] }]
//! ```

use maskbrush_core::{ClientPoint, ClientRect, MaskEditor};
use serde::Deserialize;

/// One recorded stroke.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedStroke {
    /// Brush width in canvas pixels, clamped to the editor's range.
    pub brush: f32,
    /// Polyline in display-canvas pixel coordinates.
    pub points: Vec<[f64; 2]>,
}

/// Parse a stroke file.
///
/// # Errors
///
/// Returns the `serde_json` error for malformed input.
pub fn parse(json: &str) -> Result<Vec<RecordedStroke>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Summary of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Replay {
    /// Strokes that were painted and committed.
    pub painted: usize,
    /// Strokes skipped because they had no points.
    pub skipped: usize,
}

/// Paint every stroke onto the loaded document.
///
/// The canvas is treated as laid out 1:1 at the origin, so stroke
/// points are canvas pixels. Does nothing without a loaded image.
pub fn replay(editor: &mut MaskEditor, strokes: &[RecordedStroke]) -> Replay {
    let mut summary = Replay::default();
    let Some(display) = editor.scale().map(|s| s.display()) else {
        return summary;
    };
    let rect = ClientRect::new(
        0.0,
        0.0,
        f64::from(display.width),
        f64::from(display.height),
    );

    for stroke in strokes {
        let Some((first, rest)) = stroke.points.split_first() else {
            summary.skipped += 1;
            continue;
        };
        let brush = editor.brush(stroke.brush);
        if !editor.pointer_down(ClientPoint::new(first[0], first[1]), rect, brush) {
            summary.skipped += 1;
            continue;
        }
        for p in rest {
            editor.pointer_move(ClientPoint::new(p[0], p[1]), brush);
        }
        editor.pointer_up();
        summary.painted += 1;
    }
    summary
}
