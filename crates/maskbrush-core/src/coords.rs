//! Pointer-to-canvas coordinate mapping.
//!
//! The canvas element may be displayed at a different CSS size than
//! its pixel grid (responsive layout, zoom), so pointer positions are
//! rescaled by the ratio of canvas pixels to bounding-box pixels.
//!
//! The bounding box is captured when a stroke starts and reused until
//! the stroke ends; it is never cached across strokes because layout
//! changes (resize, scroll) move it.

use crate::types::{CanvasPoint, ClientPoint, ClientRect, Dimensions};

/// Converts viewport pointer positions into canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    rect: ClientRect,
    scale_x: f64,
    scale_y: f64,
}

impl CoordinateMapper {
    /// Build a mapper for a canvas of `canvas` pixels currently laid out
    /// at `rect`.
    ///
    /// Returns `None` if the bounding box has no usable area (element
    /// hidden or detached), in which case the pointer event is ignored.
    #[must_use]
    pub fn new(rect: ClientRect, canvas: Dimensions) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !(usable(rect.width) && usable(rect.height))
            || !(rect.left.is_finite() && rect.top.is_finite())
            || canvas.is_empty()
        {
            return None;
        }
        Some(Self {
            rect,
            scale_x: f64::from(canvas.width) / rect.width,
            scale_y: f64::from(canvas.height) / rect.height,
        })
    }

    /// `canvasX = (pointerX - left) * canvasWidth / rectWidth`, and the
    /// same for Y.
    ///
    /// Points outside the canvas map outside `0..width`; the renderer
    /// clips them.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_canvas(&self, pointer: ClientPoint) -> CanvasPoint {
        CanvasPoint::new(
            ((pointer.x - self.rect.left) * self.scale_x) as f32,
            ((pointer.y - self.rect.top) * self.scale_y) as f32,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn approx(p: CanvasPoint, x: f32, y: f32) -> bool {
        (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3
    }

    #[test]
    fn identity_when_css_size_matches() {
        let mapper =
            CoordinateMapper::new(ClientRect::new(0.0, 0.0, 800.0, 400.0), Dimensions::new(800, 400))
                .unwrap();
        assert!(approx(mapper.to_canvas(ClientPoint::new(10.0, 20.0)), 10.0, 20.0));
    }

    #[test]
    fn subtracts_bounding_offset() {
        let mapper = CoordinateMapper::new(
            ClientRect::new(100.0, 50.0, 800.0, 400.0),
            Dimensions::new(800, 400),
        )
        .unwrap();
        assert!(approx(mapper.to_canvas(ClientPoint::new(110.0, 70.0)), 10.0, 20.0));
    }

    #[test]
    fn scales_shrunken_canvas() {
        // 800x400 canvas squeezed into 400x200 CSS pixels.
        let mapper = CoordinateMapper::new(
            ClientRect::new(20.0, 10.0, 400.0, 200.0),
            Dimensions::new(800, 400),
        )
        .unwrap();
        assert!(approx(mapper.to_canvas(ClientPoint::new(220.0, 110.0)), 400.0, 200.0));
        assert!(approx(mapper.to_canvas(ClientPoint::new(420.0, 210.0)), 800.0, 400.0));
    }

    #[test]
    fn independent_axis_scales() {
        let mapper = CoordinateMapper::new(
            ClientRect::new(0.0, 0.0, 200.0, 100.0),
            Dimensions::new(400, 400),
        )
        .unwrap();
        assert!(approx(mapper.to_canvas(ClientPoint::new(50.0, 50.0)), 100.0, 200.0));
    }

    #[test]
    fn outside_points_map_outside() {
        let mapper =
            CoordinateMapper::new(ClientRect::new(10.0, 10.0, 100.0, 100.0), Dimensions::new(100, 100))
                .unwrap();
        let p = mapper.to_canvas(ClientPoint::new(0.0, 0.0));
        assert!(p.x < 0.0 && p.y < 0.0);
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        let canvas = Dimensions::new(800, 400);
        assert!(CoordinateMapper::new(ClientRect::new(0.0, 0.0, 0.0, 400.0), canvas).is_none());
        assert!(CoordinateMapper::new(ClientRect::new(0.0, 0.0, 800.0, -1.0), canvas).is_none());
        assert!(
            CoordinateMapper::new(ClientRect::new(f64::NAN, 0.0, 800.0, 400.0), canvas).is_none()
        );
        assert!(
            CoordinateMapper::new(ClientRect::new(0.0, 0.0, 800.0, 400.0), Dimensions::new(0, 0))
                .is_none()
        );
    }
}
