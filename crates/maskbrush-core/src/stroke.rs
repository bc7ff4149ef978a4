//! Stroke rendering onto the image and mask surfaces.
//!
//! A stroke is a press (painted as a round dab) followed by connected
//! line segments, one per pointer move. Every segment is drawn on both
//! surfaces with the same geometry:
//!
//! - mask: opaque white, aliased, so the mask stays strictly binary
//! - image: the overlay color with darken blending, anti-aliased
//!
//! The brush width is passed per segment, so a brush-size change takes
//! effect on the very next segment.

use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::coords::CoordinateMapper;
use crate::surface::Surfaces;
use crate::types::{BrushSize, CanvasPoint, ClientPoint};

/// Segments shorter than this are painted as dabs; a zero-length path
/// has no direction to stroke.
const MIN_SEGMENT_LENGTH_SQ: f32 = 1e-6;

/// Colors used to paint a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    /// Straight RGBA color of the highlight on the image surface.
    pub overlay: [u8; 4],
}

impl StrokeStyle {
    fn mask_paint() -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = false;
        paint
    }

    fn overlay_paint(self) -> Paint<'static> {
        let [r, g, b, a] = self.overlay;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint.blend_mode = BlendMode::Darken;
        paint
    }
}

/// A stroke in progress: the coordinate mapping captured at press time
/// and the last painted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveStroke {
    mapper: CoordinateMapper,
    last: CanvasPoint,
    segments: usize,
}

impl ActiveStroke {
    /// Start a stroke at `pointer`, painting a dab there.
    pub fn begin(
        surfaces: &mut Surfaces,
        mapper: CoordinateMapper,
        pointer: ClientPoint,
        brush: BrushSize,
        style: StrokeStyle,
    ) -> Self {
        let at = mapper.to_canvas(pointer);
        paint_dab(surfaces, at, brush, style);
        Self {
            mapper,
            last: at,
            segments: 0,
        }
    }

    /// Continue the stroke to `pointer`.
    pub fn extend(
        &mut self,
        surfaces: &mut Surfaces,
        pointer: ClientPoint,
        brush: BrushSize,
        style: StrokeStyle,
    ) {
        let to = self.mapper.to_canvas(pointer);
        paint_segment(surfaces, self.last, to, brush, style);
        self.last = to;
        self.segments += 1;
    }

    /// Number of segments drawn since the press.
    #[must_use]
    pub const fn segments(&self) -> usize {
        self.segments
    }

    /// The last point painted, in canvas pixels.
    #[must_use]
    pub const fn last_point(&self) -> CanvasPoint {
        self.last
    }
}

/// Paint a filled circle of the brush diameter at `at` on both surfaces.
pub fn paint_dab(surfaces: &mut Surfaces, at: CanvasPoint, brush: BrushSize, style: StrokeStyle) {
    let Some(path) = PathBuilder::from_circle(at.x, at.y, brush.radius()) else {
        return;
    };
    let (image, mask) = surfaces.parts_mut();
    fill(mask, &path, &StrokeStyle::mask_paint());
    fill(image, &path, &style.overlay_paint());
}

/// Paint one round-capped segment from `from` to `to` on both surfaces.
pub fn paint_segment(
    surfaces: &mut Surfaces,
    from: CanvasPoint,
    to: CanvasPoint,
    brush: BrushSize,
    style: StrokeStyle,
) {
    if from.distance_squared(to) < MIN_SEGMENT_LENGTH_SQ {
        paint_dab(surfaces, to, brush, style);
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(path) = pb.finish() else {
        return;
    };

    let stroke = Stroke {
        width: brush.width(),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let (image, mask) = surfaces.parts_mut();
    mask.stroke_path(
        &path,
        &StrokeStyle::mask_paint(),
        &stroke,
        Transform::identity(),
        None,
    );
    image.stroke_path(
        &path,
        &style.overlay_paint(),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn fill(pixmap: &mut Pixmap, path: &Path, paint: &Paint<'_>) {
    pixmap.fill_path(path, paint, FillRule::Winding, Transform::identity(), None);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::config::BrushRange;
    use crate::surface::rgba_to_pixmap;
    use crate::types::{ClientRect, Dimensions};

    const STYLE: StrokeStyle = StrokeStyle {
        overlay: [0x4C, 0xAF, 0x50, 0xFF],
    };

    fn white_surfaces(w: u32, h: u32) -> Surfaces {
        let image = rgba_to_pixmap(&RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))).unwrap();
        Surfaces::baseline(&image).unwrap()
    }

    fn mask_at(surfaces: &Surfaces, x: u32, y: u32) -> u8 {
        surfaces.mask_luma().get_pixel(x, y).0[0]
    }

    fn brush(width: f32) -> BrushSize {
        BrushRange::default().clamp(width)
    }

    #[test]
    fn segment_marks_mask_white_along_the_line() {
        let mut s = white_surfaces(100, 50);
        paint_segment(
            &mut s,
            CanvasPoint::new(10.0, 25.0),
            CanvasPoint::new(90.0, 25.0),
            brush(6.0),
            STYLE,
        );
        assert_eq!(mask_at(&s, 50, 25), 255);
        assert_eq!(mask_at(&s, 50, 10), 0);
        // Round caps extend past the endpoints by the radius.
        assert_eq!(mask_at(&s, 8, 25), 255);
        assert_eq!(mask_at(&s, 3, 25), 0);
    }

    #[test]
    fn mask_stays_binary() {
        let mut s = white_surfaces(64, 64);
        paint_segment(
            &mut s,
            CanvasPoint::new(3.3, 7.1),
            CanvasPoint::new(60.7, 51.9),
            brush(9.5),
            STYLE,
        );
        paint_dab(&mut s, CanvasPoint::new(20.5, 40.25), brush(13.0), STYLE);
        assert!(s.mask_luma().pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert!(s.masked_pixel_count() > 0);
    }

    #[test]
    fn overlay_darkens_image_surface() {
        let mut s = white_surfaces(40, 40);
        paint_dab(&mut s, CanvasPoint::new(20.0, 20.0), brush(10.0), STYLE);
        let c = s.image().pixel(20, 20).unwrap().demultiply();
        let close = |a: u8, b: u8| a.abs_diff(b) <= 1;
        assert!(close(c.red(), 0x4C) && close(c.green(), 0xAF) && close(c.blue(), 0x50));
        let outside = s.image().pixel(2, 2).unwrap().demultiply();
        assert_eq!((outside.red(), outside.green(), outside.blue()), (255, 255, 255));
    }

    #[test]
    fn darken_never_lightens_dark_pixels() {
        let image = rgba_to_pixmap(&RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]))).unwrap();
        let mut s = Surfaces::baseline(&image).unwrap();
        paint_dab(&mut s, CanvasPoint::new(10.0, 10.0), brush(10.0), STYLE);
        assert!(
            s.image()
                .pixels()
                .iter()
                .all(|p| p.red() == 0 && p.green() == 0 && p.blue() == 0)
        );
        assert_eq!(mask_at(&s, 10, 10), 255);
    }

    #[test]
    fn zero_length_segment_paints_a_dab() {
        let mut s = white_surfaces(30, 30);
        let p = CanvasPoint::new(15.0, 15.0);
        paint_segment(&mut s, p, p, brush(8.0), STYLE);
        assert_eq!(mask_at(&s, 15, 15), 255);
    }

    #[test]
    fn off_canvas_segment_is_clipped() {
        let mut s = white_surfaces(30, 30);
        paint_segment(
            &mut s,
            CanvasPoint::new(-50.0, -50.0),
            CanvasPoint::new(-10.0, -40.0),
            brush(4.0),
            STYLE,
        );
        assert_eq!(s.masked_pixel_count(), 0);
    }

    #[test]
    fn active_stroke_uses_live_brush_width() {
        let mut s = white_surfaces(200, 100);
        let mapper =
            CoordinateMapper::new(ClientRect::new(0.0, 0.0, 200.0, 100.0), Dimensions::new(200, 100))
                .unwrap();
        let mut stroke =
            ActiveStroke::begin(&mut s, mapper, ClientPoint::new(10.0, 50.0), brush(2.0), STYLE);
        stroke.extend(&mut s, ClientPoint::new(90.0, 50.0), brush(2.0), STYLE);
        stroke.extend(&mut s, ClientPoint::new(190.0, 50.0), brush(30.0), STYLE);
        assert_eq!(stroke.segments(), 2);

        // Thin first segment, thick second segment.
        assert_eq!(mask_at(&s, 50, 58), 0);
        assert_eq!(mask_at(&s, 150, 58), 255);
    }

    #[test]
    fn active_stroke_maps_through_captured_rect() {
        let mut s = white_surfaces(200, 100);
        // Canvas displayed at half size with an offset.
        let mapper = CoordinateMapper::new(
            ClientRect::new(100.0, 100.0, 100.0, 50.0),
            Dimensions::new(200, 100),
        )
        .unwrap();
        let stroke =
            ActiveStroke::begin(&mut s, mapper, ClientPoint::new(150.0, 125.0), brush(4.0), STYLE);
        assert_eq!(stroke.last_point(), CanvasPoint::new(100.0, 50.0));
        assert_eq!(mask_at(&s, 100, 50), 255);
    }
}
