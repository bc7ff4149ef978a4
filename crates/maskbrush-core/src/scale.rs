//! Fitting an image into the bounded display canvas.
//!
//! The display canvas is never larger than the configured bounds and
//! never larger than the image itself: small images are shown at 1:1,
//! large ones are downscaled with their aspect ratio preserved.

use crate::types::Dimensions;

/// Mapping between an image's original dimensions and the size of the
/// canvas it is displayed (and painted) on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    factor: f64,
    original: Dimensions,
    display: Dimensions,
}

impl DisplayScale {
    /// Fit `original` into `bounds`.
    ///
    /// `scale = min(bounds.width / width, bounds.height / height)`,
    /// capped at 1. When downscaling, the limiting axis lands exactly
    /// on its bound and the other axis is rounded to the nearest pixel
    /// (at least 1, at most its bound).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit(original: Dimensions, bounds: Dimensions) -> Self {
        let sx = f64::from(bounds.width) / f64::from(original.width);
        let sy = f64::from(bounds.height) / f64::from(original.height);
        let factor = sx.min(sy);

        if factor >= 1.0 || factor.is_nan() {
            return Self {
                factor: 1.0,
                original,
                display: original,
            };
        }

        let scaled = |len: u32, bound: u32| -> u32 {
            let v = (f64::from(len) * factor).round();
            (v as u32).clamp(1, bound)
        };

        let display = if sx <= sy {
            Dimensions::new(bounds.width, scaled(original.height, bounds.height))
        } else {
            Dimensions::new(scaled(original.width, bounds.width), bounds.height)
        };

        Self {
            factor,
            original,
            display,
        }
    }

    /// Ratio of display size to original size (at most 1).
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Dimensions of the decoded image.
    #[must_use]
    pub const fn original(&self) -> Dimensions {
        self.original
    }

    /// Dimensions of the display canvas and both surfaces.
    #[must_use]
    pub const fn display(&self) -> Dimensions {
        self.display
    }

    /// Whether the image is shown smaller than its original size.
    #[must_use]
    pub fn is_downscaled(&self) -> bool {
        self.display != self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Dimensions = Dimensions::new(800, 600);

    #[test]
    fn small_image_is_not_scaled() {
        let scale = DisplayScale::fit(Dimensions::new(640, 480), BOUNDS);
        assert!((scale.factor() - 1.0).abs() < f64::EPSILON);
        assert_eq!(scale.display(), Dimensions::new(640, 480));
        assert!(!scale.is_downscaled());
    }

    #[test]
    fn exact_bounds_are_not_scaled() {
        let scale = DisplayScale::fit(BOUNDS, BOUNDS);
        assert!((scale.factor() - 1.0).abs() < f64::EPSILON);
        assert_eq!(scale.display(), BOUNDS);
    }

    #[test]
    fn every_image_within_bounds_keeps_scale_one() {
        for w in (1..=800).step_by(37) {
            for h in (1..=600).step_by(41) {
                let scale = DisplayScale::fit(Dimensions::new(w, h), BOUNDS);
                assert_eq!(scale.display(), Dimensions::new(w, h));
            }
        }
    }

    #[test]
    fn wide_image_limited_by_width() {
        let scale = DisplayScale::fit(Dimensions::new(1000, 500), BOUNDS);
        assert!((scale.factor() - 0.8).abs() < 1e-12);
        assert_eq!(scale.display(), Dimensions::new(800, 400));
        assert!(scale.is_downscaled());
    }

    #[test]
    fn tall_image_limited_by_height() {
        let scale = DisplayScale::fit(Dimensions::new(600, 1200), BOUNDS);
        assert!((scale.factor() - 0.5).abs() < 1e-12);
        assert_eq!(scale.display(), Dimensions::new(300, 600));
    }

    #[test]
    fn oversized_images_fit_and_keep_aspect() {
        let sizes = [
            (1001, 500),
            (801, 601),
            (4000, 3000),
            (3000, 4000),
            (12345, 17),
            (17, 12345),
            (1920, 1080),
            (2048, 2048),
        ];
        for (w, h) in sizes {
            let original = Dimensions::new(w, h);
            let display = DisplayScale::fit(original, BOUNDS).display();
            assert!(display.width <= 800 && display.height <= 600, "{display}");
            assert!(
                display.width == 800 || display.height == 600,
                "{original} -> {display}: neither axis at its bound"
            );
            // Aspect ratio within one pixel of rounding on the short axis.
            let expected_h = f64::from(display.width) / original.aspect_ratio();
            let expected_w = f64::from(display.height) * original.aspect_ratio();
            assert!(
                (f64::from(display.height) - expected_h).abs() <= 1.0
                    || (f64::from(display.width) - expected_w).abs() <= 1.0,
                "{original} -> {display}: aspect drifted"
            );
        }
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        let display = DisplayScale::fit(Dimensions::new(100_000, 1), BOUNDS).display();
        assert_eq!(display, Dimensions::new(800, 1));
    }
}
