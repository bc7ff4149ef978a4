//! Integration test: load, paint, undo and submit a 1000x500 image the
//! way the web app drives the editor.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use maskbrush_core::{
    ClientPoint, ClientRect, Dimensions, EditorConfig, EditorError, MaskEditor, SubmissionGate,
};

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        #[allow(clippy::cast_possible_truncation)]
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

#[test]
fn load_stroke_undo_submit() {
    let mut editor = MaskEditor::new(EditorConfig::default()).unwrap();
    let scale = editor.load(&gradient_png(1000, 500)).expect("decode");

    assert!((scale.factor() - 0.8).abs() < 1e-12);
    assert_eq!(scale.display(), Dimensions::new(800, 400));
    assert_eq!(editor.history_len(), 1);

    // The canvas is laid out at half size, offset inside the page.
    let rect = ClientRect::new(40.0, 120.0, 400.0, 200.0);
    let brush = editor.brush(24.0);
    assert!(editor.pointer_down(ClientPoint::new(100.0, 150.0), rect, brush));
    for step in 1..=20 {
        let x = 100.0 + f64::from(step) * 10.0;
        assert!(editor.pointer_move(ClientPoint::new(x, 150.0 + f64::from(step)), brush));
    }
    assert!(editor.pointer_up());
    assert_eq!(editor.history_len(), 2);

    let painted = editor.surfaces().unwrap().masked_pixel_count();
    assert!(painted > 0, "stroke should mark mask pixels");

    // Undo returns to a solid black mask.
    assert!(editor.undo());
    assert_eq!(editor.history_len(), 1);
    let mask = editor.surfaces().unwrap().mask_luma();
    assert!(mask.pixels().all(|p| p.0[0] == 0));

    // Submission: two PNGs at the original size.
    let mut gate = SubmissionGate::default();
    gate.try_begin().unwrap();
    assert!(matches!(
        gate.try_begin(),
        Err(EditorError::SubmissionInFlight)
    ));

    let payload = editor.encode_submission().unwrap();
    let image = image::load_from_memory(&payload.image_png).unwrap();
    let mask = image::load_from_memory(&payload.mask_png).unwrap();
    assert_eq!((image.width(), image.height()), (1000, 500));
    assert_eq!((mask.width(), mask.height()), (1000, 500));

    // The request fails: the gate reopens and the editor is unchanged.
    gate.finish();
    assert!(!gate.is_submitting());
    assert_eq!(editor.history_len(), 1);
}

#[test]
fn painted_region_lands_in_the_same_place_at_full_size() {
    let mut editor = MaskEditor::new(EditorConfig::default()).unwrap();
    editor.load(&gradient_png(1600, 1200)).unwrap();
    assert_eq!(
        editor.scale().unwrap().display(),
        Dimensions::new(800, 600)
    );

    // Dab the center of the canvas, laid out 1:1.
    let rect = ClientRect::new(0.0, 0.0, 800.0, 600.0);
    let brush = editor.brush(40.0);
    editor.pointer_down(ClientPoint::new(400.0, 300.0), rect, brush);
    editor.pointer_up();

    let payload = editor.encode_submission().unwrap();
    let mask = image::load_from_memory(&payload.mask_png).unwrap().to_luma8();
    assert_eq!(mask.get_pixel(800, 600).0[0], 255);
    assert_eq!(mask.get_pixel(10, 10).0[0], 0);
    assert_eq!(mask.get_pixel(800, 700).0[0], 0);
    assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
}

#[test]
fn small_image_is_painted_at_full_resolution() {
    let mut editor = MaskEditor::new(EditorConfig::default()).unwrap();
    let scale = editor.load(&gradient_png(320, 240)).unwrap();
    assert!((scale.factor() - 1.0).abs() < f64::EPSILON);
    assert!(!scale.is_downscaled());

    let payload = editor.encode_submission().unwrap();
    assert_eq!(payload.dimensions, Dimensions::new(320, 240));
}
