//! Replay recorded brush strokes over an image and write the
//! `image.png`/`mask.png` pair the web editor would submit.

mod strokes;

use std::path::PathBuf;

use clap::Parser;
use maskbrush_core::submit::{IMAGE_FILENAME, MASK_FILENAME};
use maskbrush_core::surface::pixmap_to_rgba;
use maskbrush_core::{Dimensions, EditorConfig, MaskEditor};

/// Replay recorded brush strokes over an image and write the inpainting
/// image/mask pair at the image's original resolution.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path.
    input: PathBuf,

    /// JSON stroke file: `[{"brush": 24, "points": [[x, y], ...]}, ...]`
    /// in display-canvas pixels.
    #[arg(short, long)]
    strokes: PathBuf,

    /// Directory for `image.png` and `mask.png`.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the display canvas (image plus mask overlay) here.
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Display canvas width bound.
    #[arg(long, default_value_t = EditorConfig::DEFAULT_MAX_WIDTH)]
    max_width: u32,

    /// Display canvas height bound.
    #[arg(long, default_value_t = EditorConfig::DEFAULT_MAX_HEIGHT)]
    max_height: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = EditorConfig {
        max_canvas: Dimensions::new(args.max_width, args.max_height),
        ..EditorConfig::default()
    };
    let mut editor = MaskEditor::new(config)?;

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;
    let scale = editor.load(&image_bytes)?;
    eprintln!(
        "Original: {}, display: {}, scale: {:.3}",
        scale.original(),
        scale.display(),
        scale.factor()
    );

    eprintln!("Reading strokes from {}", args.strokes.display());
    let recorded = strokes::parse(&std::fs::read_to_string(&args.strokes)?)
        .map_err(|e| format!("--strokes: {e}"))?;
    let summary = strokes::replay(&mut editor, &recorded);
    eprintln!(
        "Painted {} stroke(s), skipped {} empty",
        summary.painted, summary.skipped
    );

    let payload = editor.encode_submission()?;
    std::fs::create_dir_all(&args.out_dir)?;
    let image_path = args.out_dir.join(IMAGE_FILENAME);
    let mask_path = args.out_dir.join(MASK_FILENAME);
    eprintln!("Writing {} and {}", image_path.display(), mask_path.display());
    std::fs::write(&image_path, &payload.image_png)?;
    std::fs::write(&mask_path, &payload.mask_png)?;

    if let Some(preview) = args.preview
        && let Some(surfaces) = editor.surfaces()
    {
        eprintln!("Writing preview to {}", preview.display());
        pixmap_to_rgba(surfaces.image()).save(&preview)?;
    }

    eprintln!("Done.");
    Ok(())
}
