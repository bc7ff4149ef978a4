//! Dioxus UI components for maskbrush.
//!
//! Provides the image upload zone, the paintable canvas pair, the brush
//! and history toolbar, and the inpainting result panel.

mod mask_canvas;
mod result_panel;
mod toolbar;
mod upload;

pub use mask_canvas::MaskCanvas;
pub use result_panel::ResultPanel;
pub use toolbar::EditorToolbar;
pub use upload::FileUpload;
