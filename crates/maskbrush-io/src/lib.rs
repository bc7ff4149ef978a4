//! maskbrush-io: Browser I/O and Dioxus component library.
//!
//! Handles canvas blitting, file uploads, the multipart `fetch` to the
//! inpainting endpoint and result Blob URLs, and provides the UI
//! components of the maskbrush web application.

pub mod canvas;
pub mod components;
pub mod raster;
pub mod request;

pub use components::{EditorToolbar, FileUpload, MaskCanvas, ResultPanel};
pub use request::{InpaintResponse, SubmitError, post_inpainting};
