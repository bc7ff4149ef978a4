//! Posting the image+mask pair to the inpainting endpoint.
//!
//! Builds a two-part `FormData` (`image` and `mask`, both PNG) and sends
//! it with `window.fetch`. The browser produces the multipart encoding.
//! Any non-2xx response is a failure; its body is not inspected.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use maskbrush_core::SubmissionPayload;
use maskbrush_core::submit::{IMAGE_FIELD, IMAGE_FILENAME, MASK_FIELD, MASK_FILENAME, PNG_MIME};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::raster::{self, RasterError};

/// Errors that can occur while submitting to the inpainting endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The server answered with a non-success status.
    #[error("inpainting request failed with HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered 2xx with an empty body.
    #[error("inpainting response was empty")]
    EmptyResponse,

    /// A browser API call failed (including network errors, which
    /// `fetch` reports as a rejected promise).
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for SubmitError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<RasterError> for SubmitError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::JsError(msg) => Self::JsError(msg),
        }
    }
}

/// A successful inpainting response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InpaintResponse {
    /// Encoded result image.
    pub bytes: Vec<u8>,
    /// Response `Content-Type`, `image/png` if the server sent none.
    pub content_type: String,
}

/// Post `payload` to `endpoint` and return the result image.
///
/// # Errors
///
/// Returns [`SubmitError::Http`] for a non-2xx status,
/// [`SubmitError::EmptyResponse`] for an empty 2xx body, and
/// [`SubmitError::JsError`] for network failures or browser API errors.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JS handles are !Send
pub async fn post_inpainting(
    endpoint: &str,
    payload: &SubmissionPayload,
) -> Result<InpaintResponse, SubmitError> {
    let window =
        web_sys::window().ok_or_else(|| SubmitError::JsError("no global window".into()))?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(
        IMAGE_FIELD,
        &raster::bytes_to_blob(&payload.image_png, PNG_MIME)?,
        IMAGE_FILENAME,
    )?;
    form.append_with_blob_and_filename(
        MASK_FIELD,
        &raster::bytes_to_blob(&payload.mask_png, PNG_MIME)?,
        MASK_FILENAME,
    )?;

    // No explicit Content-Type: the browser sets the multipart boundary.
    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let request = web_sys::Request::new_with_str_and_init(endpoint, &init)?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|_| SubmitError::JsError("fetch did not resolve to a Response".into()))?;

    if !response.ok() {
        return Err(SubmitError::Http {
            status: response.status(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")?
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| PNG_MIME.to_owned());

    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    if bytes.is_empty() {
        return Err(SubmitError::EmptyResponse);
    }

    Ok(InpaintResponse {
        bytes,
        content_type,
    })
}
