use dioxus::prelude::*;
use maskbrush_core::{MaskEditor, SubmissionGate};
use maskbrush_io::raster;
use maskbrush_io::{EditorToolbar, FileUpload, MaskCanvas, ResultPanel, post_inpainting};

fn main() {
    console_error_panic_hook::set_once();
    dioxus::launch(app);
}

/// Replace the shown result, revoking the previous Blob URL.
fn replace_result(mut result_url: Signal<Option<String>>, next: Option<String>) {
    if let Some(old) = result_url.peek().as_deref() {
        raster::revoke_blob_url(old);
    }
    result_url.set(next);
}

/// Root application component.
///
/// Owns the editor, the submission gate and the result state, and wires
/// together the upload zone, canvases, toolbar and result panel.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut editor = use_signal(MaskEditor::default);
    let brush_size = use_signal(|| editor.peek().config().brush.initial().width());
    let show_mask = use_signal(|| false);
    let mut gate = use_signal(SubmissionGate::default);
    let result_url = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_drop(move || {
        if let Some(url) = result_url.peek().as_deref() {
            raster::revoke_blob_url(url);
        }
    });

    // --- File upload handler ---
    // Decoding large images blocks, so yield once to let "Loading..."
    // paint first.
    let on_upload = move |(bytes, name): (Vec<u8>, String)| {
        loading.set(true);
        error.set(None);
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(0).await;

            // Loading bumps the editor generation, so a request still in
            // flight for the previous image will be discarded.
            let outcome = editor.write().load(&bytes);
            match outcome {
                Ok(scale) => {
                    replace_result(result_url, None);
                    web_sys::console::info_1(
                        &format!(
                            "loaded {name}: {} shown at {} (x{:.3})",
                            scale.original(),
                            scale.display(),
                            scale.factor()
                        )
                        .into(),
                    );
                }
                Err(e) => {
                    // The previous image, if any, stays editable.
                    error.set(Some(format!("Could not load {name}: {e}")));
                }
            }
            loading.set(false);
        });
    };

    // --- Submit handler ---
    let on_submit = move |()| {
        if !editor.peek().is_loaded() {
            error.set(Some("Please select an image.".to_owned()));
            return;
        }
        if let Err(e) = gate.write().try_begin() {
            web_sys::console::warn_1(&format!("submit ignored: {e}").into());
            return;
        }
        error.set(None);

        let my_generation = editor.peek().generation();
        let endpoint = editor.peek().config().endpoint.clone();

        spawn(async move {
            // Let the "Processing..." state paint before PNG encoding
            // blocks the thread.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let encoded = editor.peek().encode_submission();
            let outcome = match encoded {
                Ok(payload) => post_inpainting(&endpoint, &payload)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            gate.write().finish();

            // A new image was loaded while the request ran.
            if editor.peek().generation() != my_generation {
                return;
            }

            match outcome {
                Ok(response) => {
                    match raster::bytes_to_blob_url(&response.bytes, &response.content_type) {
                        Ok(url) => replace_result(result_url, Some(url)),
                        Err(e) => error.set(Some(format!("Could not show result: {e}"))),
                    }
                }
                Err(msg) => {
                    web_sys::console::error_1(&format!("inpainting failed: {msg}").into());
                    error.set(Some(format!("Inpainting failed: {msg}")));
                }
            }
        });
    };

    let submitting = gate.read().is_submitting();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "app-header",
                h1 { "maskbrush" }
                p { class: "muted",
                    "Paint over the parts of an image you want replaced, then inpaint"
                }
            }

            main { class: "app-main",
                div { class: "editor-column",
                    FileUpload {
                        on_upload: on_upload,
                        disabled: submitting || loading(),
                    }

                    if loading() {
                        p { class: "muted pulse", "Loading..." }
                    }

                    EditorToolbar {
                        editor: editor,
                        brush_size: brush_size,
                        show_mask: show_mask,
                        submitting: submitting,
                        on_submit: on_submit,
                    }

                    MaskCanvas {
                        editor: editor,
                        brush_size: brush_size,
                        show_mask: show_mask(),
                    }
                }

                div { class: "result-column",
                    ResultPanel {
                        submitting: submitting,
                        result_url: result_url(),
                        error: error(),
                    }
                }
            }
        }
    }
}
