//! Image picker with drag-and-drop.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

/// Extensions offered by the picker. Decoding sniffs the content, so
/// this only filters obvious mistakes.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp", "gif"];

fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// `accept` attribute value for the file input.
fn accept_list() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the raw file bytes and filename once a file is read.
    on_upload: EventHandler<(Vec<u8>, String)>,
    /// Disable the picker (e.g. while a submission is in flight).
    #[props(default)]
    disabled: bool,
}

/// A drop zone with a "Choose image" button.
///
/// Reads the first selected or dropped file and fires `on_upload` with
/// `(bytes, filename)`. Decoding happens in the caller.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let disabled = props.disabled;

    let read_first = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        if !has_allowed_extension(&name) {
            error.set(Some(format!("Unsupported file type: {name}")));
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => {
                error.set(None);
                props.on_upload.call((bytes.to_vec(), name));
            }
            Err(e) => {
                error.set(Some(format!("Failed to read file: {e}")));
            }
        }
    };

    let handle_change = move |evt: FormEvent| async move {
        read_first(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        if !disabled {
            read_first(evt.files()).await;
        }
    };

    let zone_class = if dragging() {
        "upload-zone dragging"
    } else {
        "upload-zone"
    };
    let accept = accept_list();

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref err) = error() {
                p { class: "text-error", "{err}" }
            }

            label { class: if disabled { "button disabled" } else { "button primary" },
                input {
                    r#type: "file",
                    accept: "{accept}",
                    class: "hidden",
                    disabled,
                    onchange: handle_change,
                }
                "Choose image"
            }
            span { class: "muted", " or drop one here (PNG, JPEG, BMP, WebP, GIF)" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(has_allowed_extension("photo.JPG"));
        assert!(has_allowed_extension("scan.webp"));
        assert!(has_allowed_extension("anim.gif"));
    }

    #[test]
    fn unknown_or_missing_extension_is_rejected() {
        assert!(!has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("README"));
        assert!(!has_allowed_extension("archive.png.zip"));
    }

    #[test]
    fn accept_list_covers_every_extension() {
        assert_eq!(accept_list(), ".png,.jpg,.jpeg,.bmp,.webp,.gif");
    }
}
