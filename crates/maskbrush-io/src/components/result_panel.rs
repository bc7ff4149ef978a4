//! Inpainting result display.

use dioxus::prelude::*;

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// A submission is in flight.
    submitting: bool,
    /// Blob URL of the latest result image.
    result_url: Option<String>,
    /// Last submission or load error.
    error: Option<String>,
}

/// Shows the processing indicator, the latest result, or an error.
///
/// The result is hidden while a request runs; after a failed one the
/// previous result stays visible under the error.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    rsx! {
        section { class: "result-panel",
            h2 { "Result" }

            if let Some(ref err) = props.error {
                div { class: "error-banner", role: "alert",
                    p { "{err}" }
                }
            }

            if props.submitting {
                p { class: "muted pulse", "Processing..." }
            } else if let Some(ref url) = props.result_url {
                img { class: "result-image", src: "{url}", alt: "Inpainting result" }
            } else {
                p { class: "placeholder", "Paint over an area and press Inpaint" }
            }
        }
    }
}
