//! Brush size, history and submit controls.

use dioxus::prelude::*;
use maskbrush_core::MaskEditor;

/// Props for the [`EditorToolbar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EditorToolbarProps {
    editor: Signal<MaskEditor>,
    /// Raw brush-size control value.
    brush_size: Signal<f32>,
    /// Whether the mask canvas is shown.
    show_mask: Signal<bool>,
    /// A submission is in flight.
    submitting: bool,
    /// Fired when the user asks for inpainting.
    on_submit: EventHandler<()>,
}

/// Brush slider, undo/clear buttons, mask toggle and the submit button.
#[component]
pub fn EditorToolbar(props: EditorToolbarProps) -> Element {
    let mut editor = props.editor;
    let mut brush_size = props.brush_size;
    let mut show_mask = props.show_mask;

    let (range, loaded, can_undo) = {
        let state = editor.read();
        (state.config().brush, state.is_loaded(), state.can_undo())
    };
    let size = brush_size();
    let display = format!("{size:.0}");

    rsx! {
        div { class: "toolbar",
            div { class: "brush-control",
                label { r#for: "brush-size", "Brush" }
                input {
                    r#type: "range",
                    id: "brush-size",
                    min: "{range.min}",
                    max: "{range.max}",
                    step: "1",
                    value: "{size}",
                    oninput: move |e| {
                        match e.value().parse::<f32>() {
                            Ok(v) => brush_size.set(range.clamp(v).width()),
                            Err(err) => {
                                web_sys::console::warn_1(
                                    &format!("brush size parse failure: {err:?} from {:?}", e.value())
                                        .into(),
                                );
                            }
                        }
                    },
                }
                span { class: "tabular", "{display}px" }
            }

            button {
                class: "button",
                disabled: !can_undo || props.submitting,
                onclick: move |_| {
                    editor.write().undo();
                },
                "Undo"
            }
            button {
                class: "button",
                disabled: !loaded || props.submitting,
                onclick: move |_| {
                    editor.write().clear();
                },
                "Clear"
            }

            label { class: "toggle",
                input {
                    r#type: "checkbox",
                    checked: show_mask(),
                    onchange: move |e| show_mask.set(e.checked()),
                }
                "Show mask"
            }

            button {
                class: "button primary",
                disabled: !loaded || props.submitting,
                onclick: move |_| props.on_submit.call(()),
                if props.submitting { "Inpainting..." } else { "Inpaint" }
            }
        }
    }
}
