//! The paintable canvas pair.
//!
//! The image canvas shows the display image with the mask overlay and
//! receives pointer input; the mask canvas shows the binary mask. Both
//! are redrawn from the editor's surfaces whenever the editor changes.

use dioxus::html::point_interaction::InteractionLocation;
use dioxus::prelude::*;
use maskbrush_core::{ClientPoint, MaskEditor};
use web_sys::HtmlCanvasElement;

use crate::canvas;

/// Props for the [`MaskCanvas`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MaskCanvasProps {
    /// Editor state shared with the toolbar and the app.
    editor: Signal<MaskEditor>,
    /// Raw brush-size control value, read at every pointer event.
    brush_size: Signal<f32>,
    /// Show the mask canvas next to the image.
    #[props(default)]
    show_mask: bool,
}

fn client_point(evt: &PointerEvent) -> ClientPoint {
    let p = evt.client_coordinates();
    ClientPoint::new(p.x, p.y)
}

fn mounted_canvas(evt: &MountedEvent) -> Option<HtmlCanvasElement> {
    evt.data()
        .downcast::<web_sys::Element>()
        .and_then(canvas::as_canvas)
}

/// Image and mask canvases wired to a [`MaskEditor`].
#[component]
pub fn MaskCanvas(props: MaskCanvasProps) -> Element {
    let mut editor = props.editor;
    let brush_size = props.brush_size;
    let mut image_canvas = use_signal(|| Option::<HtmlCanvasElement>::None);
    let mut mask_canvas = use_signal(|| Option::<HtmlCanvasElement>::None);

    // Redraw on every editor change and once the canvases mount.
    use_effect(move || {
        let state = editor.read();
        let Some(image_el) = image_canvas() else {
            return;
        };
        let mask_el = mask_canvas();
        let outcome = match state.surfaces() {
            Some(surfaces) => canvas::draw_surfaces(surfaces, &image_el, mask_el.as_ref()),
            None => canvas::clear(&image_el),
        };
        if let Err(e) = outcome {
            web_sys::console::warn_1(&format!("canvas redraw failed: {e}").into());
        }
    });

    let on_down = move |evt: PointerEvent| {
        if !editor.peek().is_loaded() {
            return;
        }
        let Some(el) = image_canvas.peek().clone() else {
            return;
        };
        evt.prevent_default();
        let rect = canvas::client_rect(&el);
        let mut state = editor.write();
        let brush = state.brush(*brush_size.peek());
        state.pointer_down(client_point(&evt), rect, brush);
    };

    let on_move = move |evt: PointerEvent| {
        if !editor.peek().is_stroking() {
            return;
        }
        let mut state = editor.write();
        let brush = state.brush(*brush_size.peek());
        state.pointer_move(client_point(&evt), brush);
    };

    // Release, leave and cancel all complete the stroke.
    let mut finish = move || {
        if editor.peek().is_stroking() {
            editor.write().pointer_up();
        }
    };

    let loaded = editor.read().is_loaded();
    let mask_class = if props.show_mask && loaded {
        "mask-canvas"
    } else {
        "mask-canvas hidden"
    };

    rsx! {
        div { class: "canvas-row",
            div { class: "canvas-frame",
                canvas {
                    class: if loaded { "image-canvas" } else { "image-canvas empty" },
                    onmounted: move |evt| image_canvas.set(mounted_canvas(&evt)),
                    onpointerdown: on_down,
                    onpointermove: on_move,
                    onpointerup: move |_| finish(),
                    onpointerleave: move |_| finish(),
                    onpointercancel: move |_| finish(),
                }
                if !loaded {
                    p { class: "placeholder", "Upload an image to start masking" }
                }
            }
            canvas {
                class: "{mask_class}",
                onmounted: move |evt| mask_canvas.set(mounted_canvas(&evt)),
            }
        }
    }
}
