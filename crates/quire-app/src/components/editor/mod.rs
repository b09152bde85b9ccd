//! The editing area: toolbar, color picker, contenteditable surface and
//! the preview that replaces it.

#[cfg_attr(
    not(all(target_arch = "wasm32", target_os = "unknown")),
    allow(dead_code)
)]
mod beforeinput;
mod clipboard;
mod color_picker;
mod dom;
mod keys;
mod preview;
mod surface;
mod toolbar;

use dioxus::prelude::*;

pub use color_picker::ColorPicker;
pub use preview::PostPreview;
pub use surface::EditableSurface;
pub use toolbar::EditorToolbar;

use crate::state::AppState;

#[component]
pub fn RichEditor() -> Element {
    let state = use_context::<Signal<AppState>>();
    let preview = state.read().is_preview_active();

    rsx! {
        div { class: "rich-editor",
            EditorToolbar {}
            ColorPicker {}
            if preview {
                PostPreview {}
            } else {
                EditableSurface {}
            }
        }
    }
}
