use dioxus::prelude::*;
use quire_editor_core::{PALETTE, PALETTE_COLUMNS};

use super::dom::{self, EDITOR_ID};
use crate::state::AppState;

/// Swatch grid shown under the toolbar while the picker flag is set.
#[component]
pub fn ColorPicker() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    if !state.read().is_color_picker_open() {
        return rsx! {};
    }

    rsx! {
        div { class: "color-picker",
            div {
                class: "color-grid",
                style: "grid-template-columns: repeat({PALETTE_COLUMNS}, 1fr);",
                for color in PALETTE.iter().copied() {
                    button {
                        key: "{color}",
                        class: "color-swatch",
                        r#type: "button",
                        style: "background-color: {color};",
                        title: "{color}",
                        onmousedown: move |evt| evt.prevent_default(),
                        onclick: move |_| {
                            if let Err(err) = state.write().pick_color(color) {
                                tracing::debug!(%err, "color not applied");
                            }
                            dom::focus_editor(EDITOR_ID);
                        },
                    }
                }
            }
            button {
                class: "color-picker-close",
                r#type: "button",
                onmousedown: move |evt| evt.prevent_default(),
                onclick: move |_| state.write().close_color_picker(),
                "Close"
            }
        }
    }
}
