//! Clipboard event handling for the editable surface.

use dioxus::prelude::*;

use crate::state::AppState;

/// Paste clipboard plain text at the selection.
pub fn handle_paste(evt: Event<ClipboardData>, state: Signal<AppState>) {
    evt.prevent_default();

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use dioxus::web::WebEventExt;
        use quire_editor_core::{EditorAction, current_range};
        use wasm_bindgen::JsCast;

        let mut state = state;

        let base_evt = evt.as_web_event();
        let Some(clipboard_evt) = base_evt.dyn_ref::<web_sys::ClipboardEvent>() else {
            tracing::warn!("paste event is not a ClipboardEvent");
            return;
        };
        let Some(text) = clipboard_evt
            .clipboard_data()
            .and_then(|data| data.get_data("text/plain").ok())
            .filter(|text| !text.is_empty())
        else {
            return;
        };
        let range = current_range(state.peek().document());
        state
            .write()
            .apply_action(&EditorAction::Paste { text, range });
    }
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    let _ = state;
}

/// Copy the selected plain text, then delete it.
pub fn handle_cut(evt: Event<ClipboardData>, state: Signal<AppState>) {
    evt.prevent_default();

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use dioxus::web::WebEventExt;
        use quire_editor_core::{EditorAction, current_range};
        use wasm_bindgen::JsCast;

        let mut state = state;

        let base_evt = evt.as_web_event();
        let Some(clipboard_evt) = base_evt.dyn_ref::<web_sys::ClipboardEvent>() else {
            tracing::warn!("cut event is not a ClipboardEvent");
            return;
        };
        let (text, range) = {
            let state = state.peek();
            (
                state.document().selected_text(),
                current_range(state.document()),
            )
        };
        if range.is_caret() {
            return;
        }
        if let Some(data) = clipboard_evt.clipboard_data()
            && let Err(e) = data.set_data("text/plain", &text)
        {
            tracing::warn!("failed to set clipboard data: {:?}", e);
            return;
        }
        state
            .write()
            .apply_action(&EditorAction::DeleteBackward { range });
    }
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    let _ = state;
}
