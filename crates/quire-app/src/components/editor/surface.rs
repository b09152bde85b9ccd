//! The contenteditable region.
//!
//! The DOM is a projection of the document model. Key presses and
//! `beforeinput` intents become `EditorAction`s on the model, the region
//! re-renders from the model, and the caret is put back afterwards. While an
//! IME or dead-key composition runs the browser owns the DOM; the composed
//! text reaches the model on `compositionend`. Selection flows from the DOM
//! to the model only after navigation keys, mouse-up and user focus.

use dioxus::prelude::*;
use quire_editor_core::{KeybindingConfig, action_for_key, current_range, render_editable};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use super::beforeinput;
use super::clipboard::{handle_cut, handle_paste};
use super::dom::{self, EDITOR_ID};
use super::keys::{key_from_dioxus, keycombo_from_dioxus_event};
use crate::platform;
use crate::state::AppState;

/// Read the DOM selection into the model if it moved.
fn sync_selection(mut state: Signal<AppState>) {
    let Some(selection) = dom::read_selection(EDITOR_ID) else {
        return;
    };
    let current = {
        let state = state.peek();
        let doc = state.document();
        (doc.selection(), doc.cursor_offset())
    };
    let unchanged = match current {
        (Some(sel), _) => sel == selection,
        (None, caret) => selection.is_collapsed() && selection.head == caret,
    };
    if !unchanged {
        state.write().set_selection(Some(selection));
    }
}

/// Push the model selection into the DOM.
fn restore_model_selection(state: Signal<AppState>) {
    let state = state.peek();
    let doc = state.document();
    let (anchor, head) = match doc.selection() {
        Some(sel) => (sel.anchor, sel.head),
        None => (doc.cursor_offset(), doc.cursor_offset()),
    };
    if dom::restore_selection(EDITOR_ID, anchor, head).is_none() {
        tracing::trace!(anchor, head, "selection not restored");
    }
}

/// Drop DOM edits the model never saw.
fn rerender_from_model(state: Signal<AppState>) {
    dom::replace_contents(EDITOR_ID, &render_editable(state.peek().document()));
    restore_model_selection(state);
}

#[component]
pub fn EditableSurface() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let keybindings = use_hook(|| KeybindingConfig::default_for_platform(platform::is_mac()));

    let html = use_memo(move || render_editable(state.read().document()));
    let revision = use_memo(move || state.read().document().revision());

    // Put the caret back after every model change.
    use_effect(move || {
        let _ = revision();
        restore_model_selection(state);
    });

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use_effect(move || beforeinput::listen(EDITOR_ID, state));

    rsx! {
        div {
            id: EDITOR_ID,
            class: "editor-content",
            contenteditable: "true",
            spellcheck: "true",
            dangerous_inner_html: "{html}",

            onkeydown: move |evt| {
                // Keys typed into a composition belong to the input method.
                if evt.data().is_composing() || state.peek().is_composing() {
                    return;
                }
                let combo = keycombo_from_dioxus_event(&evt.data());
                let range = current_range(state.peek().document());
                match action_for_key(&keybindings, &combo, range) {
                    Ok(action) => {
                        evt.prevent_default();
                        tracing::debug!(?action, "keydown");
                        state.write().apply_action(&action);
                    }
                    // Navigation, browser shortcuts such as copy and paste, and
                    // keys whose text arrives through beforeinput.
                    Err(_) => {}
                }
            },
            onkeyup: move |evt| {
                // Edits already placed the caret; only the browser moved it on navigation.
                if key_from_dioxus(evt.key()).is_navigation() {
                    sync_selection(state);
                }
            },
            onmouseup: move |_| sync_selection(state),
            onfocus: move |_| {
                // Focus handed back by a toolbar command or dialog keeps the
                // model's caret; the DOM only has the browser's default one.
                if dom::take_focus_from_code() {
                    restore_model_selection(state);
                } else {
                    sync_selection(state);
                }
            },
            onblur: move |_| {
                let composing = state.peek().is_composing();
                if composing && state.write().cancel_composition() {
                    rerender_from_model(state);
                }
            },

            oncompositionstart: move |_| {
                sync_selection(state);
                state.write().begin_composition();
            },
            oncompositionend: move |evt| {
                let text = evt.data().data();
                if !state.write().end_composition(&text) {
                    rerender_from_model(state);
                }
            },
            oninput: move |_| {
                if state.peek().is_composing() {
                    return;
                }
                tracing::warn!("DOM changed outside the document, re-rendering");
                rerender_from_model(state);
            },
            onpaste: move |evt| handle_paste(evt, state),
            oncut: move |evt| handle_cut(evt, state),
        }
    }
}
