//! `beforeinput` handling for the editable surface.
//!
//! Keydown covers typing and shortcuts on a physical keyboard. Everything
//! else the browser is about to do to the DOM arrives here first: virtual
//! keyboards, spellcheck replacements, context-menu edits and composition.
//! Edits the model can express are applied to it and the browser's own DOM
//! change is cancelled. Composition is left to the browser until
//! `compositionend`, when the surface commits the final text.

use quire_editor_core::{InputType, Range, action_for_input, current_range};

use crate::state::AppState;

pub struct BeforeInputContext {
    pub input_type: InputType,
    pub data: Option<String>,
    /// The browser's target range mapped to model offsets, when available.
    pub target_range: Option<Range>,
    pub is_composing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeInputResult {
    /// The model took care of it; cancel the browser's edit.
    Handled,
    /// Let the browser edit the DOM.
    PassThrough,
}

pub fn handle_beforeinput(state: &mut AppState, ctx: BeforeInputContext) -> BeforeInputResult {
    let history = matches!(
        ctx.input_type,
        InputType::HistoryUndo | InputType::HistoryRedo
    );
    let composing = ctx.is_composing || state.is_composing();

    if let InputType::InsertCompositionText = ctx.input_type {
        if let Some(target) = ctx.target_range {
            state.place_composition(target);
        }
        return BeforeInputResult::PassThrough;
    }
    if composing && !history {
        return BeforeInputResult::PassThrough;
    }
    if let InputType::Unknown(name) = &ctx.input_type {
        // Whatever it does gets re-rendered from the model on `input`.
        tracing::debug!(input_type = %name, "unhandled beforeinput");
        return BeforeInputResult::PassThrough;
    }

    let range = ctx
        .target_range
        .unwrap_or_else(|| current_range(state.document()));
    match action_for_input(&ctx.input_type, ctx.data.as_deref(), range) {
        Some(action) => {
            tracing::debug!(?action, "beforeinput");
            state.apply_action(&action);
        }
        None => tracing::trace!(input_type = ?ctx.input_type, "beforeinput with nothing to apply"),
    }
    BeforeInputResult::Handled
}

/// Attach the `beforeinput` listener. Dioxus has no handler for it, so it
/// goes on the element directly and lives as long as the page.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn listen(editor_id: &'static str, mut state: dioxus::prelude::Signal<AppState>) {
    use dioxus::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;

    use super::dom;

    let Some(editor) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(editor_id))
    else {
        return;
    };

    let closure = Closure::<dyn FnMut(web_sys::InputEvent)>::new(move |evt: web_sys::InputEvent| {
        let ctx = BeforeInputContext {
            input_type: InputType::from(evt.input_type().as_str()),
            data: dom::input_data(&evt),
            target_range: dom::input_target_range(editor_id, &evt),
            is_composing: evt.is_composing(),
        };
        if handle_beforeinput(&mut state.write(), ctx) == BeforeInputResult::Handled {
            evt.prevent_default();
        }
    });
    if let Err(err) =
        editor.add_event_listener_with_callback("beforeinput", closure.as_ref().unchecked_ref())
    {
        tracing::error!(?err, "could not listen for beforeinput");
    }
    closure.forget();
}
