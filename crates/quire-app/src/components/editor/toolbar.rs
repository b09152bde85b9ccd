//! Formatting toolbar.

use dioxus::prelude::*;
use quire_editor_core::{TOOLBAR, ToolbarAction, ToolbarButton};

use super::dom::{self, EDITOR_ID};
use crate::error::EditorError;
use crate::prompt::{PromptKind, PromptOutcome};
use crate::state::AppState;

/// Open a URL prompt and apply its answer once the dialog resolves.
fn run_prompt(mut state: Signal<AppState>, kind: PromptKind) {
    let ticket = state.write().open_prompt(kind);
    spawn(async move {
        let (request, answer) = ticket.wait().await;
        match state.write().complete_prompt(request, answer) {
            Ok(PromptOutcome::Applied(outcome)) => {
                tracing::debug!(?kind, ?outcome, "prompt applied");
            }
            Ok(PromptOutcome::Cancelled) => {}
            Err(err) => tracing::warn!(?kind, %err, "prompt value not applied"),
        }
        dom::focus_editor(EDITOR_ID);
    });
}

fn press(mut state: Signal<AppState>, action: ToolbarAction) {
    match action {
        ToolbarAction::Command { name, value } => {
            match state.write().execute_named(name, value) {
                Ok(_) => {}
                Err(EditorError::PreviewActive) => {
                    tracing::debug!(command = name, "ignored in preview mode");
                }
                // Already logged by the state.
                Err(EditorError::Command(_)) => {}
            }
            dom::focus_editor(EDITOR_ID);
        }
        ToolbarAction::ToggleColorPicker => state.write().toggle_color_picker(),
        ToolbarAction::PromptImage => run_prompt(state, PromptKind::Image),
        ToolbarAction::PromptLink => run_prompt(state, PromptKind::Link),
        ToolbarAction::TogglePreview => {
            let preview = state.write().toggle_preview();
            tracing::debug!(preview, "toggled preview");
        }
    }
}

#[component]
pub fn EditorToolbar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let (preview, picker_open) = {
        let state = state.read();
        (state.is_preview_active(), state.is_color_picker_open())
    };

    rsx! {
        div { class: "editor-toolbar", role: "toolbar",
            for (i, section) in TOOLBAR.iter().enumerate() {
                if i > 0 {
                    span { class: "toolbar-separator" }
                }
                div { class: "toolbar-group", "data-group": section.name,
                    for button in section.buttons.iter() {
                        ToolbarItem {
                            key: "{button.id}",
                            button: *button,
                            preview,
                            picker_open,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ToolbarItem(button: ToolbarButton, preview: bool, picker_open: bool) -> Element {
    let state = use_context::<Signal<AppState>>();
    let active = match button.action {
        ToolbarAction::TogglePreview => preview,
        ToolbarAction::ToggleColorPicker => picker_open,
        _ => false,
    };
    let disabled = preview && button.action != ToolbarAction::TogglePreview;
    let class = if active { "toolbar-button active" } else { "toolbar-button" };

    rsx! {
        button {
            class,
            r#type: "button",
            title: button.title(preview),
            "aria-label": button.title(preview),
            disabled,
            // Keep the editor selection while clicking.
            onmousedown: move |evt| evt.prevent_default(),
            onclick: move |_| press(state, button.action),
            "{button.icon}"
        }
    }
}
