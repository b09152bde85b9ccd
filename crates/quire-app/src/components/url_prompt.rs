use dioxus::prelude::keyboard_types::Key;
use dioxus::prelude::*;

use super::dialog::{DialogContent, DialogDescription, DialogRoot, DialogTitle};
use crate::state::AppState;

/// Dialog for the image and link URL prompts. Resolves the open prompt with
/// the entered text, or with `None` when dismissed.
#[component]
pub fn UrlPrompt() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let mut value = use_signal(String::new);
    let request = state.read().pending_prompt().cloned();

    let mut resolve = move |answer: Option<String>| {
        state.write().answer_prompt(answer);
        value.set(String::new());
    };

    let Some(request) = request else {
        return rsx! {};
    };
    let kind = request.kind;
    let (title, label) = (kind.title(), kind.label());
    let selected = request.captured.text;

    rsx! {
        DialogRoot {
            open: true,
            on_open_change: move |open: bool| {
                if !open {
                    resolve(None);
                }
            },
            DialogContent {
                DialogTitle { "{title}" }
                DialogDescription {
                    if selected.is_empty() {
                        "{label}"
                    } else {
                        "{label} (linking \"{selected}\")"
                    }
                }
                input {
                    class: "dialog-input",
                    r#type: "url",
                    placeholder: kind.placeholder(),
                    autofocus: true,
                    value: "{value}",
                    oninput: move |e| value.set(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                            resolve(Some(value()));
                        }
                    },
                }
                div { class: "dialog-actions",
                    button {
                        class: "button secondary",
                        r#type: "button",
                        onclick: move |_| resolve(None),
                        "Cancel"
                    }
                    button {
                        class: "button primary",
                        r#type: "button",
                        onclick: move |_| resolve(Some(value())),
                        "OK"
                    }
                }
            }
        }
    }
}
