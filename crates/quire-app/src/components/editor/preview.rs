use dioxus::prelude::*;

use crate::state::AppState;

/// Read-only rendering of the draft, shown instead of the editor.
#[component]
pub fn PostPreview() -> Element {
    let state = use_context::<Signal<AppState>>();
    let html = use_memo(move || state.read().preview_html());

    rsx! {
        div { class: "preview-container", dangerous_inner_html: "{html}" }
    }
}
