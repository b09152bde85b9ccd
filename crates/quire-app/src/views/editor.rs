use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, use_toast};

use crate::CONFIG;
use crate::components::{RecentPosts, RichEditor, UrlPrompt};
use crate::posts::PostStatus;
use crate::state::AppState;

const EDITOR_CSS: Asset = asset!("/assets/styling/editor.css");

#[component]
pub fn EditorPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toast = use_toast();
    let app_title = &CONFIG.app_title;

    let (title, tags) = {
        let state = state.read();
        (state.draft().title.clone(), state.draft().tags.clone())
    };

    let mut store = move |status: PostStatus| {
        let id = match status {
            PostStatus::Saved => state.write().save().id,
            PostStatus::Published => state.write().publish().id,
        };
        tracing::debug!(%id, %status, "post stored from editor page");
        toast.success(status.success_message().to_string(), ToastOptions::new());
    };

    rsx! {
        document::Link { rel: "stylesheet", href: EDITOR_CSS }
        div { class: "editor-page",
            header { class: "editor-header",
                h1 { "{app_title}" }
            }
            div { class: "post-form",
                div { class: "form-field",
                    label { r#for: "post-title", "Title" }
                    input {
                        id: "post-title",
                        class: "title-input",
                        r#type: "text",
                        placeholder: "Enter your blog title...",
                        value: "{title}",
                        oninput: move |e| state.write().set_title(&e.value()),
                    }
                }
                div { class: "form-field",
                    label { r#for: "post-tags", "Tags (comma-separated)" }
                    input {
                        id: "post-tags",
                        class: "tags-input",
                        r#type: "text",
                        placeholder: "e.g. technology, programming, web development",
                        value: "{tags}",
                        oninput: move |e| state.write().set_tags(&e.value()),
                    }
                }
                div { class: "form-field",
                    label { "Content" }
                    RichEditor {}
                }
                div { class: "form-actions",
                    button {
                        class: "button secondary",
                        r#type: "button",
                        onclick: move |_| store(PostStatus::Saved),
                        "Save Draft"
                    }
                    button {
                        class: "button primary",
                        r#type: "button",
                        onclick: move |_| store(PostStatus::Published),
                        "Publish Post"
                    }
                }
            }
            RecentPosts {}
            UrlPrompt {}
        }
    }
}
