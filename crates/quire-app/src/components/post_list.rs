use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use crate::posts::Post;
use crate::state::AppState;

fn format_created(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}

/// The most recent posts, newest first.
#[component]
pub fn RecentPosts() -> Element {
    let state = use_context::<Signal<AppState>>();
    let posts: Vec<Post> = state.read().recent_posts().to_vec();

    if posts.is_empty() {
        return rsx! {};
    }

    rsx! {
        section { class: "recent-posts",
            h2 { "Recent Posts" }
            for post in posts {
                PostItem { key: "{post.id}", post }
            }
        }
    }
}

#[component]
fn PostItem(post: Post) -> Element {
    let title = post.display_title().to_string();
    let created = format_created(post.created_at);
    let timestamp = post.created_at.to_rfc3339();
    let status = post.status.as_str();

    rsx! {
        article { class: "post-item",
            div { class: "post-item-header",
                h3 { class: "post-item-title", "{title}" }
                span { class: "post-status {status}", "{status}" }
            }
            if !post.tags.is_empty() {
                div { class: "post-item-tags",
                    for tag in post.tags.iter() {
                        span { class: "tag-pill", "{tag}" }
                    }
                }
            }
            time { class: "post-item-date", datetime: "{timestamp}", "{created}" }
        }
    }
}
