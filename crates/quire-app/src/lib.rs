//! quire-app: a WYSIWYG blog post editor.
//!
//! `AppState` holds everything the page shows and is provided to every
//! component as a single signal; components read it and call its methods.

use std::sync::LazyLock;

use dioxus::prelude::*;

pub mod components;
pub mod config;
mod env;
pub mod error;
mod platform;
pub mod posts;
pub mod prompt;
pub mod state;
pub mod views;

use config::Config;
use state::AppState;

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(AppState::new(&CONFIG)));
    let app_title = &CONFIG.app_title;

    rsx! {
        document::Title { "{app_title}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        dioxus_primitives::toast::ToastProvider {
            views::EditorPage {}
        }
    }
}
