//! Platform detection for keybindings.

use std::sync::OnceLock;

static IS_MAC: OnceLock<bool> = OnceLock::new();

/// Whether the primary shortcut modifier is Cmd. Detection runs once.
pub fn is_mac() -> bool {
    *IS_MAC.get_or_init(detect_mac)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_mac() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let navigator = window.navigator();
    let platform = navigator.platform().unwrap_or_default().to_lowercase();
    let user_agent = navigator.user_agent().unwrap_or_default().to_lowercase();
    let ios = user_agent.contains("iphone") || user_agent.contains("ipad");
    platform.contains("mac") && !ios
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_mac() -> bool {
    cfg!(target_os = "macos")
}
