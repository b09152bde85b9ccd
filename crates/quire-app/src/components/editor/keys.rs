//! Dioxus keyboard event conversion.

use dioxus::prelude::keyboard_types::Key as KT;
use quire_editor_core::{Key, KeyCombo, Modifiers};

/// Convert a dioxus key to the editor's key type.
pub fn key_from_dioxus(key: KT) -> Key {
    match key {
        KT::Character(s) => Key::character(s.as_str()),
        KT::Backspace => Key::Backspace,
        KT::Delete => Key::Delete,
        KT::Enter => Key::Enter,
        KT::Tab => Key::Tab,
        KT::Escape => Key::Escape,
        KT::ArrowLeft => Key::ArrowLeft,
        KT::ArrowRight => Key::ArrowRight,
        KT::ArrowUp => Key::ArrowUp,
        KT::ArrowDown => Key::ArrowDown,
        KT::Home => Key::Home,
        KT::End => Key::End,
        KT::PageUp => Key::PageUp,
        KT::PageDown => Key::PageDown,
        KT::Alt => Key::Alt,
        KT::AltGraph => Key::AltGraph,
        KT::CapsLock => Key::CapsLock,
        KT::Control => Key::Control,
        KT::Meta => Key::Meta,
        KT::Shift => Key::Shift,
        KT::Undo => Key::Undo,
        KT::Redo => Key::Redo,
        _ => Key::Unidentified,
    }
}

pub fn keycombo_from_dioxus_event(event: &dioxus::events::KeyboardData) -> KeyCombo {
    let key = key_from_dioxus(event.key());
    let modifiers = Modifiers {
        ctrl: event.modifiers().ctrl(),
        alt: event.modifiers().alt(),
        shift: event.modifiers().shift(),
        meta: event.modifiers().meta(),
    };
    KeyCombo::with_modifiers(key, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversion() {
        assert_eq!(
            key_from_dioxus(KT::Character("a".to_string())),
            Key::character("a")
        );
        assert_eq!(key_from_dioxus(KT::Enter), Key::Enter);
        assert_eq!(key_from_dioxus(KT::F5), Key::Unidentified);
    }
}
