//! Editor actions and keybindings.
//!
//! Platform-agnostic definitions for editor operations. `EditorAction`
//! represents semantic editing operations, decoupled from whether they came
//! from a key press, a toolbar button or a clipboard event.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::command::FormatCommand;

/// Character offsets an action applies to. `start` may exceed `end` for a
/// backwards selection; conversion to `std::ops::Range` orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start.min(r.end)..r.start.max(r.end)
    }
}

/// A semantic edit request, independent of the input that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Typed text replacing `range`.
    Insert { text: String, range: Range },
    /// Enter: split the current block at the caret.
    InsertParagraph { range: Range },
    /// Plain text from the clipboard.
    Paste { text: String, range: Range },

    /// Backspace.
    DeleteBackward { range: Range },
    /// The Delete key.
    DeleteForward { range: Range },
    DeleteWordBackward { range: Range },
    DeleteWordForward { range: Range },
    /// Cmd+Backspace on macOS.
    DeleteToLineStart { range: Range },
    /// Cmd+Delete on macOS.
    DeleteToLineEnd { range: Range },

    Undo,
    Redo,

    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    /// Any toolbar command.
    Format(FormatCommand),

    /// The platform performs the copy half of a cut and then issues a deletion.
    Cut,
    Copy,
    SelectAll,

    MoveCursor { offset: usize },
    ExtendSelection { offset: usize },
}

impl EditorAction {
    /// Replace the target range of range-carrying actions; others pass through.
    pub fn with_range(self, range: Range) -> Self {
        use EditorAction::*;
        match self {
            Insert { text, .. } => Insert { text, range },
            Paste { text, .. } => Paste { text, range },
            InsertParagraph { .. } => InsertParagraph { range },
            DeleteBackward { .. } => DeleteBackward { range },
            DeleteForward { .. } => DeleteForward { range },
            DeleteWordBackward { .. } => DeleteWordBackward { range },
            DeleteWordForward { .. } => DeleteWordForward { range },
            DeleteToLineStart { .. } => DeleteToLineStart { range },
            DeleteToLineEnd { .. } => DeleteToLineEnd { range },
            other => other,
        }
    }
}

/// The keys the editor distinguishes. Front ends translate their native key
/// events into this; anything unbound becomes `Unidentified`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable input, possibly several chars for a composed key.
    Character(SmolStr),
    Unidentified,

    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,

    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    Alt,
    AltGraph,
    CapsLock,
    Control,
    Meta,
    Shift,

    /// Dedicated history keys on some keyboards.
    Undo,
    Redo,
}

impl Key {
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Keys the browser handles by moving the caret.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt | Self::AltGraph | Self::CapsLock | Self::Control | Self::Meta | Self::Shift
        )
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    const fn of(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    pub const NONE: Self = Self::of(false, false, false, false);
    pub const CTRL: Self = Self::of(true, false, false, false);
    pub const ALT: Self = Self::of(false, true, false, false);
    pub const SHIFT: Self = Self::of(false, false, true, false);
    pub const META: Self = Self::of(false, false, false, true);
    pub const CTRL_SHIFT: Self = Self::of(true, false, true, false);
    pub const META_SHIFT: Self = Self::of(false, false, true, true);

    /// Cmd on macOS, Ctrl elsewhere.
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    pub fn primary_shift(is_mac: bool) -> Self {
        if is_mac { Self::META_SHIFT } else { Self::CTRL_SHIFT }
    }

    /// Whether any modifier that turns a key into a shortcut is held.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Windows and Linux report AltGr as Ctrl+Alt.
    pub fn is_alt_graph(&self) -> bool {
        self.ctrl && self.alt && !self.meta
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac))
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary_shift(is_mac))
    }

    /// Letter keys are matched case-insensitively, since Shift changes the
    /// reported character.
    fn normalized(&self) -> Self {
        match &self.key {
            Key::Character(s) if s.chars().count() == 1 => Self {
                key: Key::Character(s.to_lowercase().into()),
                modifiers: self.modifiers,
            },
            _ => self.clone(),
        }
    }
}

/// Keybinding table from key combos to actions.
///
/// Stored actions carry a placeholder range; [`KeybindingConfig::lookup`]
/// fills in the live one.
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    bindings: HashMap<KeyCombo, EditorAction>,
}

impl KeybindingConfig {
    /// The standard bindings, using Cmd on macOS and Ctrl elsewhere.
    pub fn default_for_platform(is_mac: bool) -> Self {
        let mut config = Self::default();
        let placeholder = Range::caret(0);
        let primary = |c: &str| KeyCombo::primary(Key::character(c), is_mac);
        let primary_shift = |c: &str| KeyCombo::primary_shift(Key::character(c), is_mac);

        config.bind(primary("b"), EditorAction::ToggleBold);
        config.bind(primary("i"), EditorAction::ToggleItalic);
        config.bind(primary("u"), EditorAction::ToggleUnderline);
        config.bind(primary_shift("x"), EditorAction::ToggleStrikethrough);
        config.bind(primary("z"), EditorAction::Undo);
        config.bind(primary_shift("z"), EditorAction::Redo);
        config.bind(primary("y"), EditorAction::Redo);
        config.bind(primary("a"), EditorAction::SelectAll);
        config.bind(KeyCombo::new(Key::Undo), EditorAction::Undo);
        config.bind(KeyCombo::new(Key::Redo), EditorAction::Redo);

        config.bind(
            KeyCombo::new(Key::Enter),
            EditorAction::InsertParagraph { range: placeholder },
        );
        config.bind(
            KeyCombo::with_modifiers(Key::Enter, Modifiers::SHIFT),
            EditorAction::InsertParagraph { range: placeholder },
        );
        config.bind(
            KeyCombo::new(Key::Backspace),
            EditorAction::DeleteBackward { range: placeholder },
        );
        config.bind(
            KeyCombo::with_modifiers(Key::Backspace, Modifiers::SHIFT),
            EditorAction::DeleteBackward { range: placeholder },
        );
        config.bind(
            KeyCombo::new(Key::Delete),
            EditorAction::DeleteForward { range: placeholder },
        );

        // Word and line deletion follow platform conventions.
        let word = if is_mac { Modifiers::ALT } else { Modifiers::CTRL };
        config.bind(
            KeyCombo::with_modifiers(Key::Backspace, word),
            EditorAction::DeleteWordBackward { range: placeholder },
        );
        config.bind(
            KeyCombo::with_modifiers(Key::Delete, word),
            EditorAction::DeleteWordForward { range: placeholder },
        );
        if is_mac {
            config.bind(
                KeyCombo::with_modifiers(Key::Backspace, Modifiers::META),
                EditorAction::DeleteToLineStart { range: placeholder },
            );
            config.bind(
                KeyCombo::with_modifiers(Key::Delete, Modifiers::META),
                EditorAction::DeleteToLineEnd { range: placeholder },
            );
        }

        config
    }

    pub fn bind(&mut self, combo: KeyCombo, action: EditorAction) {
        self.bindings.insert(combo.normalized(), action);
    }

    /// Find the action for `combo`, targeting `range`.
    pub fn lookup(&self, combo: &KeyCombo, range: Range) -> Option<EditorAction> {
        self.bindings
            .get(&combo.normalized())
            .cloned()
            .map(|action| action.with_range(range))
    }
}

/// Why a key press produced no action.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Not bound to anything; the browser's default applies.
    NotHandled,
    /// Caret movement or a bare modifier; the selection is read back afterwards.
    PassThrough,
}

/// Translate a key press into an action, without executing it.
///
/// Bound shortcuts win; otherwise a printable character becomes an insertion
/// unless Ctrl or Cmd turn it into an (unbound) shortcut. Characters typed
/// with AltGr still count as text, except plain ASCII letters and digits,
/// which is what Ctrl+Alt+letter reports on layouts without AltGr.
/// Navigation and modifier-only presses pass through to the platform.
pub fn action_for_key(
    config: &KeybindingConfig,
    combo: &KeyCombo,
    range: Range,
) -> Result<EditorAction, KeydownResult> {
    if let Some(action) = config.lookup(combo, range) {
        return Ok(action);
    }
    if combo.key.is_navigation() || combo.key.is_modifier() {
        return Err(KeydownResult::PassThrough);
    }
    match &combo.key {
        Key::Character(text) if is_text_input(text, combo.modifiers) => {
            Ok(EditorAction::Insert {
                text: text.to_string(),
                range,
            })
        }
        Key::Tab | Key::Escape => Err(KeydownResult::PassThrough),
        _ => Err(KeydownResult::NotHandled),
    }
}

fn is_text_input(text: &str, modifiers: Modifiers) -> bool {
    if !modifiers.is_command() {
        return true;
    }
    modifiers.is_alt_graph() && !text.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Browser `beforeinput` intents, by their `inputType` name.
///
/// Input that bypasses keydown arrives this way: IME and dead-key
/// composition, virtual keyboards, spellcheck replacements and context-menu
/// edits. Types the editor has no use for land in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    InsertText,
    InsertCompositionText,
    InsertReplacementText,
    InsertFromPaste,
    InsertFromDrop,
    InsertParagraph,
    InsertLineBreak,

    DeleteContentBackward,
    DeleteContentForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteLineBackward,
    DeleteLineForward,
    /// `deleteByCut`, `deleteByDrag` and plain `deleteContent`: remove the target range.
    DeleteContent,

    HistoryUndo,
    HistoryRedo,

    FormatBold,
    FormatItalic,
    FormatUnderline,
    FormatStrikethrough,

    Unknown(SmolStr),
}

impl From<&str> for InputType {
    fn from(name: &str) -> Self {
        match name {
            "insertText" => Self::InsertText,
            "insertCompositionText" => Self::InsertCompositionText,
            "insertReplacementText" => Self::InsertReplacementText,
            "insertFromPaste" | "insertFromPasteAsQuotation" => Self::InsertFromPaste,
            "insertFromDrop" => Self::InsertFromDrop,
            "insertParagraph" => Self::InsertParagraph,
            "insertLineBreak" => Self::InsertLineBreak,
            "deleteContentBackward" => Self::DeleteContentBackward,
            "deleteContentForward" => Self::DeleteContentForward,
            "deleteWordBackward" | "deleteEntireWordBackward" => Self::DeleteWordBackward,
            "deleteWordForward" | "deleteEntireWordForward" => Self::DeleteWordForward,
            "deleteSoftLineBackward" | "deleteHardLineBackward" => Self::DeleteLineBackward,
            "deleteSoftLineForward" | "deleteHardLineForward" => Self::DeleteLineForward,
            "deleteByCut" | "deleteByDrag" | "deleteContent" => Self::DeleteContent,
            "historyUndo" => Self::HistoryUndo,
            "historyRedo" => Self::HistoryRedo,
            "formatBold" => Self::FormatBold,
            "formatItalic" => Self::FormatItalic,
            "formatUnderline" => Self::FormatUnderline,
            "formatStrikeThrough" => Self::FormatStrikethrough,
            other => Self::Unknown(SmolStr::new(other)),
        }
    }
}

/// Translate a `beforeinput` intent into an action on `range`.
///
/// `None` means there is nothing for the model to do: composition updates,
/// insertions that carried no text, removing an empty range, or unknown
/// intents.
pub fn action_for_input(
    input: &InputType,
    data: Option<&str>,
    range: Range,
) -> Option<EditorAction> {
    let text = || data.filter(|t| !t.is_empty()).map(str::to_owned);
    let action = match input {
        InputType::InsertText | InputType::InsertReplacementText | InputType::InsertFromDrop => {
            EditorAction::Insert {
                text: text()?,
                range,
            }
        }
        InputType::InsertFromPaste => EditorAction::Paste {
            text: text()?,
            range,
        },
        InputType::InsertParagraph | InputType::InsertLineBreak => {
            EditorAction::InsertParagraph { range }
        }
        InputType::DeleteContentBackward => EditorAction::DeleteBackward { range },
        InputType::DeleteContentForward => EditorAction::DeleteForward { range },
        InputType::DeleteWordBackward => EditorAction::DeleteWordBackward { range },
        InputType::DeleteWordForward => EditorAction::DeleteWordForward { range },
        InputType::DeleteLineBackward => EditorAction::DeleteToLineStart { range },
        InputType::DeleteLineForward => EditorAction::DeleteToLineEnd { range },
        InputType::DeleteContent if !range.is_caret() => EditorAction::DeleteBackward { range },
        InputType::HistoryUndo => EditorAction::Undo,
        InputType::HistoryRedo => EditorAction::Redo,
        InputType::FormatBold => EditorAction::ToggleBold,
        InputType::FormatItalic => EditorAction::ToggleItalic,
        InputType::FormatUnderline => EditorAction::ToggleUnderline,
        InputType::FormatStrikethrough => EditorAction::ToggleStrikethrough,
        InputType::DeleteContent | InputType::InsertCompositionText | InputType::Unknown(_) => {
            return None;
        }
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_shortcuts_per_platform() {
        let mac = KeybindingConfig::default_for_platform(true);
        let other = KeybindingConfig::default_for_platform(false);
        let range = Range::caret(0);

        assert_eq!(
            mac.lookup(&KeyCombo::primary(Key::character("b"), true), range),
            Some(EditorAction::ToggleBold)
        );
        assert_eq!(
            other.lookup(&KeyCombo::primary(Key::character("b"), false), range),
            Some(EditorAction::ToggleBold)
        );
        // Ctrl+B is not a shortcut on macOS.
        assert_eq!(
            mac.lookup(&KeyCombo::with_modifiers(Key::character("b"), Modifiers::CTRL), range),
            None
        );
    }

    #[test]
    fn test_shifted_letters_match() {
        let config = KeybindingConfig::default_for_platform(false);
        let combo = KeyCombo::with_modifiers(Key::character("Z"), Modifiers::CTRL_SHIFT);
        assert_eq!(
            config.lookup(&combo, Range::caret(0)),
            Some(EditorAction::Redo)
        );
    }

    #[test]
    fn test_lookup_fills_range() {
        let config = KeybindingConfig::default_for_platform(false);
        let action = config.lookup(&KeyCombo::new(Key::Backspace), Range::new(2, 5));
        assert_eq!(
            action,
            Some(EditorAction::DeleteBackward {
                range: Range::new(2, 5)
            })
        );
    }

    #[test]
    fn test_action_for_key() {
        let config = KeybindingConfig::default_for_platform(false);
        let range = Range::caret(3);

        assert_eq!(
            action_for_key(&config, &KeyCombo::new(Key::character("q")), range),
            Ok(EditorAction::Insert {
                text: "q".into(),
                range
            })
        );
        assert_eq!(
            action_for_key(&config, &KeyCombo::new(Key::ArrowLeft), range),
            Err(KeydownResult::PassThrough)
        );
        assert_eq!(
            action_for_key(
                &config,
                &KeyCombo::with_modifiers(Key::character("k"), Modifiers::CTRL),
                range
            ),
            Err(KeydownResult::NotHandled)
        );
    }

    #[test]
    fn test_alt_graph_characters_are_text() {
        let config = KeybindingConfig::default_for_platform(false);
        let range = Range::caret(0);
        let alt_graph = Modifiers {
            ctrl: true,
            alt: true,
            ..Modifiers::NONE
        };

        for typed in ["@", "{", "[", "€", "ą"] {
            let combo = KeyCombo::with_modifiers(Key::character(typed), alt_graph);
            assert_eq!(
                action_for_key(&config, &combo, range),
                Ok(EditorAction::Insert {
                    text: typed.into(),
                    range
                }),
                "AltGr produced {typed:?}"
            );
        }
        // Ctrl+Alt+letter without an AltGr layout is still not text.
        let combo = KeyCombo::with_modifiers(Key::character("k"), alt_graph);
        assert_eq!(
            action_for_key(&config, &combo, range),
            Err(KeydownResult::NotHandled)
        );
    }

    #[test]
    fn test_dedicated_history_keys() {
        let config = KeybindingConfig::default_for_platform(true);
        let range = Range::caret(0);
        assert_eq!(
            action_for_key(&config, &KeyCombo::new(Key::Undo), range),
            Ok(EditorAction::Undo)
        );
        assert_eq!(
            action_for_key(&config, &KeyCombo::new(Key::Redo), range),
            Ok(EditorAction::Redo)
        );
    }

    #[test]
    fn test_input_type_names() {
        assert_eq!(InputType::from("insertText"), InputType::InsertText);
        assert_eq!(
            InputType::from("deleteEntireWordBackward"),
            InputType::DeleteWordBackward
        );
        assert_eq!(InputType::from("deleteByCut"), InputType::DeleteContent);
        assert_eq!(
            InputType::from("insertFromComposition"),
            InputType::Unknown("insertFromComposition".into())
        );
    }

    #[test]
    fn test_action_for_input() {
        let caret = Range::caret(4);
        let word = Range::new(2, 7);

        // Spellcheck replaces the misspelled word with the suggestion.
        assert_eq!(
            action_for_input(&InputType::InsertReplacementText, Some("their"), word),
            Some(EditorAction::Insert {
                text: "their".into(),
                range: word
            })
        );
        // Virtual keyboards send text without a usable keydown.
        assert_eq!(
            action_for_input(&InputType::InsertText, Some("é"), caret),
            Some(EditorAction::Insert {
                text: "é".into(),
                range: caret
            })
        );
        assert_eq!(
            action_for_input(&InputType::DeleteContentBackward, None, caret),
            Some(EditorAction::DeleteBackward { range: caret })
        );
        assert_eq!(
            action_for_input(&InputType::DeleteContent, None, word),
            Some(EditorAction::DeleteBackward { range: word })
        );
        assert_eq!(action_for_input(&InputType::DeleteContent, None, caret), None);
        assert_eq!(action_for_input(&InputType::InsertText, None, caret), None);
        assert_eq!(
            action_for_input(&InputType::InsertCompositionText, Some("か"), caret),
            None
        );
        assert_eq!(
            action_for_input(&InputType::HistoryUndo, None, caret),
            Some(EditorAction::Undo)
        );
    }
}
