//! Action and command execution.
//!
//! `execute_action` is the central dispatch point for everything that edits
//! a [`RichDocument`]; `execute_command` is the subset reachable from the
//! toolbar's symbolic commands.

use crate::actions::{EditorAction, Range};
use crate::command::{CommandOutcome, FormatCommand};
use crate::document::RichDocument;
use crate::style::{Alignment, BlockKind, Mark};
use crate::types::Selection;
use crate::undo::UndoManager;

/// Apply a formatting command at the document's current selection.
pub fn execute_command(doc: &mut RichDocument, cmd: &FormatCommand) -> CommandOutcome {
    let changed = match cmd {
        FormatCommand::Bold => doc.toggle_mark(Mark::Bold),
        FormatCommand::Italic => doc.toggle_mark(Mark::Italic),
        FormatCommand::Underline => doc.toggle_mark(Mark::Underline),
        FormatCommand::StrikeThrough => doc.toggle_mark(Mark::Strikethrough),
        FormatCommand::FormatBlock(tag) => doc.toggle_block_kind(tag.kind()),
        FormatCommand::InsertUnorderedList => doc.toggle_block_kind(BlockKind::BulletItem),
        FormatCommand::InsertOrderedList => doc.toggle_block_kind(BlockKind::NumberedItem),
        FormatCommand::ForeColor(color) => doc.set_color(*color),
        FormatCommand::InsertImage(src) => doc.insert_image(doc.selection_range(), src.clone()),
        FormatCommand::CreateLink(url) => doc.set_link(url.clone()),
        FormatCommand::JustifyLeft => doc.set_alignment(Alignment::Left),
        FormatCommand::JustifyCenter => doc.set_alignment(Alignment::Center),
        FormatCommand::JustifyRight => doc.set_alignment(Alignment::Right),
    };
    tracing::debug!(
        command = cmd.name(),
        value = cmd.value().as_deref(),
        changed,
        "executed format command"
    );
    CommandOutcome::from_changed(changed)
}

/// Execute an editor action on a document.
///
/// Returns true if the action was handled and the document changed.
pub fn execute_action(doc: &mut RichDocument, action: &EditorAction) -> bool {
    match action {
        EditorAction::Insert { text, range } | EditorAction::Paste { text, range } => {
            doc.insert_text((*range).into(), text)
        }
        EditorAction::InsertParagraph { range } => doc.split_block((*range).into()),
        EditorAction::DeleteBackward { range } => doc.delete_backward((*range).into()),
        EditorAction::DeleteForward { range } => doc.delete_forward((*range).into()),
        EditorAction::DeleteWordBackward { range } => doc.delete_word_backward((*range).into()),
        EditorAction::DeleteWordForward { range } => doc.delete_word_forward((*range).into()),
        EditorAction::DeleteToLineStart { range } => doc.delete_to_line_start((*range).into()),
        EditorAction::DeleteToLineEnd { range } => doc.delete_to_line_end((*range).into()),
        EditorAction::Undo => doc.undo(),
        EditorAction::Redo => doc.redo(),
        EditorAction::ToggleBold => doc.toggle_mark(Mark::Bold),
        EditorAction::ToggleItalic => doc.toggle_mark(Mark::Italic),
        EditorAction::ToggleUnderline => doc.toggle_mark(Mark::Underline),
        EditorAction::ToggleStrikethrough => doc.toggle_mark(Mark::Strikethrough),
        EditorAction::Format(cmd) => execute_command(doc, cmd).is_applied(),
        EditorAction::Cut | EditorAction::Copy => {
            // Clipboard access is handled by the platform layer.
            false
        }
        EditorAction::SelectAll => doc.select_all(),
        EditorAction::MoveCursor { offset } => {
            doc.set_cursor_offset(*offset);
            true
        }
        EditorAction::ExtendSelection { offset } => {
            let anchor = match doc.selection() {
                Some(sel) => sel.anchor,
                None => doc.cursor_offset(),
            };
            doc.set_selection(Some(Selection::new(anchor, *offset)));
            true
        }
    }
}

/// The live selection as an action range.
pub fn current_range(doc: &RichDocument) -> Range {
    doc.selection_range().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::style::{BlockTag, HeadingLevel};
    use crate::url::SafeUrl;

    fn doc_with_selection(text: &str, start: usize, end: usize) -> RichDocument {
        let mut doc = RichDocument::from_plain_text(text);
        doc.set_selection(Some(Selection::new(start, end)));
        doc
    }

    #[test]
    fn test_bold_command() {
        let mut doc = doc_with_selection("hello world", 0, 5);
        let outcome = execute_command(&mut doc, &FormatCommand::Bold);
        assert_eq!(outcome, CommandOutcome::Applied);
        assert!(doc.runs().all(0..5, |s| s.bold));
        assert!(doc.runs().all(5..11, |s| !s.bold));
    }

    #[test]
    fn test_format_block_toggles() {
        let mut doc = doc_with_selection("Heading", 0, 0);
        let cmd = FormatCommand::FormatBlock(BlockTag::H2);
        execute_command(&mut doc, &cmd);
        assert_eq!(
            doc.current_block().kind,
            BlockKind::Heading(HeadingLevel::H2)
        );
        execute_command(&mut doc, &cmd);
        assert_eq!(doc.current_block().kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_justify_left_on_left_block_is_unchanged() {
        let mut doc = doc_with_selection("text", 0, 4);
        assert_eq!(
            execute_command(&mut doc, &FormatCommand::JustifyLeft),
            CommandOutcome::Unchanged
        );
        assert_eq!(
            execute_command(&mut doc, &FormatCommand::JustifyRight),
            CommandOutcome::Applied
        );
        assert!(!doc.can_redo());
        assert!(doc.can_undo());
    }

    #[test]
    fn test_fore_color_is_one_undo_step() {
        let mut doc = doc_with_selection("paint me", 0, 8);
        execute_command(&mut doc, &FormatCommand::ForeColor(Color::rgb(0x80, 0, 0x80)));
        assert!(doc.undo());
        assert!(doc.runs().all(0..8, |s| s.color.is_none()));
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_insert_image_command() {
        let mut doc = doc_with_selection("ab", 1, 1);
        let src = SafeUrl::parse("https://example.com/x.png").unwrap();
        execute_command(&mut doc, &FormatCommand::InsertImage(src.clone()));
        assert_eq!(doc.runs().image_at(1), Some(&src));
        assert_eq!(doc.len_chars(), 3);
    }

    #[test]
    fn test_typing_actions() {
        let mut doc = RichDocument::new();
        for c in ["h", "i"] {
            let range = current_range(&doc);
            assert!(execute_action(
                &mut doc,
                &EditorAction::Insert {
                    text: c.into(),
                    range
                }
            ));
        }
        let range = current_range(&doc);
        assert!(execute_action(&mut doc, &EditorAction::InsertParagraph { range }));
        let range = current_range(&doc);
        assert!(execute_action(&mut doc, &EditorAction::DeleteBackward { range }));
        assert_eq!(doc.plain_text(), "hi");
        assert!(execute_action(&mut doc, &EditorAction::SelectAll));
        assert_eq!(doc.selected_text(), "hi");
    }

    #[test]
    fn test_extend_selection() {
        let mut doc = RichDocument::from_plain_text("abcdef");
        execute_action(&mut doc, &EditorAction::MoveCursor { offset: 4 });
        execute_action(&mut doc, &EditorAction::ExtendSelection { offset: 1 });
        assert_eq!(doc.selection(), Some(Selection::new(4, 1)));
        assert_eq!(doc.selected_text(), "bcd");
    }

    #[test]
    fn test_clipboard_actions_are_platform_handled() {
        let mut doc = doc_with_selection("abc", 0, 3);
        assert!(!execute_action(&mut doc, &EditorAction::Copy));
        assert!(!execute_action(&mut doc, &EditorAction::Cut));
        assert_eq!(doc.plain_text(), "abc");
    }
}
