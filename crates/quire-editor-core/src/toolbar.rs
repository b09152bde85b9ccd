//! The toolbar's command table.
//!
//! Each entry maps a button to what pressing it does. Most buttons issue a
//! fixed command; a few open UI (color picker, URL prompts, preview).

use crate::command::FormatCommand;
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Issue a fixed command through the executor.
    Command {
        name: &'static str,
        value: Option<&'static str>,
    },
    ToggleColorPicker,
    /// Ask for an image URL, then issue `insertImage`.
    PromptImage,
    /// Capture the selection, ask for a URL, then issue `createLink`.
    PromptLink,
    TogglePreview,
}

impl ToolbarAction {
    /// The parsed command for `Command` entries.
    pub fn command(&self) -> Option<Result<FormatCommand, CommandError>> {
        match self {
            Self::Command { name, value } => Some(FormatCommand::parse(name, *value)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub action: ToolbarAction,
}

impl ToolbarButton {
    /// Tooltip text. The preview toggle names the mode it switches to.
    pub fn title(&self, preview_active: bool) -> &'static str {
        match self.action {
            ToolbarAction::TogglePreview if preview_active => "Edit Mode",
            _ => self.title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarSection {
    pub name: &'static str,
    pub buttons: &'static [ToolbarButton],
}

const fn command(
    id: &'static str,
    icon: &'static str,
    title: &'static str,
    name: &'static str,
    value: Option<&'static str>,
) -> ToolbarButton {
    ToolbarButton {
        id,
        icon,
        title,
        action: ToolbarAction::Command { name, value },
    }
}

const fn ui(
    id: &'static str,
    icon: &'static str,
    title: &'static str,
    action: ToolbarAction,
) -> ToolbarButton {
    ToolbarButton {
        id,
        icon,
        title,
        action,
    }
}

/// Toolbar sections, in display order.
pub const TOOLBAR: &[ToolbarSection] = &[
    ToolbarSection {
        name: "inline",
        buttons: &[
            command("bold", "B", "Bold", "bold", None),
            command("italic", "I", "Italic", "italic", None),
            command("underline", "U", "Underline", "underline", None),
            command("strike", "S", "Strikethrough", "strikeThrough", None),
        ],
    },
    ToolbarSection {
        name: "headings",
        buttons: &[
            command("h1", "H1", "Heading 1", "formatBlock", Some("h1")),
            command("h2", "H2", "Heading 2", "formatBlock", Some("h2")),
            command("h3", "H3", "Heading 3", "formatBlock", Some("h3")),
        ],
    },
    ToolbarSection {
        name: "lists",
        buttons: &[
            command("bullets", "•", "Bullet List", "insertUnorderedList", None),
            command("numbers", "1.", "Numbered List", "insertOrderedList", None),
        ],
    },
    ToolbarSection {
        name: "color",
        buttons: &[ui(
            "color",
            "🎨",
            "Text Color",
            ToolbarAction::ToggleColorPicker,
        )],
    },
    ToolbarSection {
        name: "blocks",
        buttons: &[
            command("quote", "❝", "Blockquote", "formatBlock", Some("blockquote")),
            command("code", "<>", "Code Block", "formatBlock", Some("pre")),
        ],
    },
    ToolbarSection {
        name: "media",
        buttons: &[
            ui("image", "🖼", "Insert Image", ToolbarAction::PromptImage),
            ui("link", "🔗", "Insert Link", ToolbarAction::PromptLink),
        ],
    },
    ToolbarSection {
        name: "align",
        buttons: &[
            command("left", "⇤", "Align Left", "justifyLeft", None),
            command("center", "↔", "Align Center", "justifyCenter", None),
            command("right", "⇥", "Align Right", "justifyRight", None),
        ],
    },
    ToolbarSection {
        name: "view",
        buttons: &[ui(
            "preview",
            "👁",
            "Preview Mode",
            ToolbarAction::TogglePreview,
        )],
    },
];

/// Every button, flattened in display order.
pub fn buttons() -> impl Iterator<Item = &'static ToolbarButton> {
    TOOLBAR.iter().flat_map(|section| section.buttons.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_entry_parses() {
        for button in buttons() {
            if let Some(parsed) = button.action.command() {
                assert!(parsed.is_ok(), "{} does not parse: {parsed:?}", button.id);
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: std::collections::HashSet<_> = buttons().map(|b| b.id).collect();
        assert_eq!(ids.len(), buttons().count());
    }

    #[test]
    fn test_display_order() {
        let ids: Vec<_> = buttons().map(|b| b.id).collect();
        assert_eq!(
            ids,
            [
                "bold", "italic", "underline", "strike", "h1", "h2", "h3", "bullets", "numbers",
                "color", "quote", "code", "image", "link", "left", "center", "right", "preview",
            ]
        );
    }

    #[test]
    fn test_preview_title_flips() {
        let preview = buttons().find(|b| b.id == "preview").unwrap();
        assert_eq!(preview.title(false), "Preview Mode");
        assert_eq!(preview.title(true), "Edit Mode");
        let bold = buttons().find(|b| b.id == "bold").unwrap();
        assert_eq!(bold.title(true), "Bold");
    }
}
