//! quire-editor-core: rich-text editor logic without framework dependencies.
//!
//! This crate provides:
//! - `RichDocument` - text rope, style runs and block formats kept in step
//! - `FormatCommand` / `execute_command` - the toolbar's command vocabulary
//! - `EditorAction` / `execute_action` - keyboard and clipboard editing
//! - HTML serialization, preview rendering, tag parsing and URL/color checks

pub mod actions;
pub mod color;
pub mod command;
pub mod document;
pub mod error;
pub mod execute;
pub mod preview;
pub mod render;
pub mod runs;
pub mod style;
pub mod tags;
pub mod text;
pub mod text_helpers;
pub mod toolbar;
pub mod types;
pub mod undo;
pub mod url;

pub use actions::{
    EditorAction, InputType, Key, KeyCombo, KeybindingConfig, KeydownResult, Modifiers, Range,
    action_for_input, action_for_key,
};
pub use color::{Color, PALETTE, PALETTE_COLUMNS};
pub use command::{CommandOutcome, FormatCommand};
pub use document::RichDocument;
pub use error::{ColorError, CommandError, UrlError};
pub use execute::{current_range, execute_action, execute_command};
pub use preview::{PreviewModel, render_preview};
pub use render::{render_editable, render_html};
pub use smol_str::SmolStr;
pub use style::{Alignment, BlockFormat, BlockKind, BlockTag, HeadingLevel, InlineStyle, Mark};
pub use tags::parse_tags;
pub use text::{EditorRope, TextBuffer};
pub use toolbar::{TOOLBAR, ToolbarAction, ToolbarButton, ToolbarSection};
pub use types::{CursorState, Selection};
pub use undo::UndoManager;
pub use url::SafeUrl;
