use miette::Diagnostic;
use quire_editor_core::CommandError;

/// Errors surfaced by the application state container.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),

    /// Formatting was requested while the preview replaces the editor.
    #[error("formatting is unavailable in preview mode")]
    #[diagnostic(
        code(quire::app::preview_active),
        help("switch back to edit mode first")
    )]
    PreviewActive,
}
