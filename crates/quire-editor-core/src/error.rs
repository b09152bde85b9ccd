use miette::Diagnostic;
use smol_str::SmolStr;

/// Errors raised while turning a symbolic command into something the
/// document can execute.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command name is not one the editor understands.
    #[error("unknown editing command `{0}`")]
    #[diagnostic(
        code(quire::command::unknown),
        help("supported commands: bold, italic, underline, strikeThrough, formatBlock, insertUnorderedList, insertOrderedList, foreColor, insertImage, createLink, justifyLeft, justifyCenter, justifyRight")
    )]
    Unknown(SmolStr),

    /// The command requires a value and none was given.
    #[error("command `{command}` requires a value")]
    #[diagnostic(code(quire::command::missing_value))]
    MissingValue { command: &'static str },

    /// `formatBlock` was given a tag the editor does not produce.
    #[error("`{0}` is not a supported block tag")]
    #[diagnostic(
        code(quire::command::block_tag),
        help("use one of h1, h2, h3, blockquote, pre")
    )]
    InvalidBlockTag(SmolStr),

    /// `foreColor` was given something that is not a hex color.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Color(#[from] ColorError),

    /// `insertImage` / `createLink` was given an unusable URL.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Url(#[from] UrlError),
}

/// Color parsing error.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("invalid color `{0}`")]
#[diagnostic(code(quire::color), help("colors are written #RGB or #RRGGBB"))]
pub struct ColorError(pub SmolStr);

/// URL validation error.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is empty")]
    #[diagnostic(code(quire::url::empty))]
    Empty,

    #[error("URL scheme `{0}` is not allowed")]
    #[diagnostic(
        code(quire::url::scheme),
        help("only http, https, mailto and relative URLs are accepted")
    )]
    UnsupportedScheme(SmolStr),
}
