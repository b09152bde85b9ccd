//! Inline and block formatting attributes.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::color::Color;
use crate::error::CommandError;
use crate::url::SafeUrl;

/// Character-level formatting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub color: Option<Color>,
    pub link: Option<SafeUrl>,
}

impl InlineStyle {
    /// Whether this style renders as plain text.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
            Mark::Strikethrough => self.strikethrough = on,
        }
    }
}

/// Boolean inline marks that toolbar buttons toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

/// Heading depth offered by the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

/// What kind of block a line is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading(HeadingLevel),
    Blockquote,
    CodeBlock,
    BulletItem,
    NumberedItem,
}

impl BlockKind {
    pub fn is_list_item(self) -> bool {
        matches!(self, Self::BulletItem | Self::NumberedItem)
    }

    /// Element name the block renders as. List items render as `li` inside
    /// a `ul`/`ol` wrapper chosen by the writer.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading(level) => level.tag(),
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "pre",
            Self::BulletItem | Self::NumberedItem => "li",
        }
    }

    /// Kind given to the block created when Enter is pressed at the end of
    /// a block of this kind.
    pub fn continuation(self) -> Self {
        match self {
            Self::Heading(_) => Self::Paragraph,
            other => other,
        }
    }
}

/// Horizontal alignment of a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Formatting of a single block (line).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockFormat {
    pub kind: BlockKind,
    pub align: Alignment,
}

impl BlockFormat {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            align: Alignment::Left,
        }
    }
}

/// Value accepted by `formatBlock`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockTag {
    H1,
    H2,
    H3,
    Blockquote,
    Pre,
}

impl BlockTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
        }
    }

    pub fn kind(self) -> BlockKind {
        match self {
            Self::H1 => BlockKind::Heading(HeadingLevel::H1),
            Self::H2 => BlockKind::Heading(HeadingLevel::H2),
            Self::H3 => BlockKind::Heading(HeadingLevel::H3),
            Self::Blockquote => BlockKind::Blockquote,
            Self::Pre => BlockKind::CodeBlock,
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockTag {
    type Err = CommandError;

    /// Accepts `h2`, `H2` and `<h2>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.trim();
        let bare = bare
            .strip_prefix('<')
            .and_then(|b| b.strip_suffix('>'))
            .unwrap_or(bare);
        match bare.to_ascii_lowercase().as_str() {
            "h1" => Ok(Self::H1),
            "h2" => Ok(Self::H2),
            "h3" => Ok(Self::H3),
            "blockquote" => Ok(Self::Blockquote),
            "pre" => Ok(Self::Pre),
            _ => Err(CommandError::InvalidBlockTag(SmolStr::new(s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_parsing() {
        assert_eq!("h2".parse::<BlockTag>(), Ok(BlockTag::H2));
        assert_eq!("<H1>".parse::<BlockTag>(), Ok(BlockTag::H1));
        assert_eq!(" pre ".parse::<BlockTag>(), Ok(BlockTag::Pre));
        assert_eq!(
            "h4".parse::<BlockTag>(),
            Err(CommandError::InvalidBlockTag("h4".into()))
        );
    }

    #[test]
    fn test_heading_continues_as_paragraph() {
        let heading = BlockTag::H1.kind();
        assert_eq!(heading.continuation(), BlockKind::Paragraph);
        assert_eq!(BlockKind::BulletItem.continuation(), BlockKind::BulletItem);
    }

    #[test]
    fn test_marks() {
        let mut style = InlineStyle::default();
        assert!(style.is_plain());
        style.set(Mark::Underline, true);
        assert!(style.has(Mark::Underline));
        assert!(!style.has(Mark::Bold));
        assert!(!style.is_plain());
    }
}
