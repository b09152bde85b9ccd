//! Symbolic formatting commands.
//!
//! Toolbar entries name their command as a string plus an optional value,
//! the same vocabulary as the browser `execCommand` interface. Parsing turns
//! that pair into a typed [`FormatCommand`] or a [`CommandError`].

use smol_str::{SmolStr, ToSmolStr};

use crate::color::Color;
use crate::error::CommandError;
use crate::style::BlockTag;
use crate::url::SafeUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    FormatBlock(BlockTag),
    InsertUnorderedList,
    InsertOrderedList,
    ForeColor(Color),
    InsertImage(SafeUrl),
    CreateLink(SafeUrl),
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
}

impl FormatCommand {
    /// Parse a command name (case-insensitive) and its value.
    ///
    /// Value-less commands ignore any value they are given.
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, CommandError> {
        let name = name.trim();
        let lower = name.to_ascii_lowercase();
        let require = |command: &'static str| value.ok_or(CommandError::MissingValue { command });

        let cmd = match lower.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::StrikeThrough,
            "insertunorderedlist" => Self::InsertUnorderedList,
            "insertorderedlist" => Self::InsertOrderedList,
            "justifyleft" => Self::JustifyLeft,
            "justifycenter" => Self::JustifyCenter,
            "justifyright" => Self::JustifyRight,
            "formatblock" => Self::FormatBlock(require("formatBlock")?.parse()?),
            "forecolor" => Self::ForeColor(require("foreColor")?.parse()?),
            "insertimage" => Self::InsertImage(SafeUrl::parse(require("insertImage")?)?),
            "createlink" => Self::CreateLink(SafeUrl::parse(require("createLink")?)?),
            _ => return Err(CommandError::Unknown(name.to_smolstr())),
        };
        Ok(cmd)
    }

    /// Canonical command name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::StrikeThrough => "strikeThrough",
            Self::FormatBlock(_) => "formatBlock",
            Self::InsertUnorderedList => "insertUnorderedList",
            Self::InsertOrderedList => "insertOrderedList",
            Self::ForeColor(_) => "foreColor",
            Self::InsertImage(_) => "insertImage",
            Self::CreateLink(_) => "createLink",
            Self::JustifyLeft => "justifyLeft",
            Self::JustifyCenter => "justifyCenter",
            Self::JustifyRight => "justifyRight",
        }
    }

    /// Canonical value, for commands that take one.
    pub fn value(&self) -> Option<SmolStr> {
        match self {
            Self::FormatBlock(tag) => Some(SmolStr::new_static(tag.as_str())),
            Self::ForeColor(color) => Some(color.to_hex()),
            Self::InsertImage(url) | Self::CreateLink(url) => Some(url.as_str().to_smolstr()),
            _ => None,
        }
    }
}

/// What executing a valid command did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The document (or pending typing style) changed.
    Applied,
    /// The command was valid but had nothing to do.
    Unchanged,
}

impl CommandOutcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed { Self::Applied } else { Self::Unchanged }
    }

    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}
