//! Text colors and the fixed swatch palette.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::ColorError;

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0xRRGGBB.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from 0xRRGGBB (upper byte ignored).
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Uppercase `#RRGGBB` form, as stored in markup.
    pub fn to_hex(self) -> SmolStr {
        smol_str::format_smolstr!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.into());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
                Ok(Self::rgb(
                    digit(0).map_err(|_| err())?,
                    digit(1).map_err(|_| err())?,
                    digit(2).map_err(|_| err())?,
                ))
            }
            6 => u32::from_str_radix(hex, 16)
                .map(Self::from_u32)
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

/// Number of swatches per palette row.
pub const PALETTE_COLUMNS: usize = 7;

/// The fixed text-color palette offered by the color picker.
pub const PALETTE: [Color; 28] = [
    Color::from_u32(0x000000),
    Color::from_u32(0xFF0000),
    Color::from_u32(0x00FF00),
    Color::from_u32(0x0000FF),
    Color::from_u32(0xFFFF00),
    Color::from_u32(0xFF00FF),
    Color::from_u32(0x00FFFF),
    Color::from_u32(0x800000),
    Color::from_u32(0x008000),
    Color::from_u32(0x000080),
    Color::from_u32(0x808000),
    Color::from_u32(0x800080),
    Color::from_u32(0x008080),
    Color::from_u32(0x808080),
    Color::from_u32(0xFF8000),
    Color::from_u32(0x8000FF),
    Color::from_u32(0xFF0080),
    Color::from_u32(0x80FF00),
    Color::from_u32(0x0080FF),
    Color::from_u32(0xFF8080),
    Color::from_u32(0x80FF80),
    Color::from_u32(0x8080FF),
    Color::from_u32(0xFFFF80),
    Color::from_u32(0xFF80FF),
    Color::from_u32(0x80FFFF),
    Color::from_u32(0xFFB366),
    Color::from_u32(0xB366FF),
    Color::from_u32(0x66FFB3),
];
