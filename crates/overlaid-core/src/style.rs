//! Style profile applied to text overlays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits: {0}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0}")]
    BadDigit(String),
}

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(input.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(input.to_string()));
        }

        // Every char is an ASCII hex digit here, so slicing by byte is safe.
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::BadDigit(input.to_string()))
        };

        match hex.len() {
            3 => Ok(Self::new(
                byte(0..1)? * 17,
                byte(1..2)? * 17,
                byte(2..3)? * 17,
                255,
            )),
            6 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, 255)),
            8 => Ok(Self::new(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => Err(ColorError::BadLength(input.to_string())),
        }
    }

    /// Lowercase hex form; the alpha pair is only emitted when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The bundle of font and decoration settings applied to an overlay.
///
/// Profiles are plain values: every change produces a new profile, so the
/// editor never shares mutable toggle state with the overlays it styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    /// CSS font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Color::black(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl StyleProfile {
    pub const DEFAULT_FONT_FAMILY: &'static str = "Arial";
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn toggled_bold(mut self) -> Self {
        self.bold = !self.bold;
        self
    }

    pub fn toggled_italic(mut self) -> Self {
        self.italic = !self.italic;
        self
    }

    pub fn toggled_underline(mut self) -> Self {
        self.underline = !self.underline;
        self
    }

    /// CSS `font-weight` value.
    pub fn font_weight(&self) -> &'static str {
        if self.bold { "bold" } else { "normal" }
    }

    /// CSS `font-style` value.
    pub fn font_style(&self) -> &'static str {
        if self.italic { "italic" } else { "normal" }
    }

    /// CSS `text-decoration` value.
    pub fn text_decoration(&self) -> &'static str {
        if self.underline { "underline" } else { "none" }
    }
}
