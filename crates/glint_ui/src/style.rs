//! Colors and the widget palette.
//!
//! Dark grey boxes, a one pixel border, light text. Interaction feedback is
//! drawn as translucent overlays on top of the base colors rather than by
//! swapping colors, so hover and click fade in and out smoothly.

use crate::error::{UiError, UiResult};
use serde::Deserialize;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Parses a CSS-style hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidColor`] for any other shape.
    pub fn parse(text: &str) -> UiResult<Self> {
        let invalid = || UiError::InvalidColor(text.to_owned());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            3 => {
                let mut long: String = digits.chars().flat_map(|c| [c, c]).collect();
                long.push_str("ff");
                long
            }
            6 => format!("{digits}ff"),
            8 => digits.to_owned(),
            _ => return Err(invalid()),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self::hex(value))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = UiError;

    fn try_from(value: String) -> UiResult<Self> {
        Self::parse(&value)
    }
}

/// Palette and metrics shared by every widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Border color, painted as the full widget rect.
    pub border: Color,
    /// Background color, painted inside the border.
    pub background: Color,
    /// Text, checkbox indicator and text cursor color.
    pub text: Color,
    /// Overlay color for hover feedback.
    pub hover_tint: Color,
    /// Overlay color for the click flash.
    pub flash_tint: Color,
    /// Border width.
    pub border_width: f32,
    /// Peak hover overlay alpha, reached when the hover animation is at 1.
    pub hover_alpha: f32,
    /// Peak flash overlay alpha, reached at the moment of the click.
    pub flash_alpha: f32,
    /// Placeholder opacity.
    pub placeholder_alpha: f32,
    /// Gap between the checkbox border and its filled indicator.
    pub checkbox_inset: f32,
    /// Horizontal inset of the textbox clip rect.
    pub text_clip_inset: f32,
    /// Horizontal offset of textbox text from the left edge.
    pub text_padding: f32,
    /// Text cursor width.
    pub caret_width: f32,
    /// Text cursor height.
    pub caret_height: f32,
    /// Font, in the surface's font syntax.
    pub font: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            border: Color::hex(0x1111_11FF),
            background: Color::hex(0x4444_44FF),
            text: Color::hex(0xEEEE_EEFF),
            hover_tint: Color::WHITE,
            flash_tint: Color::WHITE,
            border_width: 1.0,
            hover_alpha: 0.1,
            flash_alpha: 0.25,
            placeholder_alpha: 0.5,
            checkbox_inset: 5.0,
            text_clip_inset: 4.0,
            text_padding: 8.0,
            caret_width: 1.0,
            caret_height: 16.0,
            font: String::from("16px Arial"),
        }
    }
}
