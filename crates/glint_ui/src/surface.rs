//! The drawing capability the toolkit paints through.
//!
//! Modelled on a 2D canvas context: immediate fills, a global alpha, a
//! clip region, and a save/restore stack covering alpha, clip and text
//! settings. Implement it over whatever raster backend the host has.

use crate::layout::Rect;
use crate::style::Color;

/// Horizontal anchoring of drawn text relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// x is the left edge of the text.
    #[default]
    Left,
    /// x is the horizontal center of the text.
    Center,
}

/// Vertical anchoring of drawn text relative to its y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// y is the middle of the em box.
    Middle,
    /// y is the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// Pointer cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// The platform arrow.
    #[default]
    Default,
    /// The hand shown over clickable things.
    Pointer,
}

/// A 2D raster drawing target.
pub trait Surface {
    /// Fills a rectangle, honouring the current alpha and clip.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Sets the global alpha multiplied into every fill.
    fn set_alpha(&mut self, alpha: f32);

    /// Pushes alpha, clip and text settings.
    fn save(&mut self);

    /// Pops the settings pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Intersects the clip region with `rect`.
    fn clip(&mut self, rect: Rect);

    /// Sets text alignment.
    fn set_text_align(&mut self, align: TextAlign);

    /// Sets text baseline.
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Sets the font used for drawing and measuring text.
    fn set_font(&mut self, font: &str);

    /// Draws text anchored at (x, y).
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color);

    /// Returns the advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f32;

    /// Sets the pointer cursor shown over the surface.
    fn set_cursor(&mut self, cursor: CursorIcon);
}
