//! Toolkit configuration.
//!
//! Loaded once at startup. Every field has a default, so an empty TOML
//! document is a valid configuration:
//!
//! ```toml
//! focus_policy = "textbox-only"
//! flash_duration_ms = 500.0
//! evict_after_frames = 600
//!
//! [style]
//! border = "#111"
//! background = "#444"
//! ```

use crate::error::{UiError, UiResult};
use crate::style::Style;
use serde::Deserialize;
use std::path::Path;

/// Which widgets can take keyboard focus when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusPolicy {
    /// A click focuses the clicked widget only if it is a textbox; any
    /// other click, including one on empty space, clears focus.
    #[default]
    TextboxOnly,
    /// A click focuses whatever was clicked; clicking empty space clears
    /// focus.
    AnyWidget,
}

/// Toolkit-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Focus acquisition rule.
    pub focus_policy: FocusPolicy,
    /// Divisor of `dt²` in the hover lerp factor.
    pub hover_lerp_divisor: f32,
    /// Time for the click flash to fade out completely, in milliseconds.
    pub flash_duration_ms: f64,
    /// Per-id animation state is dropped after this many frames without
    /// the id being declared.
    pub evict_after_frames: u64,
    /// Keys buffered between two frames beyond this are dropped.
    pub max_buffered_keys: usize,
    /// Button width when the caller gives none.
    pub button_width: f32,
    /// Button height when the caller gives none.
    pub button_height: f32,
    /// Palette and metrics.
    pub style: Style,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            focus_policy: FocusPolicy::default(),
            hover_lerp_divisor: 1000.0,
            flash_duration_ms: 500.0,
            evict_after_frames: 600,
            max_buffered_keys: 256,
            button_width: 100.0,
            button_height: 50.0,
            style: Style::default(),
        }
    }
}

impl UiConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] on malformed TOML and
    /// [`UiError::InvalidConfig`] on out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file cannot be read, otherwise the
    /// errors of [`UiConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> UiResult<()> {
        if self.hover_lerp_divisor.is_nan() || self.hover_lerp_divisor <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "hover_lerp_divisor must be positive, got {}",
                self.hover_lerp_divisor
            )));
        }
        if self.flash_duration_ms.is_nan() || self.flash_duration_ms <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "flash_duration_ms must be positive, got {}",
                self.flash_duration_ms
            )));
        }
        if self.evict_after_frames == 0 {
            return Err(UiError::InvalidConfig(
                "evict_after_frames must be at least 1".to_owned(),
            ));
        }
        if self.button_width < 0.0 || self.button_height < 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "default button size must be non-negative, got {}x{}",
                self.button_width, self.button_height
            )));
        }
        Ok(())
    }
}
