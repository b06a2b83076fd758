//! # UI Error Types
//!
//! Errors surfaced while configuring the toolkit.
//!
//! The frame protocol itself has no runtime error path: ending a frame
//! without a bound surface, or declaring a checkbox without a value cell,
//! cannot be expressed with the [`Frame`](crate::Frame) and
//! [`WidgetKind`](crate::WidgetKind) types.

use thiserror::Error;

/// Errors that can occur while loading or validating UI configuration.
#[derive(Error, Debug)]
pub enum UiError {
    /// The configuration file is not valid TOML or has mistyped fields.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A color string is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
