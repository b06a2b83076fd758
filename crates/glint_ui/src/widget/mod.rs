//! Widget descriptors and the per-frame registry.
//!
//! Descriptors are rebuilt every frame by the declaration API; only the
//! [`WidgetId`] carries over between frames.

mod descriptor;
mod registry;

pub use descriptor::{Button, Checkbox, Textbox, Widget, WidgetId, WidgetKind};
pub use registry::FrameRegistry;
