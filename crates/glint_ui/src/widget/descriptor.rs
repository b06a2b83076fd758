//! Widget descriptors.

use crate::cell::Ref;
use crate::layout::Rect;
use std::fmt;
use std::sync::Arc;

/// Stable cross-frame identity of a widget.
///
/// Interaction and animation state is keyed by this id, not by the
/// descriptor, so state survives descriptors being rebuilt every frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(Arc<str>);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl PartialEq<str> for WidgetId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for WidgetId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Type-specific payload of a widget.
#[derive(Debug, Clone)]
pub enum WidgetKind {
    /// A push button with a centered label.
    Button {
        /// Label.
        text: String,
    },
    /// A toggle bound to a boolean cell.
    Checkbox {
        /// Toggled when the checkbox is clicked.
        value: Ref<bool>,
    },
    /// A single-line text field bound to a string cell.
    Textbox {
        /// Edited by key presses while focused.
        value: Ref<String>,
        /// Shown dimmed while the value is empty.
        placeholder: Option<String>,
    },
}

impl WidgetKind {
    /// Returns true for textboxes.
    #[must_use]
    pub fn is_textbox(&self) -> bool {
        matches!(self, Self::Textbox { .. })
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Button { .. } => "button",
            Self::Checkbox { .. } => "checkbox",
            Self::Textbox { .. } => "textbox",
        }
    }
}

/// One widget as declared during the current frame.
#[derive(Debug, Clone)]
pub struct Widget {
    /// Cross-frame identity.
    pub id: WidgetId,
    /// Hit-test and paint bounds.
    pub rect: Rect,
    /// Type-specific payload.
    pub kind: WidgetKind,
}

/// Declaration of a button.
///
/// Defaults to a 100x50 box at the origin with id `"button-" + text`.
#[derive(Debug, Clone)]
pub struct Button {
    pub(crate) text: String,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
    pub(crate) id: Option<WidgetId>,
}

impl Button {
    /// Creates a button with the given label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            id: None,
        }
    }

    /// Sets the top-left corner.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets width and height.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets an explicit id instead of the label-derived one.
    #[must_use]
    pub fn id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Resolves defaults into a descriptor.
    pub(crate) fn into_widget(self, default_width: f32, default_height: f32) -> Widget {
        let id = self
            .id
            .unwrap_or_else(|| WidgetId::from(format!("button-{}", self.text)));
        Widget {
            id,
            rect: Rect::new(
                self.x,
                self.y,
                self.width.unwrap_or(default_width),
                self.height.unwrap_or(default_height),
            ),
            kind: WidgetKind::Button { text: self.text },
        }
    }
}

/// Declaration of a checkbox.
#[derive(Debug, Clone)]
pub struct Checkbox {
    pub(crate) id: WidgetId,
    pub(crate) rect: Rect,
    pub(crate) value: Ref<bool>,
}

impl Checkbox {
    /// Creates a checkbox bound to `value`.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, rect: Rect, value: &Ref<bool>) -> Self {
        Self {
            id: id.into(),
            rect,
            value: value.clone(),
        }
    }
}

impl From<Checkbox> for Widget {
    fn from(checkbox: Checkbox) -> Self {
        Self {
            id: checkbox.id,
            rect: checkbox.rect,
            kind: WidgetKind::Checkbox {
                value: checkbox.value,
            },
        }
    }
}

/// Declaration of a textbox.
#[derive(Debug, Clone)]
pub struct Textbox {
    pub(crate) id: WidgetId,
    pub(crate) rect: Rect,
    pub(crate) value: Ref<String>,
    pub(crate) placeholder: Option<String>,
}

impl Textbox {
    /// Creates a textbox bound to `value`.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, rect: Rect, value: &Ref<String>) -> Self {
        Self {
            id: id.into(),
            rect,
            value: value.clone(),
            placeholder: None,
        }
    }

    /// Sets the text shown while the value is empty.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl From<Textbox> for Widget {
    fn from(textbox: Textbox) -> Self {
        Self {
            id: textbox.id,
            rect: textbox.rect,
            kind: WidgetKind::Textbox {
                value: textbox.value,
                placeholder: textbox.placeholder,
            },
        }
    }
}
