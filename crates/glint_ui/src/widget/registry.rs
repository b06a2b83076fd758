//! Per-frame widget registry.

use super::{Widget, WidgetId};
use std::collections::HashMap;

/// The widgets declared during the current frame, in declaration order.
///
/// Declaration order is paint order: later widgets are drawn on top and win
/// hit-tests. Rebuilt from scratch every frame.
#[derive(Debug, Default)]
pub struct FrameRegistry {
    /// Descriptors in declaration order.
    widgets: Vec<Widget>,
    /// Last declaration index of each id.
    index: HashMap<WidgetId, usize>,
    /// Declarations that reused an id already declared this frame.
    duplicates: usize,
}

impl FrameRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: Vec::with_capacity(64),
            index: HashMap::with_capacity(64),
            duplicates: 0,
        }
    }

    /// Appends a widget.
    ///
    /// Returns false if the id was already declared this frame. The new
    /// declaration still registers and shadows the earlier one for id
    /// lookups.
    pub fn push(&mut self, widget: Widget) -> bool {
        let position = self.widgets.len();
        let fresh = self.index.insert(widget.id.clone(), position).is_none();
        if !fresh {
            self.duplicates += 1;
            tracing::warn!(
                "Duplicate widget id {:?} declared this frame ({} widget); interaction state is shared",
                widget.id.as_str(),
                widget.kind.name()
            );
        }
        self.widgets.push(widget);
        fresh
    }

    /// Returns the index of the topmost widget containing the point.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.widgets.iter().rposition(|widget| widget.rect.contains(x, y))
    }

    /// Returns the widget at a declaration index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    /// Returns the declaration index of the last widget declared with `id`.
    #[must_use]
    pub fn position(&self, id: &WidgetId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns true if `id` was declared this frame.
    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates widgets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> + '_ {
        self.widgets.iter()
    }

    /// Iterates the distinct ids declared this frame.
    pub fn ids(&self) -> impl Iterator<Item = &WidgetId> + '_ {
        self.index.keys()
    }

    /// Number of declarations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Declarations that reused an id this frame.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Forgets every declaration, keeping allocations.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.index.clear();
        self.duplicates = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::widget::WidgetKind;

    fn button(id: &str, rect: Rect) -> Widget {
        Widget {
            id: WidgetId::new(id),
            rect,
            kind: WidgetKind::Button {
                text: id.to_owned(),
            },
        }
    }

    #[test]
    fn test_hit_test_last_declared_wins() {
        let mut registry = FrameRegistry::new();
        registry.push(button("below", Rect::new(0.0, 0.0, 100.0, 100.0)));
        registry.push(button("above", Rect::new(50.0, 50.0, 100.0, 100.0)));

        assert_eq!(registry.hit_test(75.0, 75.0), Some(1));
        assert_eq!(registry.hit_test(10.0, 10.0), Some(0));
        assert_eq!(registry.hit_test(500.0, 500.0), None);
    }

    #[test]
    fn test_hit_test_fully_overlapping() {
        let mut registry = FrameRegistry::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        registry.push(button("a", rect));
        registry.push(button("b", rect));
        registry.push(button("c", rect));

        let hit = registry.hit_test(5.0, 5.0).and_then(|i| registry.get(i));
        assert_eq!(hit.map(|w| w.id.as_str()), Some("c"));
    }

    #[test]
    fn test_duplicates_counted_and_shadowed() {
        let mut registry = FrameRegistry::new();
        assert!(registry.push(button("same", Rect::new(0.0, 0.0, 1.0, 1.0))));
        assert!(!registry.push(button("same", Rect::new(5.0, 5.0, 1.0, 1.0))));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.duplicate_count(), 1);
        assert_eq!(registry.position(&WidgetId::new("same")), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut registry = FrameRegistry::new();
        registry.push(button("a", Rect::ZERO));
        registry.push(button("a", Rect::ZERO));
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.duplicate_count(), 0);
        assert!(!registry.contains(&WidgetId::new("a")));
    }
}
