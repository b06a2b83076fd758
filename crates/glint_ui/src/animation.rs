//! Hover and click feedback animation.
//!
//! Two per-widget values drive the overlays painted on top of every widget:
//!
//! - the hover value, which approaches 1 while hovered and 0 otherwise by a
//!   time-step dependent lerp;
//! - the flash factor, a quadratic ease-out that starts at 1 on click and
//!   reaches 0 once the flash duration has elapsed.
//!
//! State is kept per [`WidgetId`] and evicted once a widget stops being
//! declared.

use crate::widget::WidgetId;
use std::collections::HashMap;

/// Lerp factor for one frame of hover animation: `clamp01(dt² / divisor)`.
///
/// With the default divisor of 1000, a 16 ms frame moves about a quarter of
/// the remaining distance. The clamp keeps a single long frame from
/// overshooting the target.
#[must_use]
pub fn hover_lerp_factor(dt_ms: f32, divisor: f32) -> f32 {
    (dt_ms * dt_ms / divisor).clamp(0.0, 1.0)
}

/// Moves `current` towards `target` by `factor` of the remaining distance.
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Click flash intensity `elapsed_ms` after the click:
/// `(1 - clamp01(elapsed / duration))²`.
///
/// `None` means the widget was never clicked.
#[must_use]
pub fn flash_factor(elapsed_ms: Option<f64>, duration_ms: f64) -> f32 {
    let Some(elapsed) = elapsed_ms else {
        return 0.0;
    };
    let remaining = 1.0 - (elapsed / duration_ms).clamp(0.0, 1.0);
    (remaining * remaining) as f32
}

/// Animation state of one widget.
#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    /// Hover value in [0, 1].
    hover: f32,
    /// Clock time of the last click, in milliseconds.
    last_action: Option<f64>,
    /// Frame index on which the widget was last declared.
    last_seen: u64,
}

/// Per-widget animation state with frame-based eviction.
#[derive(Debug, Default)]
pub struct AnimationTable {
    entries: HashMap<WidgetId, Entry>,
}

impl AnimationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::with_capacity(64),
        }
    }

    /// Advances the hover value of a widget declared on `frame`.
    pub fn step_hover(&mut self, id: &WidgetId, hovered: bool, factor: f32, frame: u64) {
        let entry = self.entries.entry(id.clone()).or_default();
        let target = if hovered { 1.0 } else { 0.0 };
        entry.hover = approach(entry.hover, target, factor);
        entry.last_seen = frame;
    }

    /// Records a click at clock time `now_ms`.
    pub fn record_action(&mut self, id: &WidgetId, now_ms: f64, frame: u64) {
        let entry = self.entries.entry(id.clone()).or_default();
        entry.last_action = Some(now_ms);
        entry.last_seen = frame;
    }

    /// Current hover value, 0 for unknown widgets.
    #[must_use]
    pub fn hover(&self, id: &WidgetId) -> f32 {
        self.entries.get(id).map_or(0.0, |entry| entry.hover)
    }

    /// Milliseconds since the last click, if any.
    #[must_use]
    pub fn since_action(&self, id: &WidgetId, now_ms: f64) -> Option<f64> {
        self.entries
            .get(id)
            .and_then(|entry| entry.last_action)
            .map(|at| now_ms - at)
    }

    /// Flash intensity at clock time `now_ms`.
    #[must_use]
    pub fn flash(&self, id: &WidgetId, now_ms: f64, duration_ms: f64) -> f32 {
        flash_factor(self.since_action(id, now_ms), duration_ms)
    }

    /// Drops widgets not declared during the last `max_age` frames.
    ///
    /// Returns how many entries were removed.
    pub fn evict_stale(&mut self, frame: u64, max_age: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| frame.saturating_sub(entry.last_seen) < max_age);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(
                "Evicted {} stale animation entries at frame {}",
                evicted,
                frame
            );
        }
        evicted
    }

    /// Number of tracked widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no widget is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
