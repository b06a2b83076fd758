//! Per-frame interaction resolution.
//!
//! Runs once at the end of every frame, after all widgets are declared:
//!
//! ```text
//! pointer position ──► hit test ──► hovering ──┐
//! pointer-down edge ─────────────────────────► clicked ──► focused
//! key buffer ─────────────────────────────────────────────► pending keys
//! dt ──► hover lerp factor ──► animation table
//! ```
//!
//! The results are read by the declaration API during the *next* frame,
//! which is why `button()` reports clicks with one frame of latency.

use crate::animation::{hover_lerp_factor, AnimationTable};
use crate::config::FocusPolicy;
use crate::input::{InputSampler, Key};
use crate::widget::{FrameRegistry, WidgetId};

/// Interaction results that persist across frames.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// Topmost widget under the pointer.
    pub(crate) hovering: Option<WidgetId>,
    /// Widget under the pointer when it went down; one frame only.
    pub(crate) clicked: Option<WidgetId>,
    /// Widget receiving key presses.
    pub(crate) focused: Option<WidgetId>,
    /// Textbox that released focus with Enter; one frame only.
    pub(crate) submitted: Option<WidgetId>,
    /// Declaration index of the click target whose toggle the renderer
    /// has not applied yet.
    pub(crate) pending_toggle: Option<usize>,
    /// Declaration index of the focused widget this frame. With duplicate
    /// ids only this declaration receives keys.
    pub(crate) focus_index: Option<usize>,
    /// Keys not yet applied by the renderer.
    pub(crate) pending_keys: Vec<Key>,
}

impl InteractionState {
    /// Creates an empty state: nothing hovered, clicked or focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost widget under the pointer at the last resolution.
    #[must_use]
    pub fn hovering(&self) -> Option<&WidgetId> {
        self.hovering.as_ref()
    }

    /// Widget clicked at the last resolution.
    #[must_use]
    pub fn clicked(&self) -> Option<&WidgetId> {
        self.clicked.as_ref()
    }

    /// Widget holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<&WidgetId> {
        self.focused.as_ref()
    }

    /// Textbox submitted with Enter during the last frame.
    #[must_use]
    pub fn submitted(&self) -> Option<&WidgetId> {
        self.submitted.as_ref()
    }

    /// Returns true if `id` was clicked at the last resolution.
    #[must_use]
    pub fn is_clicked(&self, id: &WidgetId) -> bool {
        self.clicked.as_ref() == Some(id)
    }

    /// Returns true if `id` holds keyboard focus.
    #[must_use]
    pub fn is_focused(&self, id: &WidgetId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    /// Drops the one-shot edits the renderer did not consume.
    pub(crate) fn clear_pending(&mut self) {
        self.pending_toggle = None;
        self.pending_keys.clear();
    }
}

/// Frame timing handed to the resolver.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    /// Milliseconds since the previous frame.
    pub dt_ms: f32,
    /// Toolkit clock after advancing by `dt_ms`.
    pub now_ms: f64,
    /// Index of the frame being resolved.
    pub frame: u64,
}

/// Computes hover, click, focus and hover animation for one frame.
#[derive(Debug, Clone)]
pub struct Resolver {
    focus_policy: FocusPolicy,
    hover_lerp_divisor: f32,
}

impl Resolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(focus_policy: FocusPolicy, hover_lerp_divisor: f32) -> Self {
        Self {
            focus_policy,
            hover_lerp_divisor,
        }
    }

    /// Resolves the frame and drains the input edge buffers.
    pub fn resolve(
        &self,
        registry: &FrameRegistry,
        input: &mut InputSampler,
        state: &mut InteractionState,
        animations: &mut AnimationTable,
        clock: FrameClock,
    ) {
        // Hover: topmost (last declared) widget under the pointer
        let hit = registry.hit_test(input.mouse_x, input.mouse_y);
        let hit_widget = hit.and_then(|index| registry.get(index));
        let hovering = hit_widget.map(|widget| widget.id.clone());
        if hovering != state.hovering {
            tracing::debug!(
                "Hover changed: {:?} -> {:?}",
                state.hovering.as_ref().map(WidgetId::as_str),
                hovering.as_ref().map(WidgetId::as_str)
            );
        }
        state.hovering = hovering;

        // Keep last frame's focused declaration while it still carries the id
        let mut focus_index = state.focus_index.filter(|&index| {
            registry.get(index).map(|widget| &widget.id) == state.focused.as_ref()
        });

        // Click and focus, only on a fresh pointer-down edge
        state.clicked = None;
        state.submitted = None;
        state.pending_toggle = None;
        if input.take_pointer_pressed() {
            state.clicked = state.hovering.clone();
            if let Some(id) = &state.clicked {
                animations.record_action(id, clock.now_ms, clock.frame);
                tracing::debug!("Clicked {:?} at frame {}", id.as_str(), clock.frame);
            }
            state.pending_toggle = hit;

            focus_index = match self.focus_policy {
                FocusPolicy::TextboxOnly => hit.filter(|_| {
                    hit_widget.is_some_and(|widget| widget.kind.is_textbox())
                }),
                FocusPolicy::AnyWidget => hit,
            };
            let focused = focus_index
                .and_then(|index| registry.get(index))
                .map(|widget| widget.id.clone());
            self.set_focus(state, focused);
        }

        // A focused widget that was not declared this frame is gone
        if let Some(id) = &state.focused {
            if !registry.contains(id) {
                tracing::debug!("Focused widget {:?} not declared; dropping focus", id.as_str());
                state.focused = None;
            }
        }
        state.focus_index = match &state.focused {
            Some(id) => focus_index.or_else(|| registry.position(id)),
            None => None,
        };

        state.pending_keys = input.take_keys();

        // Hover animation for every widget present this frame
        let factor = hover_lerp_factor(clock.dt_ms, self.hover_lerp_divisor);
        for id in registry.ids() {
            let hovered = state.hovering.as_ref() == Some(id);
            animations.step_hover(id, hovered, factor, clock.frame);
        }
    }

    fn set_focus(&self, state: &mut InteractionState, focused: Option<WidgetId>) {
        if focused != state.focused {
            tracing::debug!(
                "Focus changed ({:?} policy): {:?} -> {:?}",
                self.focus_policy,
                state.focused.as_ref().map(WidgetId::as_str),
                focused.as_ref().map(WidgetId::as_str)
            );
        }
        state.focused = focused;
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(FocusPolicy::default(), 1000.0)
    }
}
