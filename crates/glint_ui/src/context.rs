//! The toolkit context and the per-frame declaration API.
//!
//! ```text
//! host event callbacks ──► Ui::pointer_move / pointer_down / key_down
//!
//! every frame:
//!   Ui::start_tick(surface) ──► Frame
//!       Frame::button / checkbox / textbox   (answers from last frame)
//!   Frame::end_tick(dt) ──► resolve ──► paint ──► evict ──► clear
//! ```
//!
//! A [`Frame`] borrows both the context and the surface, so widgets can only
//! be declared while a surface is bound and a frame can only end once.

use crate::animation::AnimationTable;
use crate::config::UiConfig;
use crate::input::{InputSampler, Key, Modifiers};
use crate::interaction::{FrameClock, InteractionState, Resolver};
use crate::render::Renderer;
use crate::surface::{CursorIcon, Surface};
use crate::widget::{Button, Checkbox, FrameRegistry, Textbox, Widget, WidgetId};

/// Summary of one resolved frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of the frame, starting at 1.
    pub frame: u64,
    /// Topmost widget under the pointer.
    pub hovering: Option<WidgetId>,
    /// Widget clicked this frame.
    pub clicked: Option<WidgetId>,
    /// Widget holding focus after this frame.
    pub focused: Option<WidgetId>,
    /// Widgets declared, duplicates included.
    pub widgets: usize,
    /// Declarations that reused an id already declared this frame.
    pub duplicate_ids: usize,
    /// Animation entries evicted at the end of this frame.
    pub evicted: usize,
}

/// Immediate-mode UI context.
///
/// Owns all cross-frame state: pointer and key buffers, hover/click/focus,
/// and per-widget animation. Create one at startup and keep it for the
/// lifetime of the UI.
#[derive(Debug)]
pub struct Ui {
    config: UiConfig,
    input: InputSampler,
    state: InteractionState,
    animations: AnimationTable,
    registry: FrameRegistry,
    resolver: Resolver,
    renderer: Renderer,
    /// Milliseconds of frame time accumulated so far.
    now_ms: f64,
    /// Frames resolved so far.
    frame: u64,
}

impl Ui {
    /// Creates a context.
    #[must_use]
    pub fn new(config: UiConfig) -> Self {
        Self {
            input: InputSampler::new(config.max_buffered_keys),
            state: InteractionState::new(),
            animations: AnimationTable::new(),
            registry: FrameRegistry::new(),
            resolver: Resolver::new(config.focus_policy, config.hover_lerp_divisor),
            renderer: Renderer::new(config.style.clone(), config.flash_duration_ms),
            now_ms: 0.0,
            frame: 0,
            config,
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Host callback: the pointer moved to (x, y) in surface coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.set_pointer_pos(x, y);
    }

    /// Host callback: the pointer went down.
    pub fn pointer_down(&mut self) {
        self.input.pointer_down();
    }

    /// Host callback: a key went down.
    ///
    /// Returns true if the toolkit consumed the key; the host should then
    /// suppress its default handling. Keys are only consumed while a widget
    /// holds focus, and never with Ctrl, Alt or Meta held.
    pub fn key_down(&mut self, key: impl Into<Key>, modifiers: Modifiers) -> bool {
        let focus_active = self.state.focused().is_some();
        self.input.capture_key(key.into(), modifiers, focus_active)
    }

    /// Moves keyboard focus.
    ///
    /// Focus on an id that is not declared in the next frame is dropped
    /// when that frame resolves.
    pub fn focus(&mut self, id: Option<WidgetId>) {
        self.state.focused = id;
        self.state.focus_index = None;
    }

    /// Binds a surface and opens a frame for declarations.
    pub fn start_tick<'a, S: Surface + ?Sized>(&'a mut self, surface: &'a mut S) -> Frame<'a, S> {
        if !self.registry.is_empty() {
            tracing::warn!(
                "Discarding {} widgets from a frame that never reached end_tick",
                self.registry.len()
            );
            self.registry.clear();
        }
        Frame { ui: self, surface }
    }

    /// Interaction state as of the last resolved frame.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Topmost widget under the pointer at the last resolution.
    #[must_use]
    pub fn hovering(&self) -> Option<&WidgetId> {
        self.state.hovering()
    }

    /// Widget clicked at the last resolution.
    #[must_use]
    pub fn clicked(&self) -> Option<&WidgetId> {
        self.state.clicked()
    }

    /// Widget holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<&WidgetId> {
        self.state.focused()
    }

    /// Latest pointer position.
    #[must_use]
    pub fn pointer(&self) -> (f32, f32) {
        (self.input.mouse_x, self.input.mouse_y)
    }

    /// Returns true if a pointer-down edge is waiting for the next frame.
    #[must_use]
    pub fn pointer_pressed(&self) -> bool {
        self.input.pointer_pressed()
    }

    /// Keys waiting for the next frame.
    #[must_use]
    pub fn pending_keys(&self) -> &[Key] {
        self.input.keys()
    }

    /// Current hover animation value of a widget, in [0, 1].
    #[must_use]
    pub fn hover_value(&self, id: &WidgetId) -> f32 {
        self.animations.hover(id)
    }

    /// Current click flash intensity of a widget, in [0, 1].
    #[must_use]
    pub fn flash_value(&self, id: &WidgetId) -> f32 {
        self.animations
            .flash(id, self.now_ms, self.config.flash_duration_ms)
    }

    /// Widgets with live animation state.
    #[must_use]
    pub fn tracked_widgets(&self) -> usize {
        self.animations.len()
    }

    /// Toolkit clock in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Frames resolved so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

/// A frame in progress, bound to a surface.
///
/// Declaration methods answer from the *previous* frame's resolution:
/// resolution needs every widget of the frame, so it runs in
/// [`Frame::end_tick`], after all declarations.
pub struct Frame<'a, S: Surface + ?Sized> {
    ui: &'a mut Ui,
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Frame<'a, S> {
    /// Declares a button.
    ///
    /// Returns true if this button was clicked when the previous frame
    /// resolved. Each click edge is reported on exactly one frame.
    pub fn button(&mut self, button: Button) -> bool {
        let widget = button.into_widget(self.ui.config.button_width, self.ui.config.button_height);
        let clicked = self.ui.state.is_clicked(&widget.id);
        self.declare(widget);
        clicked
    }

    /// Declares a checkbox.
    ///
    /// A click toggles the bound cell while this frame is painted; read
    /// the cell to observe it.
    pub fn checkbox(&mut self, checkbox: Checkbox) {
        self.declare(checkbox.into());
    }

    /// Declares a textbox.
    ///
    /// Returns true if Enter was pressed in this textbox during the
    /// previous frame, which also released its focus.
    pub fn textbox(&mut self, textbox: Textbox) -> bool {
        let widget: Widget = textbox.into();
        let submitted = self.ui.state.submitted() == Some(&widget.id);
        self.declare(widget);
        submitted
    }

    /// The bound surface, for drawing between declarations.
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// The context, for reading interaction state mid-frame.
    #[must_use]
    pub fn ui(&self) -> &Ui {
        &*self.ui
    }

    /// Resolves and paints the frame, then clears per-frame state.
    ///
    /// `dt_ms` is the time since the previous frame; negative or
    /// non-finite values count as zero.
    pub fn end_tick(self, dt_ms: f32) -> FrameReport {
        let Frame { ui, surface } = self;
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        ui.now_ms += f64::from(dt_ms);
        ui.frame += 1;
        let clock = FrameClock {
            dt_ms,
            now_ms: ui.now_ms,
            frame: ui.frame,
        };

        ui.resolver.resolve(
            &ui.registry,
            &mut ui.input,
            &mut ui.state,
            &mut ui.animations,
            clock,
        );
        surface.set_cursor(if ui.state.hovering().is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });

        ui.renderer
            .paint(&ui.registry, &mut ui.state, &ui.animations, ui.now_ms, surface);

        let evicted = ui
            .animations
            .evict_stale(ui.frame, ui.config.evict_after_frames);

        let report = FrameReport {
            frame: ui.frame,
            hovering: ui.state.hovering().cloned(),
            clicked: ui.state.clicked().cloned(),
            focused: ui.state.focused().cloned(),
            widgets: ui.registry.len(),
            duplicate_ids: ui.registry.duplicate_count(),
            evicted,
        };

        ui.state.clear_pending();
        ui.registry.clear();
        report
    }

    fn declare(&mut self, widget: Widget) {
        self.ui.registry.push(widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::cell;
    use crate::layout::Rect;
    use crate::render::CommandRecorder;

    #[test]
    fn test_empty_frame() {
        let mut ui = Ui::default();
        let mut surface = CommandRecorder::new();
        ui.pointer_down();

        let report = ui.start_tick(&mut surface).end_tick(16.0);
        assert_eq!(report.hovering, None);
        assert_eq!(report.clicked, None);
        assert_eq!(report.widgets, 0);
        assert!(!ui.pointer_pressed());
        assert_eq!(surface.cursor(), CursorIcon::Default);
    }

    #[test]
    fn test_unfinished_frame_discarded() {
        let mut ui = Ui::default();
        let mut surface = CommandRecorder::new();
        {
            let mut frame = ui.start_tick(&mut surface);
            frame.button(Button::new("lost"));
        }
        let report = ui.start_tick(&mut surface).end_tick(16.0);
        assert_eq!(report.widgets, 0);
    }

    #[test]
    fn test_keys_need_focus() {
        let mut ui = Ui::default();
        assert!(!ui.key_down("a", Modifiers::NONE));

        let text = cell(String::new());
        let mut surface = CommandRecorder::new();
        ui.focus(Some(WidgetId::new("t")));
        assert!(ui.key_down("a", Modifiers::NONE));

        let mut frame = ui.start_tick(&mut surface);
        frame.textbox(Textbox::new("t", Rect::new(0.0, 0.0, 100.0, 20.0), &text));
        frame.end_tick(16.0);
        assert_eq!(text.get(), "a");
    }

    #[test]
    fn test_bad_dt_is_zero() {
        let mut ui = Ui::default();
        let mut surface = CommandRecorder::new();
        ui.start_tick(&mut surface).end_tick(f32::NAN);
        ui.start_tick(&mut surface).end_tick(-5.0);
        assert!(ui.now_ms().abs() < f64::EPSILON);
        assert_eq!(ui.frame_count(), 2);
    }

    #[test]
    fn test_cursor_follows_hover() {
        let mut ui = Ui::default();
        let mut surface = CommandRecorder::new();
        ui.pointer_move(10.0, 10.0);

        let mut frame = ui.start_tick(&mut surface);
        frame.button(Button::new("b"));
        frame.end_tick(16.0);
        assert_eq!(surface.cursor(), CursorIcon::Pointer);
    }
}
