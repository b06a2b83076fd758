//! Widget painting.
//!
//! The [`Renderer`] walks the frame registry in declaration order and paints
//! every widget through a [`Surface`]:
//!
//! ```text
//! border → background → hover overlay → content → flash overlay
//! ```
//!
//! Textboxes apply pending key presses to their cell before painting, and
//! checkboxes apply a pending click toggle. Both edits are consumed when
//! applied, so painting the same registry twice never applies them twice.
//!
//! [`CommandRecorder`] is a [`Surface`] that records what was drawn, for
//! headless hosts and tests.

use crate::animation::AnimationTable;
use crate::cell::Ref;
use crate::input::Key;
use crate::interaction::InteractionState;
use crate::layout::Rect;
use crate::style::{Color, Style};
use crate::surface::{CursorIcon, Surface, TextAlign, TextBaseline};
use crate::widget::{FrameRegistry, Widget, WidgetId, WidgetKind};

/// Paints widgets and applies their pending edits.
#[derive(Debug, Clone)]
pub struct Renderer {
    style: Style,
    flash_duration_ms: f64,
}

impl Renderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(style: Style, flash_duration_ms: f64) -> Self {
        Self {
            style,
            flash_duration_ms,
        }
    }

    /// Paints every declared widget at clock time `now_ms`.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        registry: &FrameRegistry,
        state: &mut InteractionState,
        animations: &AnimationTable,
        now_ms: f64,
        surface: &mut S,
    ) {
        surface.set_font(&self.style.font);
        for (index, widget) in registry.iter().enumerate() {
            self.paint_widget(index, widget, state, animations, now_ms, surface);
        }
    }

    fn paint_widget<S: Surface + ?Sized>(
        &self,
        index: usize,
        widget: &Widget,
        state: &mut InteractionState,
        animations: &AnimationTable,
        now_ms: f64,
        surface: &mut S,
    ) {
        let Widget { id, rect, kind } = widget;

        if let WidgetKind::Textbox { value, .. } = kind {
            if state.focus_index == Some(index) {
                let keys = std::mem::take(&mut state.pending_keys);
                apply_keys(id, value, &keys, state);
            }
        }

        self.paint_frame(*rect, animations.hover(id), surface);

        match kind {
            WidgetKind::Button { text } => self.paint_button(*rect, text, surface),
            WidgetKind::Checkbox { value } => {
                if state.pending_toggle == Some(index) {
                    state.pending_toggle = None;
                    let checked = value.update(|checked| {
                        *checked = !*checked;
                        *checked
                    });
                    tracing::debug!("Checkbox {:?} toggled to {}", id.as_str(), checked);
                }
                if value.get() {
                    surface.fill_rect(rect.shrink(self.style.checkbox_inset), self.style.text);
                }
            }
            WidgetKind::Textbox { value, placeholder } => {
                let focused = state.focus_index == Some(index);
                value.with(|text| {
                    self.paint_textbox(*rect, text, placeholder.as_deref(), focused, surface);
                });
            }
        }

        let flash = animations.flash(id, now_ms, self.flash_duration_ms);
        if flash > 0.0 {
            overlay(surface, *rect, self.style.flash_tint, flash * self.style.flash_alpha);
        }
    }

    /// Border, background and hover overlay.
    fn paint_frame<S: Surface + ?Sized>(&self, rect: Rect, hover: f32, surface: &mut S) {
        let inner = rect.shrink(self.style.border_width);
        surface.fill_rect(rect, self.style.border);
        surface.fill_rect(inner, self.style.background);
        if hover > 0.0 {
            overlay(surface, inner, self.style.hover_tint, hover * self.style.hover_alpha);
        }
    }

    fn paint_button<S: Surface + ?Sized>(&self, rect: Rect, text: &str, surface: &mut S) {
        let (cx, cy) = rect.center();
        surface.save();
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.clip(rect.shrink(self.style.border_width));
        surface.fill_text(text, cx, cy, self.style.text);
        surface.restore();
    }

    fn paint_textbox<S: Surface + ?Sized>(
        &self,
        rect: Rect,
        text: &str,
        placeholder: Option<&str>,
        focused: bool,
        surface: &mut S,
    ) {
        let text_x = rect.x + self.style.text_padding;
        let (_, text_y) = rect.center();

        surface.save();
        surface.set_text_align(TextAlign::Left);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.clip(rect.inset(self.style.text_clip_inset, 0.0));

        match placeholder {
            Some(placeholder) if text.is_empty() => {
                surface.save();
                surface.set_alpha(self.style.placeholder_alpha);
                surface.fill_text(placeholder, text_x, text_y, self.style.text);
                surface.restore();
            }
            _ => surface.fill_text(text, text_x, text_y, self.style.text),
        }

        if focused {
            let width = surface.measure_text(text);
            let caret = Rect::new(
                text_x + width,
                text_y - self.style.caret_height / 2.0,
                self.style.caret_width,
                self.style.caret_height,
            );
            surface.fill_rect(caret, self.style.text);
        }

        surface.restore();
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Style::default(), 500.0)
    }
}

/// Fills `rect` with `color` at `alpha`, leaving surface alpha untouched.
fn overlay<S: Surface + ?Sized>(surface: &mut S, rect: Rect, color: Color, alpha: f32) {
    surface.save();
    surface.set_alpha(alpha);
    surface.fill_rect(rect, color);
    surface.restore();
}

/// Applies key presses to a focused textbox's cell.
///
/// Stops at the key that releases focus; later keys are discarded.
fn apply_keys(
    id: &WidgetId,
    value: &Ref<String>,
    keys: &[Key],
    state: &mut InteractionState,
) {
    for key in keys {
        match key {
            Key::Backspace => {
                value.update(String::pop);
            }
            Key::Char(c) => value.update(|text| text.push(*c)),
            Key::Enter => {
                tracing::debug!("Textbox {:?} submitted", id.as_str());
                state.submitted = Some(id.clone());
                state.focused = None;
                state.focus_index = None;
                return;
            }
            Key::Escape => {
                tracing::debug!("Textbox {:?} released focus", id.as_str());
                state.focused = None;
                state.focus_index = None;
                return;
            }
            Key::Named(_) => {}
        }
    }
}

/// A draw call captured by [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Global alpha at the time of the call.
        alpha: f32,
        /// Effective clip, if any.
        clip: Option<Rect>,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// X anchor.
        x: f32,
        /// Y anchor.
        y: f32,
        /// Text color.
        color: Color,
        /// Global alpha at the time of the call.
        alpha: f32,
        /// Horizontal anchoring.
        align: TextAlign,
        /// Vertical anchoring.
        baseline: TextBaseline,
        /// Effective clip, if any.
        clip: Option<Rect>,
    },
    /// Font change.
    Font(String),
    /// Cursor change.
    Cursor(CursorIcon),
}

/// Settings covered by save/restore.
#[derive(Debug, Clone, Copy)]
struct DrawState {
    alpha: f32,
    clip: Option<Rect>,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            clip: None,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }
}

/// A [`Surface`] that records draw calls instead of rasterising them.
///
/// Text is measured as a fixed advance per character.
#[derive(Debug)]
pub struct CommandRecorder {
    /// Recorded commands, in call order.
    commands: Vec<RenderCommand>,
    /// Current settings.
    current: DrawState,
    /// Saved settings.
    stack: Vec<DrawState>,
    /// Advance width of one character.
    char_width: f32,
    /// Last cursor set.
    cursor: CursorIcon,
}

impl CommandRecorder {
    /// Default character advance (monospace estimate).
    pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

    /// Creates a recorder with the default character advance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_char_width(Self::DEFAULT_CHAR_WIDTH)
    }

    /// Creates a recorder measuring `char_width` per character.
    #[must_use]
    pub fn with_char_width(char_width: f32) -> Self {
        Self {
            commands: Vec::with_capacity(256),
            current: DrawState::default(),
            stack: Vec::with_capacity(8),
            char_width,
            cursor: CursorIcon::Default,
        }
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the text of every recorded text command.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the last cursor set.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Depth of the save stack; zero when every save was restored.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CommandRecorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::Rect {
            bounds: rect,
            color,
            alpha: self.current.alpha,
            clip: self.current.clip,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.current.alpha = alpha;
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.current = saved;
        }
    }

    fn clip(&mut self, rect: Rect) {
        // Intersect with current clip if any
        let clip = match self.current.clip {
            Some(current) => current.intersection(&rect).unwrap_or(Rect::ZERO),
            None => rect,
        };
        self.current.clip = Some(clip);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.current.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.current.baseline = baseline;
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(RenderCommand::Font(font.to_owned()));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
            alpha: self.current.alpha,
            align: self.current.align,
            baseline: self.current.baseline,
            clip: self.current.clip,
        });
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
        self.commands.push(RenderCommand::Cursor(cursor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::cell;
    use crate::widget::{Button, Checkbox, Textbox};

    fn focused_state(id: &str, index: usize, keys: &[&str]) -> InteractionState {
        let mut state = InteractionState::new();
        state.focused = Some(WidgetId::new(id));
        state.focus_index = Some(index);
        state.pending_keys = keys.iter().map(|name| Key::from_name(name)).collect();
        state
    }

    #[test]
    fn test_backspace_then_char() {
        let text = cell(String::from("abc"));
        let mut registry = FrameRegistry::new();
        registry.push(Textbox::new("t", Rect::new(0.0, 0.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("t", 0, &["Backspace", "d"]);

        let mut surface = CommandRecorder::new();
        Renderer::default().paint(&registry, &mut state, &AnimationTable::new(), 0.0, &mut surface);

        assert_eq!(text.get(), "abd");
        assert!(state.pending_keys.is_empty());
    }

    #[test]
    fn test_backspace_on_empty_and_named_keys() {
        let text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(Textbox::new("t", Rect::new(0.0, 0.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("t", 0, &["Backspace", "ArrowLeft", "Shift", "x"]);

        Renderer::default().paint(
            &registry,
            &mut state,
            &AnimationTable::new(),
            0.0,
            &mut CommandRecorder::new(),
        );

        assert_eq!(text.get(), "x");
    }

    #[test]
    fn test_enter_submits_and_discards_rest() {
        let text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(Textbox::new("t", Rect::new(0.0, 0.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("t", 0, &["h", "i", "Enter", "x"]);

        Renderer::default().paint(
            &registry,
            &mut state,
            &AnimationTable::new(),
            0.0,
            &mut CommandRecorder::new(),
        );

        assert_eq!(text.get(), "hi");
        assert_eq!(state.focused(), None);
        assert_eq!(state.submitted().map(WidgetId::as_str), Some("t"));
    }

    #[test]
    fn test_escape_releases_without_submit() {
        let text = cell(String::from("keep"));
        let mut registry = FrameRegistry::new();
        registry.push(Textbox::new("t", Rect::new(0.0, 0.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("t", 0, &["Escape"]);

        Renderer::default().paint(
            &registry,
            &mut state,
            &AnimationTable::new(),
            0.0,
            &mut CommandRecorder::new(),
        );

        assert_eq!(text.get(), "keep");
        assert_eq!(state.focused(), None);
        assert_eq!(state.submitted(), None);
    }

    #[test]
    fn test_repaint_does_not_double_apply() {
        let checked = cell(false);
        let text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(Checkbox::new("c", Rect::new(0.0, 0.0, 20.0, 20.0), &checked).into());
        registry.push(Textbox::new("t", Rect::new(0.0, 30.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("t", 1, &["a"]);
        state.pending_toggle = Some(0);

        let renderer = Renderer::default();
        let animations = AnimationTable::new();
        let mut surface = CommandRecorder::new();
        renderer.paint(&registry, &mut state, &animations, 0.0, &mut surface);
        renderer.paint(&registry, &mut state, &animations, 0.0, &mut surface);

        assert!(checked.get());
        assert_eq!(text.get(), "a");
    }

    #[test]
    fn test_edits_go_to_indexed_declaration() {
        let upper_check = cell(false);
        let lower_check = cell(false);
        let upper_text = cell(String::new());
        let lower_text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(Checkbox::new("c", Rect::new(0.0, 0.0, 20.0, 20.0), &upper_check).into());
        registry.push(Checkbox::new("c", Rect::new(0.0, 30.0, 20.0, 20.0), &lower_check).into());
        registry.push(Textbox::new("t", Rect::new(0.0, 60.0, 200.0, 30.0), &upper_text).into());
        registry.push(Textbox::new("t", Rect::new(0.0, 90.0, 200.0, 30.0), &lower_text).into());
        let mut state = focused_state("t", 2, &["q"]);
        state.pending_toggle = Some(1);

        let mut surface = CommandRecorder::new();
        Renderer::default().paint(&registry, &mut state, &AnimationTable::new(), 0.0, &mut surface);

        assert!(!upper_check.get());
        assert!(lower_check.get());
        assert_eq!(upper_text.get(), "q");
        assert_eq!(lower_text.get(), "");
        // One caret, in the focused declaration
        let carets = surface
            .commands()
            .iter()
            .filter(|command| {
                matches!(command, RenderCommand::Rect { bounds, .. } if (bounds.width - 1.0).abs() < f32::EPSILON)
            })
            .count();
        assert_eq!(carets, 1);
    }

    #[test]
    fn test_unfocused_textbox_ignores_keys() {
        let text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(Textbox::new("t", Rect::new(0.0, 0.0, 200.0, 30.0), &text).into());
        let mut state = focused_state("other", 1, &["a"]);

        Renderer::default().paint(
            &registry,
            &mut state,
            &AnimationTable::new(),
            0.0,
            &mut CommandRecorder::new(),
        );

        assert_eq!(text.get(), "");
        assert_eq!(state.pending_keys, vec![Key::Char('a')]);
    }

    #[test]
    fn test_placeholder_dimmed_and_caret_after_text() {
        let text = cell(String::new());
        let mut registry = FrameRegistry::new();
        registry.push(
            Textbox::new("t", Rect::new(10.0, 10.0, 200.0, 30.0), &text)
                .placeholder("Your name")
                .into(),
        );
        let mut state = focused_state("t", 0, &["a", "b"]);
        let mut surface = CommandRecorder::new();

        Renderer::default().paint(&registry, &mut state, &AnimationTable::new(), 0.0, &mut surface);
        assert_eq!(surface.texts(), vec!["ab"]);
        let caret = surface.commands().iter().rev().find_map(|command| match command {
            RenderCommand::Rect { bounds, .. } => Some(*bounds),
            _ => None,
        });
        // text starts at x + 8, two characters of 8px each
        assert_eq!(caret, Some(Rect::new(34.0, 17.0, 1.0, 16.0)));

        text.set(String::new());
        let mut state = InteractionState::new();
        let mut surface = CommandRecorder::new();
        Renderer::default().paint(&registry, &mut state, &AnimationTable::new(), 0.0, &mut surface);
        let placeholder = surface.commands().iter().find_map(|command| match command {
            RenderCommand::Text { text, alpha, clip, .. } => Some((text.clone(), *alpha, *clip)),
            _ => None,
        });
        assert_eq!(
            placeholder,
            Some((
                "Your name".to_owned(),
                0.5,
                Some(Rect::new(14.0, 10.0, 192.0, 30.0))
            ))
        );
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_button_text_centered_and_clipped() {
        let mut registry = FrameRegistry::new();
        registry.push(
            Button::new("OK")
                .at(0.0, 0.0)
                .size(100.0, 30.0)
                .into_widget(100.0, 50.0),
        );
        let mut surface = CommandRecorder::new();
        Renderer::default().paint(
            &registry,
            &mut InteractionState::new(),
            &AnimationTable::new(),
            0.0,
            &mut surface,
        );

        let text = surface.commands().iter().find_map(|command| match command {
            RenderCommand::Text { x, y, align, clip, .. } => Some((*x, *y, *align, *clip)),
            _ => None,
        });
        assert_eq!(
            text,
            Some((50.0, 15.0, TextAlign::Center, Some(Rect::new(1.0, 1.0, 98.0, 28.0))))
        );
    }

    #[test]
    fn test_overlays_follow_animation_state() {
        let mut registry = FrameRegistry::new();
        registry.push(Button::new("OK").id("ok").into_widget(100.0, 50.0));
        let id = WidgetId::new("ok");
        let mut animations = AnimationTable::new();
        animations.step_hover(&id, true, 0.5, 1);
        animations.record_action(&id, 100.0, 1);

        let mut surface = CommandRecorder::new();
        Renderer::default().paint(
            &registry,
            &mut InteractionState::new(),
            &animations,
            350.0,
            &mut surface,
        );

        let alphas: Vec<f32> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Rect { alpha, .. } if *alpha < 1.0 => Some(*alpha),
                _ => None,
            })
            .collect();
        // hover 0.5 * 0.1, then flash at 250ms: 0.25 * 0.25
        assert_eq!(alphas.len(), 2);
        assert!((alphas[0] - 0.05).abs() < 1e-6);
        assert!((alphas[1] - 0.0625).abs() < 1e-6);
    }
}
