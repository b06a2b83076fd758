//! # Glint UI
//!
//! Immediate-mode widgets over a 2D raster canvas. The caller declares
//! buttons, checkboxes and textboxes every frame; the toolkit remembers
//! only what has to survive between frames, keyed by widget id.
//!
//! ## Frame Protocol
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  start_tick → declare widgets → end_tick(dt)                  │
//! │                    ↓                 ↓                        │
//! │         answers from last frame   hit test → click/focus      │
//! │                                   → hover animation           │
//! │                                   → paint (+ cell edits)      │
//! │                                   → evict → clear             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use glint_ui::{cell, Button, Checkbox, CommandRecorder, Rect, Ui};
//!
//! let mut ui = Ui::default();
//! let mut surface = CommandRecorder::new();
//! let show_fps = cell(false);
//! let mut count = 0;
//!
//! ui.pointer_move(20.0, 20.0);
//! ui.pointer_down();
//! for _ in 0..2 {
//!     let mut frame = ui.start_tick(&mut surface);
//!     if frame.button(Button::new("+1 count").id("inc").at(8.0, 8.0)) {
//!         count += 1;
//!     }
//!     frame.checkbox(Checkbox::new("show-fps", Rect::new(8.0, 70.0, 20.0, 20.0), &show_fps));
//!     frame.end_tick(16.0);
//! }
//! assert_eq!(count, 1);
//! ```
//!
//! ## Invariants
//!
//! - At most one widget is hovered, clicked and focused per frame; when
//!   widgets overlap, the one declared last wins.
//! - A pointer-down edge produces exactly one click, reported by the
//!   declaration API on exactly one frame.
//! - Per-id animation state is evicted once the id stops being declared.

#![deny(unsafe_code)]

pub mod animation;
pub mod cell;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod style;
pub mod surface;
pub mod widget;

pub use cell::{cell, Ref};
pub use config::{FocusPolicy, UiConfig};
pub use context::{Frame, FrameReport, Ui};
pub use error::{UiError, UiResult};
pub use input::{Key, Modifiers};
pub use interaction::InteractionState;
pub use layout::Rect;
pub use render::{CommandRecorder, RenderCommand, Renderer};
pub use style::{Color, Style};
pub use surface::{CursorIcon, Surface, TextAlign, TextBaseline};
pub use widget::{Button, Checkbox, Textbox, Widget, WidgetId, WidgetKind};
