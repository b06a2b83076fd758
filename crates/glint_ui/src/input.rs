//! Input sampling between frames.
//!
//! Host event callbacks write here; the frame resolver drains the edge
//! buffers once per frame. Pointer position is never buffered, it always
//! holds the latest coordinates.

/// A key as reported by the host, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Delete the character before the cursor.
    Backspace,
    /// Submit and release focus.
    Enter,
    /// Release focus.
    Escape,
    /// A key that produces exactly one character.
    Char(char),
    /// Any other named key (`"ArrowLeft"`, `"Shift"`, ...). Ignored by
    /// textboxes.
    Named(String),
}

impl Key {
    /// Maps a DOM-style key name to a key.
    ///
    /// A name made of exactly one character is that character; `"Enter"`,
    /// `"Escape"` and `"Backspace"` are the editing keys; every other name
    /// is kept as [`Key::Named`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::Char(c);
        }
        match name {
            "Backspace" => Self::Backspace,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            other => Self::Named(other.to_owned()),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command/Meta key is held.
    pub super_key: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        super_key: false,
    };

    /// Returns true if this is a hotkey combination that belongs to the
    /// host. Shift alone is not a combination.
    #[must_use]
    pub const fn is_hotkey(self) -> bool {
        self.ctrl || self.alt || self.super_key
    }
}

/// Raw input collected since the last frame.
#[derive(Debug, Clone)]
pub struct InputSampler {
    /// Current pointer X position.
    pub mouse_x: f32,
    /// Current pointer Y position.
    pub mouse_y: f32,
    /// Pointer went down since the last frame.
    pointer_pressed: bool,
    /// Keys captured since the last frame, in arrival order.
    keys_pressed: Vec<Key>,
    /// Capture limit for `keys_pressed`.
    max_buffered_keys: usize,
}

impl InputSampler {
    /// Creates a sampler that buffers at most `max_buffered_keys` keys
    /// between two frames.
    #[must_use]
    pub fn new(max_buffered_keys: usize) -> Self {
        Self {
            mouse_x: 0.0,
            mouse_y: 0.0,
            pointer_pressed: false,
            keys_pressed: Vec::with_capacity(16),
            max_buffered_keys,
        }
    }

    /// Updates pointer position.
    pub fn set_pointer_pos(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Records a pointer-down edge.
    pub fn pointer_down(&mut self) {
        self.pointer_pressed = true;
    }

    /// Offers a key press to the toolkit.
    ///
    /// The key is captured only while some widget holds focus and no
    /// hotkey modifier is held. Returns true if captured, in which case the
    /// host must suppress its own handling of the event.
    pub fn capture_key(&mut self, key: Key, modifiers: Modifiers, focus_active: bool) -> bool {
        if modifiers.is_hotkey() || !focus_active {
            return false;
        }
        if self.keys_pressed.len() >= self.max_buffered_keys {
            tracing::warn!(
                "Key buffer full ({} keys), dropping {:?}; is end_tick being called?",
                self.keys_pressed.len(),
                key
            );
            return true;
        }
        tracing::trace!("Captured key {:?}", key);
        self.keys_pressed.push(key);
        true
    }

    /// Returns true if the pointer went down since the last frame.
    #[must_use]
    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    /// Returns the captured keys without consuming them.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Consumes the pointer-down edge.
    pub fn take_pointer_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pointer_pressed)
    }

    /// Consumes the captured keys.
    pub fn take_keys(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.keys_pressed)
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(256)
    }
}
