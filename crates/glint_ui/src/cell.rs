//! Caller-owned value cells.
//!
//! A [`Ref`] is the slot a checkbox or textbox reads and writes. The caller
//! keeps a handle for the whole lifetime of its application state; the
//! toolkit only borrows a clone for the frame the widget is declared in.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A mutable single-slot holder shared between the caller and the renderer.
///
/// Clones share the same slot. Identity is the slot, not the value: two
/// cells holding equal values are still different cells.
pub struct Ref<T> {
    slot: Arc<Mutex<T>>,
}

/// Creates a new value cell.
#[must_use]
pub fn cell<T>(value: T) -> Ref<T> {
    Ref::new(value)
}

impl<T> Ref<T> {
    /// Creates a new value cell holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(value)),
        }
    }

    /// Replaces the current value.
    pub fn set(&self, value: T) {
        *self.slot.lock() = value;
    }

    /// Runs `f` with mutable access to the value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.slot.lock())
    }

    /// Runs `f` with shared access to the value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.lock())
    }

    /// Returns true if both handles point at the same slot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T: Clone> Ref<T> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.lock().clone()
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Default> Default for Ref<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Formatting from inside update/with must not wait on the held lock
        match self.slot.try_lock() {
            Some(value) => f.debug_tuple("Ref").field(&*value).finish(),
            None => f.write_str("Ref(<locked>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slot() {
        let a = cell(false);
        let b = a.clone();
        b.set(true);
        assert!(a.get());
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_equal_values_distinct_cells() {
        let a = cell(String::from("x"));
        let b = cell(String::from("x"));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_update_returns_closure_result() {
        let text = cell(String::from("abc"));
        let popped = text.update(String::pop);
        assert_eq!(popped, Some('c'));
        assert_eq!(text.get(), "ab");
    }

    #[test]
    fn test_debug_while_locked() {
        let count = cell(3_u32);
        assert_eq!(format!("{count:?}"), "Ref(3)");
        let inside = count.with(|_| format!("{count:?}"));
        assert_eq!(inside, "Ref(<locked>)");
    }
}
