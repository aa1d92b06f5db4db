//! Keyboard Input Module
//!
//! Generic key codes and pressed-key tracking, decoupled from any
//! windowing system. The host translates its native key events into
//! [`KeyCode`]s and feeds them to [`KeyboardState::handle_key`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters commonly used for movement
    W,
    A,
    S,
    D,
    Q,
    E,
    C,
    X,
    Z,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    Enter,
    Escape,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the held state of the key changed.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }
        if pressed {
            self.pressed.insert(key)
        } else {
            self.pressed.remove(&key)
        }
    }

    /// Whether `key` is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// All keys currently held.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Check if any key is held.
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Release every key (e.g. on window focus loss).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
