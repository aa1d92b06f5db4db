//! Input Module
//!
//! The character never sees keys, only the [`InputPort`] capability:
//! "is this logical action pressed right now". Hosts wire a
//! [`KeyboardInput`] (keyboard state + remappable bindings); tests and the
//! headless runner use [`ScriptedInput`].
//!
//! # Example
//!
//! ```rust,ignore
//! use dolphin_dash_engine::input::{InputAction, InputPort, KeyCode, KeyboardInput};
//!
//! let mut input = KeyboardInput::new();
//! input.handle_key(KeyCode::W, true);
//! assert!(input.is_action_pressed(InputAction::Forward));
//! ```

pub mod bindings;
pub mod keyboard;

use std::collections::HashSet;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};

/// Capability exposing the current state of logical actions.
pub trait InputPort {
    fn is_action_pressed(&self, action: InputAction) -> bool;
}

impl<T: InputPort + ?Sized> InputPort for &T {
    fn is_action_pressed(&self, action: InputAction) -> bool {
        (**self).is_action_pressed(action)
    }
}

impl<T: InputPort + ?Sized> InputPort for Box<T> {
    fn is_action_pressed(&self, action: InputAction) -> bool {
        (**self).is_action_pressed(action)
    }
}

/// Keyboard state resolved through key bindings.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    pub keyboard: KeyboardState,
    pub bindings: KeyBindings,
}

impl KeyboardInput {
    /// Default bindings, nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            bindings,
        }
    }

    /// Forward a key event from the host.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.keyboard.handle_key(key, pressed)
    }

    /// Replace the bindings; held keys are kept.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }
}

impl InputPort for KeyboardInput {
    fn is_action_pressed(&self, action: InputAction) -> bool {
        self.bindings
            .is_action_pressed(action, self.keyboard.pressed_keys())
    }
}

/// Input driven directly by code: a set of held actions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: HashSet<InputAction>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with `actions` held.
    pub fn holding(actions: &[InputAction]) -> Self {
        Self {
            held: actions.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, action: InputAction) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    pub fn set(&mut self, action: InputAction, pressed: bool) {
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputPort for ScriptedInput {
    fn is_action_pressed(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }
}

/// All seven actions sampled once, so a frame sees a consistent view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub boost: bool,
    pub dive: bool,
}

impl ActionState {
    /// Sample every action from `port`.
    pub fn read(port: &dyn InputPort) -> Self {
        Self {
            forward: port.is_action_pressed(InputAction::Forward),
            backward: port.is_action_pressed(InputAction::Backward),
            left: port.is_action_pressed(InputAction::Left),
            right: port.is_action_pressed(InputAction::Right),
            jump: port.is_action_pressed(InputAction::Jump),
            boost: port.is_action_pressed(InputAction::Boost),
            dive: port.is_action_pressed(InputAction::Dive),
        }
    }

    /// Forward/backward direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Turn direction: +1 turning left, -1 turning right.
    pub fn turn_axis(&self) -> i32 {
        (self.left as i32) - (self.right as i32)
    }

    /// Whether a propulsion key is held.
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward
    }
}
