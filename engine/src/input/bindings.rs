//! Input Bindings Module
//!
//! Maps physical keys to the seven logical actions the character reads.
//! Bindings can be changed at any time; the simulation only ever asks
//! "is this action pressed", so remapping never touches simulation state.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::KeyCode;

/// Logical input actions consumed by the character controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Swim/run forward (default: W)
    Forward,
    /// Back off (default: S)
    Backward,
    /// Turn left (default: A)
    Left,
    /// Turn right (default: D)
    Right,
    /// Jump on land, breach in water (default: Space)
    Jump,
    /// Hold to boost while stamina lasts (default: Shift)
    Boost,
    /// Hold to dive (default: Ctrl)
    Dive,
}

impl InputAction {
    /// Every action, in a stable order.
    pub const ALL: [InputAction; 7] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Jump,
        InputAction::Boost,
        InputAction::Dive,
    ];
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to physical key (for reverse lookup and display)
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W = Forward
    /// - S = Backward
    /// - A = Left
    /// - D = Right
    /// - Space = Jump
    /// - Shift (Left) = Boost
    /// - Ctrl (Left) = Dive
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::Forward);
        bindings.bind(KeyCode::S, InputAction::Backward);
        bindings.bind(KeyCode::A, InputAction::Left);
        bindings.bind(KeyCode::D, InputAction::Right);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Boost);
        bindings.bind(KeyCode::ControlLeft, InputAction::Dive);

        bindings
    }

    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Build bindings from `(key, action)` pairs, later pairs winning.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (KeyCode, InputAction)>) -> Self {
        let mut bindings = Self::empty();
        for (key, action) in pairs {
            bindings.bind(key, action);
        }
        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&action);
        }
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&key);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check if a specific action is currently pressed, given a set of pressed keys.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.action_to_key
            .get(&action)
            .is_some_and(|key| pressed_keys.contains(key))
    }

    /// Get all current bindings as key-action pairs.
    pub fn all_bindings(&self) -> impl Iterator<Item = (KeyCode, InputAction)> + '_ {
        self.key_to_action.iter().map(|(&k, &a)| (k, a))
    }
}
