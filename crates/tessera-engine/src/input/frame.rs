use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer position).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Pointer moved at least once this frame.
    pub pointer_moved: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_moved = false;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn button_pressed(&self, btn: MouseButton) -> bool {
        self.buttons_pressed.contains(&btn)
    }

    pub fn button_released(&self, btn: MouseButton) -> bool {
        self.buttons_released.contains(&btn)
    }
}
