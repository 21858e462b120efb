use std::collections::HashSet;

use crate::coords::Viewport;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for the window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                frame.pointer_moved = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Pointer position in normalized device coordinates (`+Y` up).
    pub fn pointer_ndc(&self, viewport: Viewport) -> Option<(f32, f32)> {
        if !viewport.is_valid() {
            return None;
        }
        self.pointer_pos
            .map(|(x, y)| (2.0 * x / viewport.width - 1.0, 1.0 - 2.0 * y / viewport.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    #[test]
    fn key_press_is_reported_once() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Digit3, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::Digit3, KeyState::Pressed));
        assert!(st.key_down(Key::Digit3));
        assert_eq!(fr.keys_pressed.len(), 1);
        assert_eq!(fr.events.len(), 2);

        fr.clear();
        st.apply_event(&mut fr, key(Key::Digit3, KeyState::Released));
        assert!(!st.key_down(Key::Digit3));
        assert!(fr.keys_released.contains(&Key::Digit3));
        assert!(fr.keys_pressed.is_empty());
    }

    #[test]
    fn button_press_moves_the_pointer() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, press(MouseButton::Left, 10.0, 20.0));
        assert_eq!(st.pointer_pos, Some((10.0, 20.0)));
        assert!(st.button_down(MouseButton::Left));
        assert!(fr.buttons_pressed.contains(&MouseButton::Left));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, press(MouseButton::Right, 0.0, 0.0));
        st.apply_event(&mut fr, key(Key::Tab, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.buttons_down.is_empty());
        assert!(st.keys_down.is_empty());
    }

    #[test]
    fn pointer_maps_to_ndc() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let vp = Viewport::new(600.0, 400.0);
        assert_eq!(st.pointer_ndc(vp), None);

        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }));
        assert_eq!(st.pointer_ndc(vp), Some((-1.0, 1.0)));
        assert!(fr.pointer_moved);

        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 300.0, y: 300.0 }));
        assert_eq!(st.pointer_ndc(vp), Some((0.0, -0.5)));

        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_ndc(vp), None);
    }
}
