use std::fmt;

/// Keyboard key identifier.
///
/// Covers the keys the demos bind. Everything else maps to `Key::Unknown(u32)`
/// with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Numeric value of a digit key.
    pub fn digit(self) -> Option<u8> {
        let d = match self {
            Key::Digit0 => 0,
            Key::Digit1 => 1,
            Key::Digit2 => 2,
            Key::Digit3 => 3,
            Key::Digit4 => 4,
            Key::Digit5 => 5,
            Key::Digit6 => 6,
            Key::Digit7 => 7,
            Key::Digit8 => 8,
            Key::Digit9 => 9,
            _ => return None,
        };
        Some(d)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event at the pointer position of the press/release.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.digit() {
            Some(d) => write!(f, "{d}"),
            None => write!(f, "{:?}", self),
        }
    }
}
