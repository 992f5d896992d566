use std::fmt;

/// Keyboard key identifier.
///
/// Keys are not forwarded to the page; only the ones that feed modifier state
/// get their own variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    CapsLock,

    Shift,
    Control,
    Alt,
    Meta,

    /// Any other key, with its stable platform code.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
///
/// Wheel notches are modelled as the conventional buttons 4 (up) and 5 (down),
/// each producing a press immediately followed by a release.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Conventional X11/SDL button number.
    pub fn code(self) -> u16 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::WheelUp => 4,
            MouseButton::WheelDown => 5,
            MouseButton::Back => 8,
            MouseButton::Forward => 9,
            MouseButton::Other(code) => code,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::WheelUp,
            5 => MouseButton::WheelDown,
            8 => MouseButton::Back,
            9 => MouseButton::Forward,
            other => MouseButton::Other(other),
        }
    }

    #[inline]
    pub fn is_wheel(self) -> bool {
        matches!(self, MouseButton::WheelUp | MouseButton::WheelDown)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
///
/// Stored as booleans; consumers build whatever bitmask their peer expects.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Super / Windows / Command key.
    pub meta: bool,
    /// Caps lock is a toggle, not a held key.
    pub caps_lock: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta || self.caps_lock
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event, carrying the pointer position at the time of the
/// press/release.
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
        /// Stable platform code when available (e.g. scancode).
        code: u32,
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

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (button {})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_follow_convention() {
        assert_eq!(MouseButton::Left.code(), 1);
        assert_eq!(MouseButton::Middle.code(), 2);
        assert_eq!(MouseButton::Right.code(), 3);
        assert_eq!(MouseButton::from_code(4), MouseButton::WheelUp);
        assert_eq!(MouseButton::from_code(5), MouseButton::WheelDown);
        assert_eq!(MouseButton::from_code(12), MouseButton::Other(12));
    }

    #[test]
    fn only_wheel_buttons_are_wheel() {
        assert!(MouseButton::WheelUp.is_wheel());
        assert!(MouseButton::WheelDown.is_wheel());
        assert!(!MouseButton::Left.is_wheel());
        assert!(!MouseButton::Other(4).is_wheel());
    }
}
