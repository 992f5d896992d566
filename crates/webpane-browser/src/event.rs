use bitflags::bitflags;
use std::fmt::Display;

bitflags! {
    /// Modifier and held-button state attached to input events.
    ///
    /// Values follow CEF's `cef_event_flags_t`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventFlags: u32 {
        const CAPS_LOCK_ON         = 1 << 0;
        const SHIFT_DOWN           = 1 << 1;
        const CONTROL_DOWN         = 1 << 2;
        const ALT_DOWN             = 1 << 3;
        const LEFT_MOUSE_BUTTON    = 1 << 4;
        const MIDDLE_MOUSE_BUTTON  = 1 << 5;
        const RIGHT_MOUSE_BUTTON   = 1 << 6;
        /// Mac only.
        const COMMAND_DOWN         = 1 << 7;
    }
}

/// Mouse button of a click event. Wheel motion has its own event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButtonType {
    Left,
    Middle,
    Right,
}

impl MouseButtonType {
    /// Flag set in [`EventFlags`] while this button is held.
    pub fn held_flag(self) -> EventFlags {
        match self {
            MouseButtonType::Left => EventFlags::LEFT_MOUSE_BUTTON,
            MouseButtonType::Middle => EventFlags::MIDDLE_MOUSE_BUTTON,
            MouseButtonType::Right => EventFlags::RIGHT_MOUSE_BUTTON,
        }
    }
}

impl Display for MouseButtonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MouseButtonType::Left => write!(f, "Left"),
            MouseButtonType::Middle => write!(f, "Middle"),
            MouseButtonType::Right => write!(f, "Right"),
        }
    }
}

/// Which layer a paint notification is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintElementType {
    View,
    Popup,
}

/// Region of the view that changed, in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// View placement and size reported by [`crate::RenderHandler::view_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Whole view as a single dirty rectangle.
    pub fn full_dirty(&self) -> DirtyRect {
        DirtyRect::new(0, 0, self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
