use std::collections::HashSet;

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
/// Holds "is down" information, modifier state and pointer position.
/// Every applied event is also queued into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state, caps lock included.
    ///
    /// winit reports no lock-key state, so caps lock is a toggle counted from
    /// `CapsLock` presses seen by this window and starts off. If caps lock was
    /// already on when the window opened, `caps_lock` reads inverted until the
    /// key is pressed twice.
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
    /// Applies a platform-agnostic input event to the current state and queues it in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                // Toolkits report held modifiers only; caps lock is tracked here.
                self.modifiers = Modifiers { caps_lock: self.modifiers.caps_lock, ..*m };
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, repeat, .. } => match state {
                KeyState::Pressed => {
                    if *key == Key::CapsLock && !*repeat {
                        self.modifiers.caps_lock = !self.modifiers.caps_lock;
                    }
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));

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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 5.0,
            y: 6.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn caps_lock_toggles_on_press() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::CapsLock, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::CapsLock, KeyState::Released));
        assert!(st.modifiers.caps_lock);

        st.apply_event(&mut fr, key(Key::CapsLock, KeyState::Pressed));
        assert!(!st.modifiers.caps_lock);
    }

    #[test]
    fn caps_lock_starts_off_and_ignores_repeats() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        assert!(!st.modifiers.caps_lock);

        st.apply_event(&mut fr, key(Key::CapsLock, KeyState::Pressed));
        let repeat = InputEvent::Key {
            key: Key::CapsLock,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: true,
        };
        st.apply_event(&mut fr, repeat);
        assert!(st.modifiers.caps_lock);
    }

    #[test]
    fn modifiers_changed_keeps_caps_lock() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::CapsLock, KeyState::Pressed));

        let held = Modifiers { shift: true, ..Modifiers::default() };
        st.apply_event(&mut fr, InputEvent::ModifiersChanged(held));

        assert!(st.modifiers.shift);
        assert!(st.modifiers.caps_lock);
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, button(MouseButton::Left, MouseButtonState::Pressed));
        assert!(st.button_down(MouseButton::Left));
        assert_eq!(st.pointer_pos, Some((5.0, 6.0)));

        st.apply_event(&mut fr, button(MouseButton::Left, MouseButtonState::Released));
        assert!(!st.button_down(MouseButton::Left));
        assert!(fr.buttons_pressed.contains(&MouseButton::Left));
        assert!(fr.buttons_released.contains(&MouseButton::Left));
        assert_eq!(fr.events.len(), 2);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Shift, KeyState::Pressed));
        st.apply_event(&mut fr, button(MouseButton::Right, MouseButtonState::Pressed));

        st.apply_event(&mut fr, InputEvent::Focused(false));

        assert!(!st.key_down(Key::Shift));
        assert!(!st.button_down(MouseButton::Right));
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
