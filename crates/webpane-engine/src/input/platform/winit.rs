use ::winit::dpi::PhysicalPosition;
use ::winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use ::winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use ::winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent,
};

/// Pixel scroll distance that counts as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 120.0;

/// Turns wheel deltas into whole notches.
///
/// Line deltas are one notch per event. Pixel deltas (touchpads) are summed
/// and yield a notch each time the sum crosses [`PIXELS_PER_NOTCH`]; the rest
/// carries over to the next event. Reversing direction drops the carry.
#[derive(Debug, Default)]
pub(crate) struct WheelAccumulator {
    pixels: f64,
}

impl WheelAccumulator {
    fn notches(&mut self, delta: MouseScrollDelta) -> Option<(MouseButton, u32)> {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => {
                self.pixels = 0.0;
                wheel_button(y as f64).map(|b| (b, 1))
            }
            MouseScrollDelta::PixelDelta(p) => {
                if self.pixels * p.y < 0.0 {
                    self.pixels = 0.0;
                }
                self.pixels += p.y;

                let whole = (self.pixels.abs() / PIXELS_PER_NOTCH).floor();
                if whole < 1.0 {
                    return None;
                }
                let button = wheel_button(self.pixels)?;
                self.pixels -= whole * PIXELS_PER_NOTCH * self.pixels.signum();
                Some((button, whole as u32))
            }
        }
    }
}

/// Translates a winit `WindowEvent` into zero or more engine `InputEvent`s,
/// appended to `out`.
///
/// Wheel motion becomes press/release pairs of the wheel buttons so that
/// consumers see the classic button 4/5 convention. Button and wheel events
/// are dropped while the pointer position is unknown.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    wheel: &mut WheelAccumulator,
    event: &WindowEvent,
    out: &mut Vec<InputEvent>,
) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            out.push(InputEvent::ModifiersChanged(map_modifiers(m.state())));
        }

        WindowEvent::Focused(f) => out.push(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => out.push(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            out.push(InputEvent::PointerMoved(PointerMoveEvent { x, y }));
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            out.extend(pointer_button(state, map_mouse_button(*button), st));
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let Some((button, count)) = wheel.notches(*delta) else { return };
            for _ in 0..count {
                out.extend(pointer_button(state, button, MouseButtonState::Pressed));
                out.extend(pointer_button(state, button, MouseButtonState::Released));
            }
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            out.push(InputEvent::Key {
                key,
                state: st,
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
            });
        }

        _ => {}
    }
}

/// winit 0.30 has no cursor query; button events reuse the tracked pointer
/// position and modifier state. `None` before the first move or after the
/// pointer left the window.
fn pointer_button(
    state: &InputState,
    button: MouseButton,
    st: MouseButtonState,
) -> Option<InputEvent> {
    let (x, y) = state.pointer_pos?;
    Some(InputEvent::PointerButton(PointerButtonEvent {
        button,
        state: st,
        x,
        y,
        modifiers: state.modifiers,
    }))
}

/// Positive vertical delta scrolls up (button 4), negative scrolls down (button 5).
fn wheel_button(dy: f64) -> Option<MouseButton> {
    if dy > 0.0 {
        Some(MouseButton::WheelUp)
    } else if dy < 0.0 {
        Some(MouseButton::WheelDown)
    } else {
        None
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
        caps_lock: false,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::CapsLock => Key::CapsLock,
                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,
                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_direction_maps_to_buttons() {
        assert_eq!(wheel_button(1.0), Some(MouseButton::WheelUp));
        assert_eq!(wheel_button(-3.0), Some(MouseButton::WheelDown));
        assert_eq!(wheel_button(0.0), None);
    }

    #[test]
    fn pointer_button_uses_tracked_position() {
        let state = InputState {
            pointer_pos: Some((12.0, 34.0)),
            ..InputState::default()
        };
        let ev = pointer_button(&state, MouseButton::Left, MouseButtonState::Pressed);
        let Some(InputEvent::PointerButton(b)) = ev else { panic!("expected pointer button") };
        assert_eq!((b.x, b.y), (12.0, 34.0));
    }

    #[test]
    fn pointer_button_needs_known_position() {
        let state = InputState::default();
        assert!(pointer_button(&state, MouseButton::Left, MouseButtonState::Pressed).is_none());
        assert!(pointer_button(&state, MouseButton::WheelUp, MouseButtonState::Released).is_none());
    }

    #[test]
    fn line_deltas_are_one_notch_per_event() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(
            wheel.notches(MouseScrollDelta::LineDelta(0.0, 3.0)),
            Some((MouseButton::WheelUp, 1))
        );
        assert_eq!(
            wheel.notches(MouseScrollDelta::LineDelta(0.0, -0.5)),
            Some((MouseButton::WheelDown, 1))
        );
        assert_eq!(wheel.notches(MouseScrollDelta::LineDelta(0.0, 0.0)), None);
    }

    #[test]
    fn pixel_deltas_accumulate_into_notches() {
        let mut wheel = WheelAccumulator::default();
        let px = |y| MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, y));

        assert_eq!(wheel.notches(px(-50.0)), None);
        assert_eq!(wheel.notches(px(-50.0)), None);
        assert_eq!(wheel.notches(px(-50.0)), Some((MouseButton::WheelDown, 1)));
        // 30 px carried over.
        assert_eq!(wheel.notches(px(-250.0)), Some((MouseButton::WheelDown, 2)));
        assert_eq!(wheel.notches(px(-30.0)), None);
    }

    #[test]
    fn pixel_direction_change_drops_carry() {
        let mut wheel = WheelAccumulator::default();
        let px = |y| MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, y));

        assert_eq!(wheel.notches(px(100.0)), None);
        assert_eq!(wheel.notches(px(-100.0)), None);
        assert_eq!(wheel.notches(px(-20.0)), Some((MouseButton::WheelDown, 1)));
    }

    #[test]
    fn caps_lock_key_is_recognised() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::CapsLock)).0, Key::CapsLock);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)).0, Key::Shift);
    }
}
