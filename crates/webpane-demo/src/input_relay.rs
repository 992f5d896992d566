use webpane_browser::{Browser, EventFlags, MouseButtonType};
use webpane_engine::coords::{Rect, Vec2};
use webpane_engine::input::{
    InputEvent, InputState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Translates window input into browser events for a view of fixed size.
#[derive(Debug, Clone, Copy)]
pub struct InputRelay {
    bounds: Rect,
    scroll_delta: i32,
}

impl InputRelay {
    pub fn new(width: u32, height: u32, scroll_delta: i32) -> Self {
        Self {
            bounds: Rect::from_size(width as f32, height as f32),
            scroll_delta,
        }
    }

    /// Forwards every event in order. Modifier flags come from `input`, the
    /// state at the time of dispatch.
    pub fn relay_all(&self, browser: &dyn Browser, input: &InputState, events: &[InputEvent]) {
        for ev in events {
            self.relay(browser, input, ev);
        }
    }

    pub fn relay(&self, browser: &dyn Browser, input: &InputState, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let (x, y) = floor_pos(*x, *y);
                browser.send_mouse_move(x, y, false, event_flags(input));
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                let (xi, yi) = floor_pos(*x, *y);
                let up = *state == MouseButtonState::Released;

                if let Some(delta_y) = self.wheel_delta(*button) {
                    // Wheel notches arrive as press/release pairs; the press carries the scroll.
                    if !up {
                        browser.send_mouse_wheel(xi, yi, 0, delta_y, event_flags(input));
                    }
                    return;
                }

                if let Some(button) = self.click_button(*button, xi, yi) {
                    browser.send_mouse_click(xi, yi, button, up, 1, event_flags(input));
                }
            }

            _ => {}
        }
    }

    fn wheel_delta(&self, button: MouseButton) -> Option<i32> {
        match button {
            MouseButton::WheelUp => Some(-self.scroll_delta),
            MouseButton::WheelDown => Some(self.scroll_delta),
            _ => None,
        }
    }

    /// Browser button for a click at `(x, y)`, or `None` when the click is
    /// outside the view or the button has no browser equivalent.
    fn click_button(&self, button: MouseButton, x: i32, y: i32) -> Option<MouseButtonType> {
        if !self.bounds.contains(Vec2::new(x as f32, y as f32)) {
            return None;
        }

        let found = CLICK_BUTTONS.iter().find(|(b, _)| *b == button).map(|(_, t)| *t);
        if found.is_none() {
            log::warn!("button not recognized: {button}");
        }
        found
    }
}

/// Window buttons that have a browser click equivalent.
const CLICK_BUTTONS: [(MouseButton, MouseButtonType); 3] = [
    (MouseButton::Left, MouseButtonType::Left),
    (MouseButton::Middle, MouseButtonType::Middle),
    (MouseButton::Right, MouseButtonType::Right),
];

fn floor_pos(x: f32, y: f32) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}

/// Current modifier and held-button state as browser event flags.
pub fn event_flags(input: &InputState) -> EventFlags {
    let m = input.modifiers;
    let mut flags = EventFlags::empty();

    flags.set(EventFlags::SHIFT_DOWN, m.shift);
    flags.set(EventFlags::CONTROL_DOWN, m.ctrl);
    flags.set(EventFlags::ALT_DOWN, m.alt);
    flags.set(EventFlags::CAPS_LOCK_ON, m.caps_lock);
    flags.set(EventFlags::COMMAND_DOWN, cfg!(target_os = "macos") && m.meta);

    for (button, browser_button) in CLICK_BUTTONS {
        flags.set(browser_button.held_flag(), input.button_down(button));
    }

    flags
}
