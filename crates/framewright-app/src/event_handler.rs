//! Translation of winit input into workspace events.

use framewright_core::{Key, KeyAction, KeyEvent, Modifiers, MouseButton};
use kurbo::Vec2;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

/// Pixels per scroll line when the platform reports pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

pub fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Scroll delta in lines, positive y meaning wheel up.
pub fn scroll_delta(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(x as f64, y as f64),
        MouseScrollDelta::PixelDelta(pos) => {
            Vec2::new(pos.x / PIXELS_PER_LINE, pos.y / PIXELS_PER_LINE)
        }
    }
}

/// Build a key event for the keys the workspace understands.
pub fn key_event(
    key: &WinitKey,
    state: ElementState,
    repeat: bool,
    modifiers: Modifiers,
) -> Option<KeyEvent> {
    let key = match key {
        WinitKey::Named(NamedKey::Delete) => Key::Delete,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Character(text) => Key::char(text.chars().next()?),
        _ => return None,
    };
    let action = match (state, repeat) {
        (ElementState::Released, _) => KeyAction::Release,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Pressed, false) => KeyAction::Press,
    };
    Some(KeyEvent {
        key,
        action,
        modifiers,
    })
}
