//! Input events consumed by the layout workspace.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl, or Cmd on macOS keyboards.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event. Positions are in the workspace's parent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        delta: Vec2,
        modifiers: Modifiers,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    /// A letter or digit, stored uppercase.
    Char(char),
}

impl Key {
    /// Build a character key, normalizing letters to uppercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }

    pub fn label(&self) -> String {
        match self {
            Key::Delete => "Delete".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn release(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            action: KeyAction::Release,
            modifiers,
        }
    }
}

/// Tracks pointer and modifier state between platform callbacks and turns
/// raw positions into [`PointerEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Record a pointer move and return the motion event with its delta.
    pub fn pointer_moved(&mut self, position: Point) -> PointerEvent {
        let delta = position - self.pointer_position;
        self.pointer_position = position;
        PointerEvent::Move {
            position,
            delta,
            modifiers: self.modifiers,
        }
    }

    /// Record a button change at the current pointer position.
    pub fn button(&mut self, button: MouseButton, pressed: bool) -> PointerEvent {
        let position = self.pointer_position;
        let modifiers = self.modifiers;
        if pressed {
            self.pressed_buttons.insert(button);
            PointerEvent::Down {
                position,
                button,
                modifiers,
            }
        } else {
            self.pressed_buttons.remove(&button);
            PointerEvent::Up {
                position,
                button,
                modifiers,
            }
        }
    }

    pub fn scroll(&self, delta: Vec2) -> PointerEvent {
        PointerEvent::Scroll {
            position: self.pointer_position,
            delta,
        }
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }
}
