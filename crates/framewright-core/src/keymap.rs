//! Keyboard bindings for editor commands.

use crate::input::{Key, KeyEvent, Modifiers};

/// Commands triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    Delete,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    BringToFront,
    Preview,
    /// Enter reparent mode for the current selection.
    SelectNewParent,
    /// Drop every widget from the workspace.
    New,
}

/// A key combination bound to a command.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub command: EditCommand,
    pub description: &'static str,
}

impl KeyBinding {
    pub const fn new(
        key: Key,
        ctrl: bool,
        shift: bool,
        command: EditCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the binding for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.label());
        parts.join("+")
    }

    fn matches(&self, key: Key, modifiers: &Modifiers) -> bool {
        self.key == key && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }
}

/// Fixed table of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: vec![
                KeyBinding::new(Key::Delete, false, false, EditCommand::Delete, "Delete selected widget"),
                KeyBinding::new(Key::Backspace, false, false, EditCommand::Delete, "Delete selected widget"),
                KeyBinding::new(Key::char('x'), true, false, EditCommand::Cut, "Cut selected widget"),
                KeyBinding::new(Key::char('c'), true, false, EditCommand::Copy, "Copy selected widget"),
                KeyBinding::new(Key::char('v'), true, false, EditCommand::Paste, "Paste widget"),
                KeyBinding::new(Key::char('z'), true, false, EditCommand::Undo, "Undo"),
                KeyBinding::new(Key::char('z'), true, true, EditCommand::Redo, "Redo"),
                KeyBinding::new(Key::char('y'), true, false, EditCommand::Redo, "Redo"),
                KeyBinding::new(Key::char('b'), true, false, EditCommand::BringToFront, "Bring selected widget to front"),
                KeyBinding::new(Key::char('r'), true, false, EditCommand::Preview, "Preview"),
                KeyBinding::new(Key::char('p'), true, false, EditCommand::SelectNewParent, "Pick a new parent"),
                KeyBinding::new(Key::char('n'), true, false, EditCommand::New, "Clear workspace"),
            ],
        }
    }
}

impl Keymap {
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Command bound to a key event, regardless of its action.
    pub fn lookup(&self, event: &KeyEvent) -> Option<EditCommand> {
        self.bindings
            .iter()
            .find(|b| b.matches(event.key, &event.modifiers))
            .map(|b| b.command)
    }

    /// Log every binding at info level.
    pub fn log_all(&self) {
        for binding in &self.bindings {
            log::info!("{:16} {}", binding.format(), binding.description);
        }
    }
}
