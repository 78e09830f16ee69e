//! Framewright Core Library
//!
//! Widget scene graph and the layout editor state machine: selection, hover,
//! move, resize and reparent of widgets inside an editor workspace.

pub mod config;
pub mod error;
pub mod input;
pub mod keymap;
pub mod mode;
pub mod observer;
pub mod properties;
pub mod selection;
pub mod snap;
pub mod snapshot;
pub mod tree_view;
pub mod widget;
pub mod workspace;

pub use config::WorkspaceConfig;
pub use error::{ConfigError, TreeError, TreeResult};
pub use input::{InputState, Key, KeyAction, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use keymap::{EditCommand, KeyBinding, Keymap};
pub use mode::{EditMode, Edges, ResizeDirection};
pub use properties::{PropertiesPanel, PropertyEdit, PropertySheet};
pub use selection::{EditArea, Handle, HANDLE_HALF_SIZE};
pub use snap::snap_to_grid;
pub use tree_view::{TreeRow, TreeViewModel};
pub use widget::{Widget, WidgetId, WidgetKind, WidgetTree};
pub use workspace::EditorWorkspace;
