//! Framewright Application
//!
//! The editor shell: windowing, input translation, the rendered workspace
//! and the egui side panels (palette, layers, properties).

mod app;
mod config;
pub mod demo;
mod event_handler;
mod ui;

pub use app::App;
pub use config::AppConfig;
pub use event_handler::{key_event, modifiers, mouse_button, scroll_delta};
pub use ui::{render_ui, LayerRow, UiAction, UiModel, UiState};
