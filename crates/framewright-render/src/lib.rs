//! Framewright Render Library
//!
//! Draws an [`EditorWorkspace`](framewright_core::EditorWorkspace): the edited
//! widgets plus the grid, highlights and resize handles on top.
//! The default backend uses Vello for GPU-accelerated rendering; the
//! recording backend captures draw commands for tests and tooling.

mod renderer;
pub mod overlay;
pub mod recording;
pub mod widgets;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recording::{DrawCommand, RecordingBackend};
pub use renderer::{
    OverlayStyle, Painter, RenderContext, RenderResult, Renderer, RendererError, PATH_TOLERANCE,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloBackend;
