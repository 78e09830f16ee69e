//! Widget scene graph.

mod kind;
mod tree;

pub use kind::{Widget, WidgetKind};
pub use tree::{WidgetId, WidgetTree};
