//! Error types for the widget tree and configuration.

use crate::widget::WidgetId;
use thiserror::Error;

/// Widget tree errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Widget {0:?} is not in the tree")]
    Stale(WidgetId),
    #[error("Cannot move {child:?} under its own descendant {parent:?}")]
    Cycle { child: WidgetId, parent: WidgetId },
    #[error("Widget {0:?} has no parent")]
    Orphan(WidgetId),
    #[error("Widget {0:?} is not inside the workspace")]
    Outside(WidgetId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
