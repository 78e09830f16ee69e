//! Workspace configuration.

use std::path::Path;

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::selection::HANDLE_HALF_SIZE;
use crate::snap::clamp_grid;

/// Editing options of a layout workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Grid cell size, at least 2x2.
    pub grid_size: Size,
    pub draw_grid: bool,
    pub snap_to_grid: bool,
    /// Half of a resize handle's side length.
    pub handle_half_size: f64,
    /// Maximum number of undo steps kept.
    pub undo_depth: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            grid_size: Size::new(10.0, 10.0),
            draw_grid: true,
            snap_to_grid: true,
            handle_half_size: HANDLE_HALF_SIZE,
            undo_depth: 64,
        }
    }
}

impl WorkspaceConfig {
    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.grid_size = clamp_grid(config.grid_size);
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_grid_size(mut self, grid_size: Size) -> Self {
        self.grid_size = clamp_grid(grid_size);
        self
    }
}
