//! Application configuration.

use std::path::Path;

use framewright_core::snap::clamp_grid;
use framewright_core::{ConfigError, WorkspaceConfig};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Window background as RGBA bytes.
    pub background: [u8; 4],
    /// Width of the floating panels on each side of the workspace.
    pub panel_width: f64,
    pub workspace: WorkspaceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Framewright".to_string(),
            width: 1280,
            height: 800,
            background: [230, 230, 230, 255],
            panel_width: 240.0,
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.workspace.grid_size = clamp_grid(config.workspace.grid_size);
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba8(r, g, b, a)
    }
}
