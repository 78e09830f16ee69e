//! Painter that records draw calls, for inspecting frames without a GPU.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Color;

use crate::renderer::Painter;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        width: f64,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Bounding box of the drawn geometry. Text reports a zero-size rect at its origin.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => {
                path.bounding_box()
            }
            DrawCommand::Text { origin, .. } => Rect::from_origin_size(*origin, (0.0, 0.0)),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Fill { color, .. }
            | DrawCommand::Stroke { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Painter for RecordingBackend {
    fn reset(&mut self) {
        self.commands.clear();
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }
}
