//! Renderer trait abstraction.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Size};
use peniko::Color;
use framewright_core::EditorWorkspace;
use thiserror::Error;

use crate::{overlay, widgets};

/// Tolerance used when flattening shapes into paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and sizes of the editing overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub outline: Color,
    pub grid_line: Color,
    /// Every fifth grid line.
    pub grid_accent: Color,
    pub highlight: Color,
    pub locked_highlight: Color,
    pub highlight_width: f64,
    /// Fill of the selection while picking a new parent.
    pub reparent_fill: Color,
    pub reparent_alpha: (u8, u8),
    pub drag_fill: Color,
    pub handle: Color,
    pub handle_active: Color,
    pub handle_dimmed: Color,
    pub handle_outline: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            outline: Color::from_rgba8(0, 0, 0, 255),
            grid_line: Color::from_rgba8(0xB0, 0xB0, 0xB0, 0x20),
            grid_accent: Color::from_rgba8(0xE0, 0xE0, 0xE0, 0x20),
            highlight: Color::from_rgba8(100, 0, 0, 255),
            locked_highlight: Color::from_rgba8(0, 0, 64, 255),
            highlight_width: 2.0,
            reparent_fill: Color::from_rgba8(0, 0, 255, 255),
            reparent_alpha: (32, 64),
            drag_fill: Color::from_rgba8(255, 0, 0, 64),
            handle: Color::from_rgba8(180, 0, 0, 255),
            handle_active: Color::from_rgba8(180, 255, 0, 255),
            handle_dimmed: Color::from_rgba8(64, 64, 64, 64),
            handle_outline: Color::from_rgba8(0, 0, 0, 255),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The workspace to render.
    pub workspace: &'a EditorWorkspace,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    pub background_color: Color,
    /// Seconds since start, drives the reparent pulse.
    pub time: f64,
    pub style: OverlayStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(workspace: &'a EditorWorkspace, viewport_size: Size) -> Self {
        Self {
            workspace,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(230, 230, 230, 255),
            time: 0.0,
            style: OverlayStyle::default(),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }
}

/// Immediate-mode drawing primitives. Coordinates are logical pixels.
pub trait Painter {
    /// Drop everything drawn so far.
    fn reset(&mut self);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_path(&rect.to_path(PATH_TOLERANCE), color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.stroke_path(&rect.to_path(PATH_TOLERANCE), width, color);
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.fill_path(&circle.to_path(PATH_TOLERANCE), color);
    }

    fn stroke_circle(&mut self, circle: Circle, width: f64, color: Color) {
        self.stroke_path(&circle.to_path(PATH_TOLERANCE), width, color);
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

impl<P: Painter> Renderer for P {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.reset();
        overlay::draw_workspace_background(self, ctx);
        widgets::draw_widgets(self, ctx.workspace);
        overlay::draw_highlights(self, ctx);
        overlay::draw_handles(self, ctx);
    }
}
