//! Editing overlay: workspace frame and grid, hover and selection
//! highlights, resize handles.

use kurbo::{BezPath, Circle, Rect};
use peniko::Color;
use framewright_core::{EditMode, EditorWorkspace, WidgetId};

use crate::renderer::{Painter, RenderContext};

/// Grid lines per accent line.
const ACCENT_EVERY: usize = 5;

/// Outline the workspace and draw its grid.
pub fn draw_workspace_background(p: &mut impl Painter, ctx: &RenderContext) {
    let ws = ctx.workspace;
    let bounds = ws.bounds();
    p.stroke_rect(bounds, 1.0, ctx.style.outline);

    if !ws.config().draw_grid {
        return;
    }
    let grid = ws.config().grid_size;
    let mut lines = BezPath::new();
    let mut accents = BezPath::new();

    let mut row = 0;
    let mut y = grid.height;
    while y < bounds.height() {
        row += 1;
        let path = if row % ACCENT_EVERY == 0 { &mut accents } else { &mut lines };
        path.move_to((bounds.x0, bounds.y0 + y));
        path.line_to((bounds.x1, bounds.y0 + y));
        y += grid.height;
    }

    let mut col = 0;
    let mut x = grid.width;
    while x < bounds.width() {
        col += 1;
        let path = if col % ACCENT_EVERY == 0 { &mut accents } else { &mut lines };
        path.move_to((bounds.x0 + x, bounds.y0));
        path.line_to((bounds.x0 + x, bounds.y1));
        x += grid.width;
    }

    p.stroke_path(&lines, 1.0, ctx.style.grid_line);
    p.stroke_path(&accents, 1.0, ctx.style.grid_accent);
}

fn lock_color(ctx: &RenderContext, id: WidgetId) -> Color {
    if ctx.workspace.is_locked(id) {
        ctx.style.locked_highlight
    } else {
        ctx.style.highlight
    }
}

/// Alpha of the reparent pulse, alternating twice per second cycle.
pub fn pulse_alpha(time: f64, (low, high): (u8, u8)) -> u8 {
    if time.rem_euclid(1.0) > 0.5 { low } else { high }
}

/// Hover rectangle and selection highlight.
pub fn draw_highlights(p: &mut impl Painter, ctx: &RenderContext) {
    let ws: &EditorWorkspace = ctx.workspace;
    let selected = ws.selected();

    if let Some(hovered) = ws.hovered().filter(|&h| Some(h) != selected) {
        if let Ok(rect) = ws.pointer_rect(hovered) {
            p.stroke_rect(rect, ctx.style.highlight_width, lock_color(ctx, hovered));
        }
    }

    let Some(selected) = selected else { return };
    let Ok(rect) = ws.pointer_rect(selected) else {
        return;
    };
    match ws.mode() {
        EditMode::Select => {
            p.stroke_rect(rect, ctx.style.highlight_width, lock_color(ctx, selected));
        }
        EditMode::SelectNewParent => {
            let alpha = pulse_alpha(ctx.time, ctx.style.reparent_alpha);
            let color = ctx.style.reparent_fill.with_alpha(alpha as f32 / 255.0);
            p.fill_rect(rect, color);
        }
        EditMode::Move | EditMode::Resize(_) => p.fill_rect(rect, ctx.style.drag_fill),
    }
}

/// The eight resize handles around the selection.
pub fn draw_handles(p: &mut impl Painter, ctx: &RenderContext) {
    let ws = ctx.workspace;
    let Some(area) = ws.edit_area() else { return };
    let Some(selected) = ws.selected() else { return };

    let mode = if ws.mode().is_dragging() {
        ws.mode()
    } else {
        ws.hover_mode()
    };
    let dimmed = ws.mode() == EditMode::Move || ws.is_locked(selected);

    for handle in &area.handles {
        let color = if dimmed {
            ctx.style.handle_dimmed
        } else if handle.is_highlighted(mode.resize_direction()) {
            ctx.style.handle_active
        } else {
            ctx.style.handle
        };
        let circle = Circle::new(handle.center, handle_radius(handle.rect));
        p.fill_circle(circle, color);
        p.stroke_circle(circle, 1.0, ctx.style.handle_outline);
    }
}

fn handle_radius(rect: Rect) -> f64 {
    rect.width() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingBackend};
    use crate::renderer::{OverlayStyle, Renderer};
    use framewright_core::{
        MouseButton, Modifiers, PointerEvent, Widget, WidgetKind, WorkspaceConfig,
    };
    use kurbo::{Point, Size};

    fn workspace(draw_grid: bool) -> (EditorWorkspace, WidgetId) {
        let config = WorkspaceConfig {
            draw_grid,
            ..WorkspaceConfig::default()
        };
        let mut ws = EditorWorkspace::new(config, Rect::new(0.0, 0.0, 100.0, 100.0));
        let root = ws.workspace_id();
        let panel = ws
            .add_widget(
                root,
                Widget::new(WidgetKind::Panel)
                    .with_position(Point::new(20.0, 20.0))
                    .with_size(Size::new(40.0, 40.0)),
            )
            .unwrap();
        (ws, panel)
    }

    fn size(ws: &EditorWorkspace) -> Size {
        ws.bounds().size()
    }

    #[test]
    fn test_grid_has_accent_every_fifth_line() {
        let (ws, _) = workspace(true);
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_workspace_background(&mut rec, &ctx);

        let style = OverlayStyle::default();
        let count_lines = |color: Color| {
            rec.strokes()
                .filter(|c| c.color() == color)
                .map(|c| match c {
                    DrawCommand::Stroke { path, .. } => path
                        .elements()
                        .iter()
                        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
                        .count(),
                    _ => 0,
                })
                .sum::<usize>()
        };
        // 9 interior lines per axis at a 10px grid, 10th position excluded.
        assert_eq!(count_lines(style.grid_accent), 2);
        assert_eq!(count_lines(style.grid_line), 16);
    }

    #[test]
    fn test_no_grid_when_disabled() {
        let (ws, _) = workspace(false);
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_workspace_background(&mut rec, &ctx);
        assert_eq!(rec.commands().len(), 1);
    }

    #[test]
    fn test_selection_outline_and_handles() {
        let (mut ws, panel) = workspace(false);
        ws.set_selected(Some(panel));
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_highlights(&mut rec, &ctx);
        draw_handles(&mut rec, &ctx);

        let style = OverlayStyle::default();
        let outline = rec.strokes().next().unwrap();
        assert_eq!(outline.color(), style.highlight);
        assert_eq!(outline.bounds(), Rect::new(20.0, 20.0, 60.0, 60.0));

        let handles: Vec<_> = rec.fills().collect();
        assert_eq!(handles.len(), 8);
        assert!(handles.iter().all(|h| h.color() == style.handle));
        let bottom_right = handles[3].bounds();
        assert!((bottom_right.center().x - 60.0).abs() < 1e-3);
        assert!((bottom_right.width() - 6.0).abs() < 0.1);
    }

    #[test]
    fn test_hovered_handle_lights_adjacent_corners() {
        let (mut ws, panel) = workspace(false);
        ws.set_selected(Some(panel));
        ws.handle_pointer(PointerEvent::Move {
            position: Point::new(40.0, 20.0),
            delta: kurbo::Vec2::ZERO,
            modifiers: Modifiers::NONE,
        });
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_handles(&mut rec, &ctx);

        let style = OverlayStyle::default();
        let lit: Vec<usize> = rec
            .fills()
            .enumerate()
            .filter(|(_, c)| c.color() == style.handle_active)
            .map(|(i, _)| i)
            .collect();
        // top-left, top-right and top itself
        assert_eq!(lit, vec![0, 1, 4]);
    }

    #[test]
    fn test_locked_selection_dims_handles() {
        let (mut ws, panel) = workspace(false);
        ws.set_selected(Some(panel));
        ws.set_locked(panel, true);
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_highlights(&mut rec, &ctx);
        draw_handles(&mut rec, &ctx);

        let style = OverlayStyle::default();
        assert_eq!(rec.strokes().next().unwrap().color(), style.locked_highlight);
        assert!(rec.fills().all(|c| c.color() == style.handle_dimmed));
    }

    #[test]
    fn test_drag_fills_selection() {
        let (mut ws, panel) = workspace(false);
        ws.set_selected(Some(panel));
        ws.handle_pointer(PointerEvent::Down {
            position: Point::new(40.0, 40.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
        assert_eq!(ws.mode(), EditMode::Move);
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_highlights(&mut rec, &ctx);
        let fill = rec.fills().next().unwrap();
        assert_eq!(fill.color(), OverlayStyle::default().drag_fill);
        assert_eq!(fill.bounds(), Rect::new(20.0, 20.0, 60.0, 60.0));
    }

    #[test]
    fn test_pulse_alpha() {
        assert_eq!(pulse_alpha(0.2, (32, 64)), 64);
        assert_eq!(pulse_alpha(3.7, (32, 64)), 32);
    }

    #[test]
    fn test_hover_highlight_skips_selection() {
        let (mut ws, panel) = workspace(false);
        ws.set_selected(Some(panel));
        ws.set_hovered(Some(panel));
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        draw_highlights(&mut rec, &ctx);
        assert_eq!(rec.strokes().count(), 1);
    }

    #[test]
    fn test_build_scene_resets_previous_frame() {
        let (ws, _) = workspace(true);
        let ctx = RenderContext::new(&ws, size(&ws));
        let mut rec = RecordingBackend::new();
        rec.build_scene(&ctx);
        let first = rec.commands().len();
        rec.build_scene(&ctx);
        assert_eq!(rec.commands().len(), first);
        assert!(rec.commands()[0].bounds().contains(Point::new(50.0, 50.0)));
    }
}
