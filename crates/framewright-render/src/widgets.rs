//! Drawing of the edited widgets themselves.

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape, Vec2};
use peniko::Color;
use framewright_core::{EditorWorkspace, Widget, WidgetId, WidgetKind};

use crate::renderer::{Painter, PATH_TOLERANCE};

const FONT_SIZE: f32 = 14.0;
const TITLE_HEIGHT: f64 = 24.0;
const TEXT_INSET: f64 = 6.0;
const SCROLLBAR_WIDTH: f64 = 8.0;

const BORDER: Color = Color::from_rgba8(90, 90, 90, 255);
const TEXT: Color = Color::from_rgba8(30, 30, 30, 255);
const WINDOW_BODY: Color = Color::from_rgba8(245, 245, 245, 255);
const TITLE_BAR: Color = Color::from_rgba8(70, 110, 170, 255);
const TITLE_TEXT: Color = Color::from_rgba8(255, 255, 255, 255);
const PANEL: Color = Color::from_rgba8(225, 225, 225, 255);
const BUTTON: Color = Color::from_rgba8(210, 215, 225, 255);
const FIELD: Color = Color::from_rgba8(255, 255, 255, 255);
const SCROLLBAR: Color = Color::from_rgba8(190, 190, 190, 255);

/// Draw every visible widget of the workspace, parents below children.
pub fn draw_widgets(p: &mut impl Painter, workspace: &EditorWorkspace) {
    let origin = workspace.bounds().origin().to_vec2();
    for &child in workspace.children() {
        draw_subtree(p, workspace, child, origin);
    }
}

fn draw_subtree(p: &mut impl Painter, workspace: &EditorWorkspace, id: WidgetId, offset: Vec2) {
    let Some(widget) = workspace.tree().get(id) else {
        return;
    };
    if !widget.visible {
        return;
    }
    let rect = widget.rect() + offset;
    draw_widget(p, widget, rect);

    let child_offset = rect.origin().to_vec2();
    for &child in workspace.tree().children(id) {
        draw_subtree(p, workspace, child, child_offset);
    }
}

fn text_origin(rect: Rect) -> Point {
    Point::new(rect.x0 + TEXT_INSET, rect.y0 + (rect.height() - FONT_SIZE as f64) / 2.0)
}

fn draw_caption(p: &mut impl Painter, widget: &Widget, rect: Rect, color: Color) {
    if !widget.caption.is_empty() {
        p.draw_text(&widget.caption, text_origin(rect), FONT_SIZE, color);
    }
}

/// Draw one widget into `rect` (pointer space).
pub fn draw_widget(p: &mut impl Painter, widget: &Widget, rect: Rect) {
    match widget.kind {
        WidgetKind::Workspace => {}
        WidgetKind::Window => {
            p.fill_rect(rect, WINDOW_BODY);
            let title = Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + TITLE_HEIGHT.min(rect.height()));
            p.fill_rect(title, TITLE_BAR);
            p.stroke_rect(rect, 1.0, BORDER);
            draw_caption(p, widget, title, TITLE_TEXT);
        }
        WidgetKind::Panel => {
            p.fill_rect(rect, PANEL);
            p.stroke_rect(rect, 1.0, BORDER);
        }
        WidgetKind::ScrollPanel | WidgetKind::ListBox | WidgetKind::TreeView => {
            p.fill_rect(rect, if widget.kind == WidgetKind::ScrollPanel { PANEL } else { FIELD });
            let bar = Rect::new(rect.x1 - SCROLLBAR_WIDTH, rect.y0, rect.x1, rect.y1);
            p.fill_rect(bar, SCROLLBAR);
            p.stroke_rect(rect, 1.0, BORDER);
            if widget.kind != WidgetKind::ScrollPanel {
                let first_row = Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + TITLE_HEIGHT);
                draw_caption(p, widget, first_row, TEXT);
            }
        }
        WidgetKind::Button => {
            let shape = RoundedRect::from_rect(rect, 4.0).to_path(PATH_TOLERANCE);
            p.fill_path(&shape, BUTTON);
            p.stroke_path(&shape, 1.0, BORDER);
            draw_caption(p, widget, rect, TEXT);
        }
        WidgetKind::Label => draw_caption(p, widget, rect, TEXT),
        WidgetKind::CheckBox => {
            let side = rect.height().min(16.0);
            let top = rect.y0 + (rect.height() - side) / 2.0;
            let check = Rect::new(rect.x0, top, rect.x0 + side, top + side);
            p.fill_rect(check, FIELD);
            p.stroke_rect(check, 1.0, BORDER);
            let text = Rect::new(check.x1, rect.y0, rect.x1, rect.y1);
            draw_caption(p, widget, text, TEXT);
        }
        WidgetKind::TextBox => {
            p.fill_rect(rect, FIELD);
            p.stroke_rect(rect, 1.0, BORDER);
            draw_caption(p, widget, rect, TEXT);
        }
        WidgetKind::Dropdown => {
            p.fill_rect(rect, FIELD);
            p.stroke_rect(rect, 1.0, BORDER);
            let mid = rect.center().y;
            let right = rect.x1 - TEXT_INSET;
            let mut arrow = BezPath::new();
            arrow.move_to((right - 8.0, mid - 2.0));
            arrow.line_to((right, mid - 2.0));
            arrow.line_to((right - 4.0, mid + 3.0));
            arrow.close_path();
            p.fill_path(&arrow, BORDER);
            draw_caption(p, widget, rect, TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingBackend;
    use framewright_core::WorkspaceConfig;
    use kurbo::Size;

    #[test]
    fn test_hidden_subtree_is_skipped() {
        let mut ws = EditorWorkspace::new(WorkspaceConfig::default(), Rect::new(0.0, 0.0, 300.0, 300.0));
        let window = ws
            .create_widget(WidgetKind::Window, None, Point::new(10.0, 10.0))
            .unwrap();
        ws.create_widget(WidgetKind::Button, Some(window), Point::new(10.0, 30.0))
            .unwrap();

        let mut rec = RecordingBackend::new();
        draw_widgets(&mut rec, &ws);
        assert_eq!(rec.texts().collect::<Vec<_>>(), vec!["window_0", "button_0"]);

        ws.set_visible(window, false).unwrap();
        let mut rec = RecordingBackend::new();
        draw_widgets(&mut rec, &ws);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_children_are_offset_by_parent() {
        let mut ws = EditorWorkspace::new(WorkspaceConfig::default(), Rect::new(5.0, 5.0, 300.0, 300.0));
        let panel = ws
            .create_widget(WidgetKind::Panel, None, Point::new(10.0, 10.0))
            .unwrap();
        let inner = ws
            .create_widget(WidgetKind::Panel, Some(panel), Point::new(20.0, 20.0))
            .unwrap();
        ws.set_size(inner, Size::new(10.0, 10.0)).unwrap();

        let mut rec = RecordingBackend::new();
        draw_widgets(&mut rec, &ws);
        let inner_fill = rec.fills().nth(1).unwrap();
        assert_eq!(inner_fill.bounds(), Rect::new(35.0, 35.0, 45.0, 45.0));
    }
}
