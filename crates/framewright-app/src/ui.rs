//! UI components using egui.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, RichText, Stroke, Ui, Vec2};
use framewright_core::{
    EditCommand, KeyBinding, PropertyEdit, PropertySheet, TreeRow, WidgetId, WidgetKind,
    WorkspaceConfig,
};
use kurbo::{Point, Size};

const MARGIN: f32 = 12.0;
const INDENT: f32 = 12.0;

/// One row of the layers list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub row: TreeRow,
    pub visible: bool,
    pub locked: bool,
}

/// Read-only view of the editor handed to [`render_ui`] each frame.
#[derive(Debug, Clone)]
pub struct UiModel<'a> {
    pub layers: &'a [LayerRow],
    pub sheet: Option<&'a PropertySheet>,
    pub bindings: &'a [KeyBinding],
    pub config: &'a WorkspaceConfig,
    pub panel_width: f32,
    pub can_undo: bool,
    pub can_redo: bool,
    pub has_clipboard: bool,
    /// Widget being previewed, if any.
    pub preview: Option<&'a PropertySheet>,
}

/// Actions that can be triggered by UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Create a widget from the palette.
    Create(WidgetKind),
    Select(WidgetId),
    Hover(WidgetId),
    ToggleExpanded(WidgetId),
    SetVisible(WidgetId, bool),
    SetLocked(WidgetId, bool),
    /// Change an attribute of the selected widget.
    Edit(PropertyEdit),
    SetDrawGrid(bool),
    SetSnapToGrid(bool),
    SetGridSize(f64),
    Command(EditCommand),
    ClosePreview,
}

/// UI state that persists between frames.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub shortcuts_open: bool,
    /// Widget the input buffers below were filled from.
    input_target: Option<WidgetId>,
    name_input: String,
    caption_input: String,
    position_input: [f64; 2],
    size_input: [f64; 2],
}

impl UiState {
    /// Refill the property inputs from `sheet` unless the user is editing them.
    pub fn sync_inputs(&mut self, sheet: Option<&PropertySheet>, editing: bool) {
        let target = sheet.map(|s| s.widget);
        if editing && target == self.input_target {
            return;
        }
        self.input_target = target;
        match sheet {
            Some(sheet) => {
                self.name_input = sheet.name.clone();
                self.caption_input = sheet.caption.clone();
                self.position_input = [sheet.position.x, sheet.position.y];
                self.size_input = [sheet.size.width, sheet.size.height];
            }
            None => {
                self.name_input.clear();
                self.caption_input.clear();
                self.position_input = [0.0; 2];
                self.size_input = [0.0; 2];
            }
        }
    }
}

fn panel_frame() -> Frame {
    Frame::new()
        .fill(Color32::from_rgba_unmultiplied(250, 250, 252, 250))
        .corner_radius(CornerRadius::same(8))
        .stroke(Stroke::new(1.0, Color32::from_gray(220)))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::same(12))
}

fn title(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(14.0).strong().color(Color32::from_gray(60)));
}

fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(11.0).color(Color32::from_gray(100)));
}

/// Render all panels and return the actions triggered this frame.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, model: &UiModel) -> Vec<UiAction> {
    let editing = ctx.memory(|m| m.focused().is_some()) || ctx.dragged_id().is_some();
    ui_state.sync_inputs(model.sheet, editing);

    let mut actions = Vec::new();
    render_left_panel(ctx, model, &mut actions);
    render_right_panel(ctx, ui_state, model, &mut actions);
    render_shortcuts(ctx, ui_state, model);
    render_preview(ctx, model, &mut actions);
    actions
}

/// Palette and layers list.
fn render_left_panel(ctx: &Context, model: &UiModel, actions: &mut Vec<UiAction>) {
    egui::Area::new(egui::Id::new("left_panel"))
        .anchor(Align2::LEFT_TOP, Vec2::new(MARGIN, MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(model.panel_width - 2.0 * MARGIN - 24.0);
                ui.vertical(|ui| {
                    title(ui, "Widgets");
                    ui.horizontal_wrapped(|ui| {
                        for kind in WidgetKind::PALETTE {
                            if ui.button(kind.type_name()).clicked() {
                                actions.push(UiAction::Create(kind));
                            }
                        }
                    });

                    ui.add_space(8.0);
                    title(ui, "Layers");
                    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                        if model.layers.is_empty() {
                            section_label(ui, "Empty workspace");
                        }
                        for layer in model.layers {
                            render_layer_row(ui, layer, actions);
                        }
                    });
                });
            });
        });
}

fn render_layer_row(ui: &mut Ui, layer: &LayerRow, actions: &mut Vec<UiAction>) {
    let row = &layer.row;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
        ui.add_space(row.depth as f32 * INDENT);
        if row.has_children {
            let arrow = if row.expanded { "\u{25be}" } else { "\u{25b8}" };
            if ui.small_button(arrow).clicked() {
                actions.push(UiAction::ToggleExpanded(row.widget));
            }
        } else {
            ui.add_space(18.0);
        }

        let eye = if layer.visible { "\u{1f441}" } else { "-" };
        if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
            actions.push(UiAction::SetVisible(row.widget, !layer.visible));
        }
        let lock = if layer.locked { "\u{1f512}" } else { "\u{1f513}" };
        if ui.small_button(lock).on_hover_text("Toggle lock").clicked() {
            actions.push(UiAction::SetLocked(row.widget, !layer.locked));
        }

        let mut text = RichText::new(&row.label);
        if !layer.visible {
            text = text.color(Color32::from_gray(150));
        }
        let response = ui.selectable_label(row.selected, text);
        if response.clicked() {
            actions.push(UiAction::Select(row.widget));
        } else if response.hovered() && !row.hovered {
            actions.push(UiAction::Hover(row.widget));
        }
    });
}

/// Properties of the selection, grid options and edit commands.
fn render_right_panel(ctx: &Context, ui_state: &mut UiState, model: &UiModel, actions: &mut Vec<UiAction>) {
    egui::Area::new(egui::Id::new("right_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-MARGIN, MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(model.panel_width - 2.0 * MARGIN - 24.0);
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 6.0);
                    title(ui, "Properties");
                    match model.sheet {
                        Some(sheet) => render_properties(ui, ui_state, sheet, actions),
                        None => section_label(ui, "Nothing selected"),
                    }

                    ui.add_space(8.0);
                    title(ui, "Grid");
                    render_grid_options(ui, model.config, actions);

                    ui.add_space(8.0);
                    title(ui, "Edit");
                    render_commands(ui, ui_state, model, actions);
                });
            });
        });
}

fn render_properties(
    ui: &mut Ui,
    ui_state: &mut UiState,
    sheet: &PropertySheet,
    actions: &mut Vec<UiAction>,
) {
    section_label(ui, &format!("Type: {}", sheet.kind.type_name()));

    section_label(ui, "Name");
    let response = ui.text_edit_singleline(&mut ui_state.name_input);
    if response.lost_focus() && ui_state.name_input != sheet.name {
        actions.push(UiAction::Edit(PropertyEdit::Name(ui_state.name_input.clone())));
    }

    section_label(ui, "Caption");
    let response = ui.text_edit_singleline(&mut ui_state.caption_input);
    if response.lost_focus() && ui_state.caption_input != sheet.caption {
        actions.push(UiAction::Edit(PropertyEdit::Caption(ui_state.caption_input.clone())));
    }

    section_label(ui, "Position");
    if drag_pair(ui, &mut ui_state.position_input, f64::NEG_INFINITY) {
        let [x, y] = ui_state.position_input;
        actions.push(UiAction::Edit(PropertyEdit::Position(Point::new(x, y))));
    }

    section_label(ui, "Size");
    if drag_pair(ui, &mut ui_state.size_input, 0.0) {
        let [w, h] = ui_state.size_input;
        actions.push(UiAction::Edit(PropertyEdit::Size(Size::new(w, h))));
    }

    ui.horizontal(|ui| {
        let mut visible = sheet.visible;
        if ui.checkbox(&mut visible, "Visible").changed() {
            actions.push(UiAction::Edit(PropertyEdit::Visible(visible)));
        }
        let mut locked = sheet.locked;
        if ui.checkbox(&mut locked, "Locked").changed() {
            actions.push(UiAction::Edit(PropertyEdit::Locked(locked)));
        }
    });
}

/// Two drag values side by side. True once an edit is committed.
fn drag_pair(ui: &mut Ui, values: &mut [f64; 2], min: f64) -> bool {
    let mut commit = false;
    ui.horizontal(|ui| {
        for value in values.iter_mut() {
            let response = ui.add(
                egui::DragValue::new(value)
                    .speed(1.0)
                    .range(min..=f64::INFINITY),
            );
            if response.drag_stopped() || (response.changed() && !response.dragged()) {
                commit = true;
            }
        }
    });
    commit
}

fn render_grid_options(ui: &mut Ui, config: &WorkspaceConfig, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        let mut draw = config.draw_grid;
        if ui.checkbox(&mut draw, "Show").changed() {
            actions.push(UiAction::SetDrawGrid(draw));
        }
        let mut snap = config.snap_to_grid;
        if ui.checkbox(&mut snap, "Snap").changed() {
            actions.push(UiAction::SetSnapToGrid(snap));
        }
    });
    let mut size = config.grid_size.width;
    let response = ui.add(
        egui::DragValue::new(&mut size)
            .prefix("cell ")
            .range(2.0..=100.0),
    );
    if response.changed() {
        actions.push(UiAction::SetGridSize(size));
    }
}

fn render_commands(ui: &mut Ui, ui_state: &mut UiState, model: &UiModel, actions: &mut Vec<UiAction>) {
    let has_selection = model.sheet.is_some();
    let buttons = [
        ("Undo", EditCommand::Undo, model.can_undo),
        ("Redo", EditCommand::Redo, model.can_redo),
        ("Cut", EditCommand::Cut, has_selection),
        ("Copy", EditCommand::Copy, has_selection),
        ("Paste", EditCommand::Paste, model.has_clipboard),
        ("Delete", EditCommand::Delete, has_selection),
        ("To front", EditCommand::BringToFront, has_selection),
        ("Reparent", EditCommand::SelectNewParent, has_selection),
        ("Preview", EditCommand::Preview, !model.layers.is_empty()),
        ("New", EditCommand::New, true),
    ];
    ui.horizontal_wrapped(|ui| {
        for (label, command, enabled) in buttons {
            if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                actions.push(UiAction::Command(command));
            }
        }
    });
    if ui.button("Shortcuts").clicked() {
        ui_state.shortcuts_open = !ui_state.shortcuts_open;
    }
}

fn render_shortcuts(ctx: &Context, ui_state: &mut UiState, model: &UiModel) {
    egui::Window::new("Keyboard Shortcuts")
        .open(&mut ui_state.shortcuts_open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts_grid").striped(true).show(ui, |ui| {
                for binding in model.bindings {
                    ui.label(RichText::new(binding.format()).monospace());
                    ui.label(binding.description);
                    ui.end_row();
                }
            });
        });
}

fn render_preview(ctx: &Context, model: &UiModel, actions: &mut Vec<UiAction>) {
    let Some(sheet) = model.preview else {
        return;
    };
    let mut open = true;
    egui::Window::new(format!("Preview: {}", sheet.name))
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::Grid::new("preview_grid").show(ui, |ui| {
                for (label, value) in sheet.rows() {
                    section_label(ui, label);
                    ui.label(value);
                    ui.end_row();
                }
            });
        });
    if !open {
        actions.push(UiAction::ClosePreview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framewright_core::{EditorWorkspace, Keymap};
    use kurbo::Rect;

    fn workspace_with_button() -> (EditorWorkspace, WidgetId) {
        let mut ws = EditorWorkspace::new(WorkspaceConfig::default(), Rect::new(0.0, 0.0, 400.0, 400.0));
        let id = ws
            .create_widget(WidgetKind::Button, None, Point::new(10.0, 10.0))
            .unwrap();
        (ws, id)
    }

    #[test]
    fn test_sync_inputs_follows_target() {
        let (ws, id) = workspace_with_button();
        let sheet = PropertySheet::read(&ws, id).unwrap();
        let mut state = UiState::default();

        state.sync_inputs(Some(&sheet), false);
        assert_eq!(state.name_input, "button_0");
        assert_eq!(state.position_input, [10.0, 10.0]);

        state.name_input = "typing".into();
        state.sync_inputs(Some(&sheet), true);
        assert_eq!(state.name_input, "typing");

        state.sync_inputs(None, true);
        assert!(state.name_input.is_empty());
    }

    #[test]
    fn test_idle_frame_has_no_actions() {
        let (ws, id) = workspace_with_button();
        let sheet = PropertySheet::read(&ws, id).unwrap();
        let keymap = Keymap::default();
        let model = UiModel {
            layers: &[],
            sheet: Some(&sheet),
            bindings: keymap.bindings(),
            config: ws.config(),
            panel_width: 240.0,
            can_undo: ws.can_undo(),
            can_redo: false,
            has_clipboard: false,
            preview: None,
        };
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = render_ui(ctx, &mut state, &model);
        });
        assert!(actions.is_empty());
        assert_eq!(state.caption_input, "button_0");
    }
}
