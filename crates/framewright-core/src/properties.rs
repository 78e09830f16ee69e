//! Editable attributes of the selected widget.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};

use crate::error::TreeResult;
use crate::widget::{WidgetId, WidgetKind};
use crate::workspace::EditorWorkspace;

/// Snapshot of a widget's editable attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySheet {
    pub widget: WidgetId,
    pub name: String,
    pub kind: WidgetKind,
    pub caption: String,
    pub position: Point,
    pub size: Size,
    pub visible: bool,
    pub locked: bool,
}

impl PropertySheet {
    pub fn read(workspace: &EditorWorkspace, id: WidgetId) -> Option<Self> {
        let widget = workspace.tree().get(id)?;
        Some(Self {
            widget: id,
            name: widget.name.clone(),
            kind: widget.kind,
            caption: widget.caption.clone(),
            position: widget.position,
            size: widget.size,
            visible: widget.visible,
            locked: workspace.is_locked(id),
        })
    }

    /// Label/value pairs for display.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("type", self.kind.type_name().to_string()),
            ("caption", self.caption.clone()),
            ("position", format!("{}, {}", self.position.x, self.position.y)),
            ("size", format!("{} x {}", self.size.width, self.size.height)),
            ("visible", self.visible.to_string()),
            ("locked", self.locked.to_string()),
        ]
    }
}

/// A change to one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Name(String),
    Caption(String),
    Position(Point),
    Size(Size),
    Visible(bool),
    Locked(bool),
}

impl PropertyEdit {
    pub fn apply(self, workspace: &mut EditorWorkspace, id: WidgetId) -> TreeResult<()> {
        match self {
            PropertyEdit::Name(name) => workspace.rename(id, &name).map(|_| ()),
            PropertyEdit::Caption(caption) => workspace.set_caption(id, caption),
            PropertyEdit::Position(position) => workspace.set_position(id, position),
            PropertyEdit::Size(size) => workspace.set_size(
                id,
                Size::new(size.width.max(0.0), size.height.max(0.0)),
            ),
            PropertyEdit::Visible(visible) => workspace.set_visible(id, visible),
            PropertyEdit::Locked(locked) => {
                workspace.tree().widget(id)?;
                workspace.set_locked(id, locked);
                Ok(())
            }
        }
    }
}

/// Follows the workspace selection.
#[derive(Debug, Clone, Default)]
pub struct PropertiesPanel {
    target: Option<WidgetId>,
}

impl PropertiesPanel {
    pub fn attach(workspace: &mut EditorWorkspace) -> Rc<RefCell<Self>> {
        let panel = Rc::new(RefCell::new(Self {
            target: workspace.selected(),
        }));
        let sink = Rc::clone(&panel);
        workspace.on_selection_changed(move |id| sink.borrow_mut().target = id);
        panel
    }

    pub fn target(&self) -> Option<WidgetId> {
        self.target
    }

    pub fn sheet(&self, workspace: &EditorWorkspace) -> Option<PropertySheet> {
        PropertySheet::read(workspace, self.target?)
    }

    /// Apply an edit to the current target. Without a target this does nothing.
    pub fn apply(&self, workspace: &mut EditorWorkspace, edit: PropertyEdit) -> TreeResult<()> {
        match self.target {
            Some(id) => edit.apply(workspace, id),
            None => Ok(()),
        }
    }
}
