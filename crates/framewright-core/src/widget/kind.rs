//! Widget kinds and per-node data.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// The kind of a widget - determines its default size and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Container for edited widgets.
    Workspace,
    Window,
    Panel,
    Button,
    Label,
    CheckBox,
    TextBox,
    Dropdown,
    ListBox,
    ScrollPanel,
    TreeView,
}

impl WidgetKind {
    /// Kinds a user can instantiate from the palette.
    pub const PALETTE: [WidgetKind; 10] = [
        WidgetKind::Window,
        WidgetKind::Panel,
        WidgetKind::Button,
        WidgetKind::Label,
        WidgetKind::CheckBox,
        WidgetKind::TextBox,
        WidgetKind::Dropdown,
        WidgetKind::ListBox,
        WidgetKind::ScrollPanel,
        WidgetKind::TreeView,
    ];

    /// Type name used for display and for generating widget names.
    pub fn type_name(self) -> &'static str {
        match self {
            WidgetKind::Workspace => "workspace",
            WidgetKind::Window => "window",
            WidgetKind::Panel => "panel",
            WidgetKind::Button => "button",
            WidgetKind::Label => "label",
            WidgetKind::CheckBox => "checkbox",
            WidgetKind::TextBox => "textbox",
            WidgetKind::Dropdown => "dropdown",
            WidgetKind::ListBox => "listbox",
            WidgetKind::ScrollPanel => "scrollpanel",
            WidgetKind::TreeView => "treeview",
        }
    }

    /// Size a freshly created widget gets.
    pub fn default_size(self) -> Size {
        match self {
            WidgetKind::Workspace => Size::new(800.0, 600.0),
            WidgetKind::Window => Size::new(200.0, 160.0),
            WidgetKind::Panel | WidgetKind::ScrollPanel => Size::new(160.0, 120.0),
            WidgetKind::Button => Size::new(100.0, 30.0),
            WidgetKind::Label => Size::new(100.0, 20.0),
            WidgetKind::CheckBox => Size::new(120.0, 20.0),
            WidgetKind::TextBox | WidgetKind::Dropdown => Size::new(140.0, 26.0),
            WidgetKind::ListBox | WidgetKind::TreeView => Size::new(140.0, 160.0),
        }
    }

    /// Whether widgets of this kind usually hold children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            WidgetKind::Workspace
                | WidgetKind::Window
                | WidgetKind::Panel
                | WidgetKind::ScrollPanel
        )
    }
}

/// Data stored for one node of the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Stable name, unique within the tree.
    pub name: String,
    pub kind: WidgetKind,
    /// Text shown by captioned kinds (buttons, labels, window titles).
    pub caption: String,
    /// Position relative to the parent.
    pub position: Point,
    pub size: Size,
    pub visible: bool,
}

impl Widget {
    /// Create a widget of the given kind with its default size at the origin.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            name: String::new(),
            kind,
            caption: String::new(),
            position: Point::ZERO,
            size: kind.default_size(),
            visible: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Rectangle in the parent's coordinate space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_widget_uses_default_size() {
        let w = Widget::new(WidgetKind::Button);
        assert_eq!(w.size, Size::new(100.0, 30.0));
        assert!(w.visible);
        assert_eq!(w.position, Point::ZERO);
    }

    #[test]
    fn test_rect_is_in_parent_space() {
        let w = Widget::new(WidgetKind::Panel)
            .with_position(Point::new(10.0, 20.0))
            .with_size(Size::new(30.0, 40.0));
        assert_eq!(w.rect(), Rect::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_palette_excludes_workspace() {
        assert!(!WidgetKind::PALETTE.contains(&WidgetKind::Workspace));
    }
}
