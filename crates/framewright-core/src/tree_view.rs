//! Hierarchy model mirrored from a workspace, for tree view widgets.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::widget::{WidgetId, WidgetTree};
use crate::workspace::EditorWorkspace;

/// One widget in the mirrored hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub widget: WidgetId,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn build(tree: &WidgetTree, id: WidgetId) -> Option<Self> {
        let widget = tree.get(id)?;
        Some(Self {
            widget: id,
            label: format!("{} ({})", widget.name, widget.kind.type_name()),
            children: tree
                .children(id)
                .iter()
                .filter_map(|&child| Self::build(tree, child))
                .collect(),
        })
    }

    /// Handles from this node down to `id`, both included.
    fn path_to(&self, id: WidgetId) -> Option<Vec<WidgetId>> {
        if self.widget == id {
            return Some(vec![id]);
        }
        self.children.iter().find_map(|child| {
            child.path_to(id).map(|mut path| {
                path.insert(0, self.widget);
                path
            })
        })
    }
}

/// A flattened, displayable row.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub widget: WidgetId,
    pub depth: usize,
    pub label: String,
    pub selected: bool,
    pub hovered: bool,
    pub expanded: bool,
    pub has_children: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TreeViewModel {
    roots: Vec<TreeNode>,
    selected: Option<WidgetId>,
    hovered: Option<WidgetId>,
    collapsed: HashSet<WidgetId>,
    /// Selection that arrived before the rebuild that knows about it.
    pending_reveal: Option<WidgetId>,
    dirty: bool,
}

impl TreeViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model kept in sync with `workspace` through its observers.
    pub fn attach(workspace: &mut EditorWorkspace) -> Rc<RefCell<Self>> {
        let mut model = Self::new();
        model.rebuild(workspace);
        let model = Rc::new(RefCell::new(model));

        let target = Rc::clone(&model);
        workspace.on_selection_changed(move |id| {
            target.borrow_mut().set_selected_widget(id);
        });
        let target = Rc::clone(&model);
        workspace.on_hover_changed(move |id| {
            target.borrow_mut().set_hovered_widget(id);
        });
        let target = Rc::clone(&model);
        workspace.on_children_changed(move || target.borrow_mut().mark_dirty());
        model
    }

    /// Rebuild the hierarchy from the workspace's children.
    pub fn rebuild(&mut self, workspace: &EditorWorkspace) {
        let tree = workspace.tree();
        self.roots = workspace
            .children()
            .iter()
            .filter_map(|&child| TreeNode::build(tree, child))
            .collect();
        self.collapsed.retain(|&id| tree.contains(id));
        self.selected = workspace.selected();
        self.hovered = workspace.hovered();
        if let Some(id) = self.pending_reveal.take() {
            if self.selected == Some(id) {
                self.reveal(id);
            }
        }
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild if the workspace structure changed since the last rebuild.
    pub fn sync(&mut self, workspace: &EditorWorkspace) -> bool {
        if self.dirty {
            self.rebuild(workspace);
            true
        } else {
            false
        }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    fn path_to(&self, id: WidgetId) -> Option<Vec<WidgetId>> {
        self.roots.iter().find_map(|root| root.path_to(id))
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.path_to(id).is_some()
    }

    /// Select the node of a widget and expand its ancestors.
    ///
    /// A widget the model does not know is ignored; `None` clears. While a
    /// rebuild is pending, an unknown widget is revealed by that rebuild.
    pub fn set_selected_widget(&mut self, id: Option<WidgetId>) -> bool {
        self.pending_reveal = None;
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.reveal(id) => {
                self.selected = Some(id);
                true
            }
            Some(id) => {
                if self.dirty {
                    self.pending_reveal = Some(id);
                }
                false
            }
        }
    }

    /// Expand the ancestors of `id`. False if the model has no node for it.
    fn reveal(&mut self, id: WidgetId) -> bool {
        let Some(path) = self.path_to(id) else {
            return false;
        };
        for ancestor in &path[..path.len() - 1] {
            self.collapsed.remove(ancestor);
        }
        true
    }

    pub fn set_hovered_widget(&mut self, id: Option<WidgetId>) -> bool {
        match id {
            Some(id) if !self.contains(id) => false,
            _ => {
                self.hovered = id;
                true
            }
        }
    }

    pub fn selected_widget(&self) -> Option<WidgetId> {
        self.selected
    }

    pub fn hovered_widget(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn toggle_expanded(&mut self, id: WidgetId) {
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
    }

    /// Visible rows in display order. Children of collapsed nodes are skipped.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.push_rows(root, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, node: &TreeNode, depth: usize, rows: &mut Vec<TreeRow>) {
        let expanded = !self.collapsed.contains(&node.widget);
        rows.push(TreeRow {
            widget: node.widget,
            depth,
            label: node.label.clone(),
            selected: self.selected == Some(node.widget),
            hovered: self.hovered == Some(node.widget),
            expanded,
            has_children: !node.children.is_empty(),
        });
        if expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }
}
