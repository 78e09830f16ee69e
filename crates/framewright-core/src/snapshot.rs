//! Detached copies of widget subtrees, used by the clipboard and undo history.

use std::collections::HashSet;

use crate::error::TreeResult;
use crate::widget::{Widget, WidgetId, WidgetTree};

/// How names are assigned when a snapshot is put back into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Restore names as captured.
    Keep,
    /// Keep a name only if it is free, otherwise generate `<kind>_<n>`.
    Unique,
}

/// A widget and its descendants, detached from any tree.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub widget: Widget,
    pub locked: bool,
    pub children: Vec<WidgetSnapshot>,
}

impl WidgetSnapshot {
    pub fn capture(
        tree: &WidgetTree,
        id: WidgetId,
        locked: &HashSet<WidgetId>,
    ) -> TreeResult<Self> {
        let widget = tree.widget(id)?.clone();
        let children = tree
            .children(id)
            .iter()
            .map(|&child| Self::capture(tree, child, locked))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(Self {
            widget,
            locked: locked.contains(&id),
            children,
        })
    }

    /// Insert the snapshot as the last child of `parent`; returns the new root.
    pub fn instantiate(
        &self,
        tree: &mut WidgetTree,
        parent: WidgetId,
        locked: &mut HashSet<WidgetId>,
        naming: Naming,
    ) -> TreeResult<WidgetId> {
        let mut widget = self.widget.clone();
        if naming == Naming::Unique {
            widget.name = tree.unique_name(widget.kind.type_name(), Some(&widget.name));
        }
        let id = tree.insert(Some(parent), widget)?;
        if self.locked {
            locked.insert(id);
        }
        for child in &self.children {
            child.instantiate(tree, id, locked, naming)?;
        }
        Ok(id)
    }

    /// Number of widgets in the snapshot.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(WidgetSnapshot::len).sum::<usize>()
    }
}

/// Bounded undo/redo stacks of workspace contents.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Vec<WidgetSnapshot>>,
    redo: Vec<Vec<WidgetSnapshot>>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            depth,
        }
    }

    /// Record the state before a change. Clears the redo stack.
    pub fn record(&mut self, before: Vec<WidgetSnapshot>) {
        self.push_undo(before);
        self.redo.clear();
    }

    fn push_undo(&mut self, state: Vec<WidgetSnapshot>) {
        if self.depth == 0 {
            return;
        }
        if self.undo.len() >= self.depth {
            self.undo.remove(0);
        }
        self.undo.push(state);
    }

    /// Step back. `current` becomes redoable.
    pub fn undo(&mut self, current: Vec<WidgetSnapshot>) -> Option<Vec<WidgetSnapshot>> {
        let state = self.undo.pop()?;
        self.redo.push(current);
        Some(state)
    }

    pub fn redo(&mut self, current: Vec<WidgetSnapshot>) -> Option<Vec<WidgetSnapshot>> {
        let state = self.redo.pop()?;
        self.push_undo(current);
        Some(state)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
