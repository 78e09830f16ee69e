//! Retained widget tree: ownership, geometry queries and focus.

use kurbo::{Point, Rect, Vec2};

use super::kind::Widget;
use crate::error::{TreeError, TreeResult};

/// Handle to a node in a [`WidgetTree`] (slot index + generation).
///
/// A handle to a removed node never aliases a node inserted later into the
/// same slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u32, u32);

impl WidgetId {
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Node {
    generation: u32,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    widget: Widget,
}

/// A tree of widgets. Every node is owned by its parent; children are kept in
/// add order, which is also draw order (last child is on top).
#[derive(Debug, Clone, Default)]
pub struct WidgetTree {
    nodes: Vec<Option<Node>>,
    /// Last generation per slot (persists across frees).
    generations: Vec<u32>,
    free_list: Vec<usize>,
    focused: Option<WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: WidgetId) -> TreeResult<&Node> {
        match self.nodes.get(id.idx()) {
            Some(Some(node)) if node.generation == id.1 => Ok(node),
            _ => Err(TreeError::Stale(id)),
        }
    }

    fn node_mut(&mut self, id: WidgetId) -> TreeResult<&mut Node> {
        match self.nodes.get_mut(id.idx()) {
            Some(Some(node)) if node.generation == id.1 => Ok(node),
            _ => Err(TreeError::Stale(id)),
        }
    }

    fn alloc(&mut self, parent: Option<WidgetId>, widget: Widget) -> WidgetId {
        let idx = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.nodes.push(None);
                self.generations.push(0);
                self.nodes.len() - 1
            }
        };
        let generation = self.generations[idx].wrapping_add(1);
        self.generations[idx] = generation;
        self.nodes[idx] = Some(Node {
            generation,
            parent,
            children: Vec::new(),
            widget,
        });
        WidgetId::new(idx, generation)
    }

    /// Insert a widget with no parent.
    pub fn insert_root(&mut self, widget: Widget) -> WidgetId {
        self.alloc(None, widget)
    }

    /// Insert a widget as the last (topmost) child of `parent`, or as a root.
    pub fn insert(&mut self, parent: Option<WidgetId>, widget: Widget) -> TreeResult<WidgetId> {
        let Some(parent) = parent else {
            return Ok(self.insert_root(widget));
        };
        self.node(parent)?;
        let id = self.alloc(Some(parent), widget);
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Remove a widget and all its descendants.
    ///
    /// Returns the removed handles, the widget itself first.
    pub fn remove(&mut self, id: WidgetId) -> TreeResult<Vec<WidgetId>> {
        let parent = self.node(id)?.parent;
        let mut removed = vec![id];
        removed.extend(self.descendants(id));

        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        for &gone in &removed {
            self.nodes[gone.idx()] = None;
            self.free_list.push(gone.idx());
        }
        if self.focused.is_some_and(|f| removed.contains(&f)) {
            self.focused = None;
        }
        Ok(removed)
    }

    /// Move `id` to the end of `new_parent`'s children.
    pub fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> TreeResult<()> {
        self.node(new_parent)?;
        let old_parent = self.node(id)?.parent;
        if id == new_parent || self.is_descendant(id, new_parent) {
            return Err(TreeError::Cycle {
                child: id,
                parent: new_parent,
            });
        }

        if let Some(old) = old_parent {
            self.node_mut(old)?.children.retain(|&c| c != id);
        }
        self.node_mut(new_parent)?.children.push(id);
        self.node_mut(id)?.parent = Some(new_parent);
        Ok(())
    }

    /// Make `id` the topmost child of its parent.
    pub fn bring_to_front(&mut self, id: WidgetId) -> TreeResult<()> {
        let parent = self.node(id)?.parent.ok_or(TreeError::Orphan(id))?;
        let children = &mut self.node_mut(parent)?.children;
        children.retain(|&c| c != id);
        children.push(id);
        Ok(())
    }

    /// Check whether a handle refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.node(id).is_ok()
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.node(id).ok().map(|n| &n.widget)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.node_mut(id).ok().map(|n| &mut n.widget)
    }

    /// Like [`WidgetTree::get`] but reports stale handles as an error.
    pub fn widget(&self, id: WidgetId) -> TreeResult<&Widget> {
        self.node(id).map(|n| &n.widget)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> TreeResult<&mut Widget> {
        self.node_mut(id).map(|n| &mut n.widget)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    /// Children in add order (empty for stale handles).
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants of `id` in pre-order, `id` excluded.
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: Vec<WidgetId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Strict ancestry test: true if `id` is below `ancestor` (never for `id == ancestor`).
    pub fn is_descendant(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Position in the coordinate space of the tree root's parent.
    pub fn absolute_position(&self, id: WidgetId) -> TreeResult<Point> {
        let mut node = self.node(id)?;
        let mut pos = node.widget.position;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            pos += node.widget.position.to_vec2();
        }
        Ok(pos)
    }

    /// Rectangle in absolute coordinates.
    pub fn absolute_rect(&self, id: WidgetId) -> TreeResult<Rect> {
        let size = self.node(id)?.widget.size;
        Ok(Rect::from_origin_size(self.absolute_position(id)?, size))
    }

    /// Sum of the positions of `id`'s ancestors up to and including `ancestor`.
    ///
    /// Adding this to `id`'s own rect maps it into `ancestor`'s parent space.
    /// Zero when `id` is not below `ancestor`.
    pub fn offset_from(&self, id: WidgetId, ancestor: WidgetId) -> TreeResult<Vec2> {
        self.node(id)?;
        if !self.is_descendant(ancestor, id) {
            return Ok(Vec2::ZERO);
        }
        let mut offset = Vec2::ZERO;
        let mut current = self.node(id)?.parent;
        while let Some(p) = current {
            let node = self.node(p)?;
            offset += node.widget.position.to_vec2();
            if p == ancestor {
                break;
            }
            current = node.parent;
        }
        Ok(offset)
    }

    /// Topmost visible widget at `point`, which is given in `root`'s parent space.
    ///
    /// Only descends into children that contain the point.
    pub fn find_visible_at(&self, root: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.node(root).ok()?;
        if !node.widget.visible || !node.widget.rect().contains(point) {
            return None;
        }
        let local = point - node.widget.position.to_vec2();
        for &child in node.children.iter().rev() {
            let Ok(c) = self.node(child) else { continue };
            if c.widget.visible && c.widget.rect().contains(local) {
                return self.find_visible_at(child, local);
            }
        }
        Some(root)
    }

    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.nodes.iter().enumerate().find_map(|(idx, slot)| {
            slot.as_ref()
                .filter(|n| n.widget.name == name)
                .map(|n| WidgetId::new(idx, n.generation))
        })
    }

    /// Pick a name that no live widget uses: `wanted` if it is free, else `<base>_<n>`.
    pub fn unique_name(&self, base: &str, wanted: Option<&str>) -> String {
        if let Some(wanted) = wanted.filter(|w| !w.is_empty()) {
            if self.find_by_name(wanted).is_none() {
                return wanted.to_string();
            }
        }
        (0..)
            .map(|index| format!("{base}_{index}"))
            .find(|candidate| self.find_by_name(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Give input focus to `id`. Stale handles are ignored.
    pub fn request_focus(&mut self, id: WidgetId) {
        if self.contains(id) {
            self.focused = Some(id);
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }
}
