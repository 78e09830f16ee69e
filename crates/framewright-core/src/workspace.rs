//! The layout editor workspace: selection, hover, and the pointer state
//! machine that moves, resizes and reparents widgets.

use std::collections::HashSet;

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::WorkspaceConfig;
use crate::error::{TreeError, TreeResult};
use crate::input::{KeyAction, KeyEvent, MouseButton, PointerEvent};
use crate::keymap::{EditCommand, Keymap};
use crate::mode::{EditMode, Edges, ResizeDirection};
use crate::observer::ObserverList;
use crate::selection::EditArea;
use crate::snap::{clamp_grid, snap_to_grid};
use crate::snapshot::{History, Naming, WidgetSnapshot};
use crate::widget::{Widget, WidgetId, WidgetKind, WidgetTree};

/// State captured when a move or resize drag starts.
#[derive(Debug, Clone)]
struct DragSession {
    /// Pointer position at press.
    anchor: Point,
    /// Origin of the selection at press.
    start_pos: Point,
    /// Live rectangle being edited.
    area: Rect,
    initial_area: Rect,
    before: Vec<WidgetSnapshot>,
}

/// Container whose children are the widgets being edited.
///
/// The workspace is the root of its tree. Pointer positions are given in the
/// space its own position is expressed in. The tree is only mutated through
/// the methods here so selection and hover never point at removed widgets.
pub struct EditorWorkspace {
    tree: WidgetTree,
    workspace: WidgetId,
    config: WorkspaceConfig,
    keymap: Keymap,
    mode: EditMode,
    /// Mode the pointer would start if pressed now. Drives handle highlight.
    hover_mode: EditMode,
    selected: Option<WidgetId>,
    hovered: Option<WidgetId>,
    locked: HashSet<WidgetId>,
    drag: Option<DragSession>,
    clipboard: Option<WidgetSnapshot>,
    history: History,
    selection_observers: ObserverList<Option<WidgetId>>,
    hover_observers: ObserverList<Option<WidgetId>>,
    children_observers: ObserverList<()>,
    preview_observers: ObserverList<WidgetId>,
}

impl EditorWorkspace {
    /// Create an empty workspace occupying `bounds` in pointer space.
    pub fn new(config: WorkspaceConfig, bounds: Rect) -> Self {
        let mut tree = WidgetTree::new();
        let workspace = tree.insert_root(
            Widget::new(WidgetKind::Workspace)
                .with_name("workspace")
                .with_position(bounds.origin())
                .with_size(bounds.size()),
        );

        let mut this = Self {
            tree,
            workspace,
            history: History::new(config.undo_depth),
            config: WorkspaceConfig {
                grid_size: clamp_grid(config.grid_size),
                ..config
            },
            keymap: Keymap::default(),
            mode: EditMode::Select,
            hover_mode: EditMode::Select,
            selected: None,
            hovered: None,
            locked: HashSet::new(),
            drag: None,
            clipboard: None,
            selection_observers: ObserverList::default(),
            hover_observers: ObserverList::default(),
            children_observers: ObserverList::default(),
            preview_observers: ObserverList::default(),
        };
        this.tree.request_focus(this.workspace);
        this
    }

    // --- accessors ---

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Handle of the workspace container itself.
    pub fn workspace_id(&self) -> WidgetId {
        self.workspace
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn hover_mode(&self) -> EditMode {
        self.hover_mode
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn is_locked(&self, id: WidgetId) -> bool {
        self.locked.contains(&id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Workspace children, bottom to top.
    pub fn children(&self) -> &[WidgetId] {
        self.tree.children(self.workspace)
    }

    /// True if `id` is strictly inside the workspace subtree.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.tree.is_descendant(self.workspace, id)
    }

    // --- observers ---

    pub fn on_selection_changed(&mut self, observer: impl FnMut(Option<WidgetId>) + 'static) {
        self.selection_observers.add(observer);
    }

    pub fn on_hover_changed(&mut self, observer: impl FnMut(Option<WidgetId>) + 'static) {
        self.hover_observers.add(observer);
    }

    pub fn on_children_changed(&mut self, mut observer: impl FnMut() + 'static) {
        self.children_observers.add(move |()| observer());
    }

    pub fn on_preview(&mut self, observer: impl FnMut(WidgetId) + 'static) {
        self.preview_observers.add(observer);
    }

    // --- configuration ---

    pub fn set_grid_size(&mut self, grid_size: Size) {
        self.config.grid_size = clamp_grid(grid_size);
    }

    pub fn set_draw_grid(&mut self, draw_grid: bool) {
        self.config.draw_grid = draw_grid;
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.config.snap_to_grid = snap;
    }

    /// Move and resize the workspace in pointer space.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if let Some(ws) = self.tree.get_mut(self.workspace) {
            ws.position = bounds.origin();
            ws.size = bounds.size();
        }
    }

    pub fn bounds(&self) -> Rect {
        self.tree
            .get(self.workspace)
            .map(Widget::rect)
            .unwrap_or(Rect::ZERO)
    }

    // --- geometry ---

    /// Rectangle of a widget in pointer space.
    pub fn pointer_rect(&self, id: WidgetId) -> TreeResult<Rect> {
        let rect = self.tree.widget(id)?.rect();
        Ok(rect + self.tree.offset_from(id, self.workspace)?)
    }

    /// Handles around the current selection.
    pub fn edit_area(&self) -> Option<EditArea> {
        let selected = self.selected?;
        let rect = self.pointer_rect(selected).ok()?;
        Some(EditArea::new(rect, self.config.handle_half_size))
    }

    fn grid_origin(&self) -> Point {
        self.bounds().origin()
    }

    fn snap(&self, p: Point) -> Point {
        if self.config.snap_to_grid {
            snap_to_grid(p, self.grid_origin(), self.config.grid_size)
        } else {
            p
        }
    }

    /// Deepest widget under `point` below `start`, searching topmost children first.
    ///
    /// `point` is in `start`'s parent space. Only workspace descendants are
    /// accepted from the recursion; otherwise `start` itself is returned if it
    /// contains the point.
    pub fn editable_at(&self, start: WidgetId, point: Point) -> TreeResult<Option<WidgetId>> {
        let widget = self.tree.widget(start)?;
        let local = point - widget.position.to_vec2();
        for &child in self.tree.children(start).iter().rev() {
            if let Some(found) = self.editable_at(child, local)? {
                if found != self.workspace && self.contains(found) {
                    return Ok(Some(found));
                }
            }
        }
        Ok(widget.rect().contains(point).then_some(start))
    }

    /// Editable widget under a pointer position, the workspace itself excluded.
    fn element_at(&self, p: Point) -> Option<WidgetId> {
        match self.editable_at(self.workspace, p) {
            Ok(found) => found.filter(|&id| id != self.workspace),
            Err(err) => {
                log::warn!("Hit test failed: {err}");
                None
            }
        }
    }

    // --- mode resolution ---

    /// Mode a press at `p` would start. Faults drop the selection.
    pub fn mode_at(&mut self, p: Point) -> EditMode {
        match self.try_mode_at(p) {
            Ok(mode) => mode,
            Err(err) => {
                log::warn!("Lost selection while resolving edit mode: {err}");
                self.set_selected(None);
                EditMode::Select
            }
        }
    }

    fn try_mode_at(&self, p: Point) -> TreeResult<EditMode> {
        let Some(selected) = self.selected else {
            return Ok(EditMode::Select);
        };
        self.tree.widget(selected)?;
        if !self.contains(selected) {
            return Err(TreeError::Outside(selected));
        }

        let rect = self.pointer_rect(selected)?;
        if !self.is_locked(selected) {
            if let Some(direction) = EditArea::new(rect, self.config.handle_half_size).hit(p) {
                return Ok(EditMode::Resize(direction));
            }
        }

        let local = p - self.tree.offset_from(selected, self.workspace)?;
        if self.editable_at(selected, local)? == Some(selected) {
            Ok(EditMode::Move)
        } else {
            Ok(EditMode::Select)
        }
    }

    // --- selection and hover ---

    /// Select a workspace widget, or clear the selection.
    ///
    /// Anything outside the workspace (including the workspace itself)
    /// clears it. Observers fire once if the selection changed.
    pub fn set_selected(&mut self, selected: Option<WidgetId>) -> bool {
        let selected = selected.filter(|&id| self.contains(id));
        let changed = self.selected != selected;
        self.selected = selected;
        self.refocus();
        if changed {
            log::debug!("Selection changed to {selected:?}");
            self.selection_observers.notify(selected);
        }
        changed
    }

    /// Focus inside the workspace is taken back; any other focus is kept.
    fn refocus(&mut self) {
        let focus = self
            .tree
            .focused()
            .filter(|&f| self.tree.contains(f) && !self.contains(f));
        match focus {
            Some(focus) => self.tree.request_focus(focus),
            None => self.tree.request_focus(self.workspace),
        }
    }

    /// Set the hovered widget. Observers fire only when it changes.
    ///
    /// Ignored while a move or resize is running, since the drag edits the
    /// hovered widget.
    pub fn set_hovered(&mut self, hovered: Option<WidgetId>) -> bool {
        if self.mode.is_dragging() {
            return false;
        }
        self.hover(hovered)
    }

    fn hover(&mut self, hovered: Option<WidgetId>) -> bool {
        let hovered = hovered.filter(|&id| self.contains(id));
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        self.hover_observers.notify(hovered);
        true
    }

    /// Lock or unlock a workspace widget. Other handles are ignored.
    pub fn set_locked(&mut self, id: WidgetId, locked: bool) {
        if !self.contains(id) {
            return;
        }
        if locked {
            self.locked.insert(id);
        } else {
            self.locked.remove(&id);
        }
    }

    pub fn select_next_sibling(&mut self) {
        self.step_sibling(true);
    }

    pub fn select_previous_sibling(&mut self) {
        self.step_sibling(false);
    }

    fn step_sibling(&mut self, forward: bool) {
        let parent = self
            .selected
            .and_then(|s| self.tree.parent(s))
            .unwrap_or(self.workspace);
        let siblings = self.tree.children(parent);
        let index = self
            .selected
            .and_then(|s| siblings.iter().position(|&c| c == s));
        let next = match (index, forward) {
            (Some(i), true) => siblings.get(i + 1),
            (Some(i), false) => i.checked_sub(1).and_then(|i| siblings.get(i)),
            (None, true) => siblings.first(),
            (None, false) => siblings.last(),
        };
        if let Some(&next) = next {
            self.set_selected(Some(next));
        }
    }

    // --- pointer state machine ---

    /// Feed a pointer event. Returns true when the event was consumed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                ..
            } => self.primary_pressed(position),
            PointerEvent::Down {
                button: MouseButton::Right,
                ..
            } => self.secondary_pressed(),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
                ..
            } => self.primary_released(position),
            PointerEvent::Move { position, .. } => self.pointer_moved(position),
            PointerEvent::Scroll { delta, .. } => self.scrolled(delta),
            _ => false,
        }
    }

    fn primary_pressed(&mut self, p: Point) -> bool {
        if self.mode == EditMode::SelectNewParent {
            return true;
        }

        let redirect = self
            .tree
            .find_visible_at(self.workspace, p)
            .filter(|&id| self.contains(id) && Some(id) != self.selected);
        if let Some(target) = redirect {
            self.tree.request_focus(target);
            self.set_selected(Some(target));
            return true;
        }

        if self.mode == EditMode::Select {
            if self.selected.is_some() {
                self.mode = self.mode_at(p);
                if self.mode.is_dragging() {
                    self.begin_drag(p);
                }
            }

            if !self.mode.is_dragging() {
                let found = self.element_at(p);
                self.hover(found);
                self.set_selected(found);
            }
        }
        true
    }

    fn begin_drag(&mut self, p: Point) {
        let Some(selected) = self.selected else {
            self.mode = EditMode::Select;
            return;
        };
        match self.pointer_rect(selected) {
            Ok(area) => {
                log::debug!("Start {:?} of {selected:?}", self.mode);
                self.drag = Some(DragSession {
                    anchor: p,
                    start_pos: area.origin(),
                    area,
                    initial_area: area,
                    before: self.capture_state(),
                });
                self.hover(Some(selected));
            }
            Err(err) => {
                log::warn!("Cannot start drag: {err}");
                self.set_selected(None);
                self.mode = EditMode::Select;
            }
        }
    }

    /// End a drag, recording an undo step if the geometry changed.
    fn finish_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            if drag.area != drag.initial_area {
                self.history.record(drag.before);
            }
        }
    }

    fn secondary_pressed(&mut self) -> bool {
        if self.mode == EditMode::SelectNewParent || self.mode.is_dragging() {
            // Live edits made so far stay applied.
            self.finish_drag();
            self.mode = EditMode::Select;
        }
        true
    }

    fn pointer_moved(&mut self, p: Point) -> bool {
        match self.mode {
            EditMode::Select | EditMode::SelectNewParent => {
                let mut hovered = self.element_at(p);
                if self.mode == EditMode::Select {
                    self.hover_mode = self.mode_at(p);
                    if matches!(self.hover_mode, EditMode::Resize(_)) {
                        hovered = self.selected;
                    }
                } else {
                    self.hover_mode = EditMode::Select;
                }
                self.hover(hovered);
            }
            EditMode::Move => self.drag_move(p),
            EditMode::Resize(direction) => self.drag_resize(direction, p),
        }
        true
    }

    fn drag_move(&mut self, p: Point) {
        let Some(drag) = &self.drag else { return };
        let target = self.snap(drag.start_pos + (p - drag.anchor));

        let Some(drag) = &mut self.drag else { return };
        let delta = target - drag.area.origin();
        drag.area = drag.area + delta;

        if let Some(widget) = self.hovered.and_then(|h| self.tree.get_mut(h)) {
            widget.position += delta;
        }
    }

    fn drag_resize(&mut self, direction: ResizeDirection, p: Point) {
        let p = self.snap(p);
        let Some(drag) = &mut self.drag else { return };
        let edges = direction.edges();
        if edges.contains(Edges::TOP) {
            drag.area.y0 = p.y;
        }
        if edges.contains(Edges::BOTTOM) {
            drag.area.y1 = p.y;
        }
        if edges.contains(Edges::LEFT) {
            drag.area.x0 = p.x;
        }
        if edges.contains(Edges::RIGHT) {
            drag.area.x1 = p.x;
        }
        let area = drag.area;

        let Some(hovered) = self.hovered else { return };
        let offset = match self.tree.offset_from(hovered, self.workspace) {
            Ok(offset) => offset,
            Err(err) => {
                log::warn!("Resize target vanished: {err}");
                return;
            }
        };
        if let Some(widget) = self.tree.get_mut(hovered) {
            widget.position = area.origin() - offset;
            widget.size = area.size();
        }
    }

    fn primary_released(&mut self, p: Point) -> bool {
        match self.mode {
            EditMode::SelectNewParent => self.reparent_at(p),
            EditMode::Move | EditMode::Resize(_) => self.finish_drag(),
            EditMode::Select => {}
        }
        self.mode = EditMode::Select;
        true
    }

    fn reparent_at(&mut self, p: Point) {
        let Some(selected) = self.selected else { return };
        let target = match self.editable_at(self.workspace, p) {
            Ok(Some(target)) if target != selected => target,
            Ok(_) => return,
            Err(err) => {
                log::warn!("Hit test failed: {err}");
                return;
            }
        };
        self.hover(Some(target));
        if let Err(err) = self.reparent(selected, target) {
            log::warn!("Cannot reparent {selected:?}: {err}");
        }
    }

    fn scrolled(&mut self, delta: Vec2) -> bool {
        if delta.y > 0.0 {
            self.select_previous_sibling();
        } else if delta.y < 0.0 {
            self.select_next_sibling();
        }
        true
    }

    /// Start picking a new parent for the selection.
    pub fn begin_select_new_parent(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.finish_drag();
        self.mode = EditMode::SelectNewParent;
        true
    }

    // --- keyboard ---

    /// Feed a key event. Commands fire on release.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if event.action != KeyAction::Release {
            return false;
        }
        match self.keymap.lookup(&event) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    pub fn execute(&mut self, command: EditCommand) {
        log::debug!("Execute {command:?}");
        match command {
            EditCommand::Delete => self.remove_selected(),
            EditCommand::Cut => self.cut(),
            EditCommand::Copy => self.copy(),
            EditCommand::Paste => {
                self.paste();
            }
            EditCommand::Undo => {
                self.undo();
            }
            EditCommand::Redo => {
                self.redo();
            }
            EditCommand::BringToFront => {
                if let Some(selected) = self.selected {
                    Self::report(self.bring_to_front(selected));
                }
            }
            EditCommand::Preview => self.preview(),
            EditCommand::SelectNewParent => {
                self.begin_select_new_parent();
            }
            EditCommand::New => self.reset(),
        }
    }

    fn report(result: TreeResult<()>) {
        if let Err(err) = result {
            log::warn!("Edit failed: {err}");
        }
    }

    // --- structural edits ---

    fn ensure_inside(&self, id: WidgetId) -> TreeResult<()> {
        self.tree.widget(id)?;
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::Outside(id))
        }
    }

    fn ensure_parent(&self, parent: WidgetId) -> TreeResult<()> {
        if parent == self.workspace {
            Ok(())
        } else {
            self.ensure_inside(parent)
        }
    }

    fn capture_state(&self) -> Vec<WidgetSnapshot> {
        self.children()
            .iter()
            .filter_map(|&child| WidgetSnapshot::capture(&self.tree, child, &self.locked).ok())
            .collect()
    }

    fn children_changed(&mut self) {
        self.children_observers.notify(());
    }

    /// Add a prebuilt widget under `parent`. Its name is made unique.
    pub fn add_widget(&mut self, parent: WidgetId, mut widget: Widget) -> TreeResult<WidgetId> {
        self.ensure_parent(parent)?;
        let before = self.capture_state();
        widget.name = self
            .tree
            .unique_name(widget.kind.type_name(), Some(&widget.name));
        let id = self.tree.insert(Some(parent), widget)?;
        self.history.record(before);
        self.children_changed();
        Ok(id)
    }

    /// Create a widget of `kind` with its default size and select it.
    pub fn create_widget(
        &mut self,
        kind: WidgetKind,
        parent: Option<WidgetId>,
        position: Point,
    ) -> TreeResult<WidgetId> {
        let parent = parent.unwrap_or(self.workspace);
        let name = self.tree.unique_name(kind.type_name(), None);
        let mut widget = Widget::new(kind).with_name(name.clone()).with_position(position);
        if matches!(
            kind,
            WidgetKind::Window | WidgetKind::Button | WidgetKind::Label | WidgetKind::CheckBox
        ) {
            widget.caption = name;
        }
        let id = self.add_widget(parent, widget)?;
        log::debug!("Created {kind:?} {id:?}");
        self.set_selected(Some(id));
        Ok(id)
    }

    /// Remove a widget and its subtree.
    pub fn remove_widget(&mut self, id: WidgetId) -> TreeResult<()> {
        self.ensure_inside(id)?;
        let before = self.capture_state();
        let removed = self.tree.remove(id)?;
        self.history.record(before);
        self.forget(&removed);
        self.children_changed();
        Ok(())
    }

    /// Drop every reference to removed widgets.
    fn forget(&mut self, removed: &[WidgetId]) {
        for id in removed {
            self.locked.remove(id);
        }
        if self.selected.is_some_and(|s| removed.contains(&s)) {
            if self.mode != EditMode::Select {
                self.drag = None;
                self.mode = EditMode::Select;
            }
            self.set_selected(None);
        }
        if self.hovered.is_some_and(|h| removed.contains(&h)) {
            self.hover(None);
        }
        self.refocus();
    }

    pub fn remove_selected(&mut self) {
        if let Some(selected) = self.selected {
            Self::report(self.remove_widget(selected));
        }
    }

    /// Move `id` under `new_parent` at the parent's origin. The widget stays selected.
    pub fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> TreeResult<()> {
        self.ensure_inside(id)?;
        self.ensure_parent(new_parent)?;
        let before = self.capture_state();
        self.tree.reparent(id, new_parent)?;
        if let Some(widget) = self.tree.get_mut(id) {
            widget.position = Point::ZERO;
        }
        self.history.record(before);
        log::debug!("Reparented {id:?} under {new_parent:?}");

        if self.selected == Some(id) {
            self.refocus();
            self.selection_observers.notify(self.selected);
        } else {
            self.set_selected(Some(id));
        }
        self.children_changed();
        Ok(())
    }

    pub fn bring_to_front(&mut self, id: WidgetId) -> TreeResult<()> {
        self.ensure_inside(id)?;
        let before = self.capture_state();
        self.tree.bring_to_front(id)?;
        self.history.record(before);
        self.children_changed();
        Ok(())
    }

    /// Clear selection and hover and remove every widget.
    pub fn reset(&mut self) {
        self.drag = None;
        self.mode = EditMode::Select;
        self.hover_mode = EditMode::Select;
        self.set_selected(None);
        self.hover(None);
        for child in self.children().to_vec() {
            if let Err(err) = self.tree.remove(child) {
                log::warn!("Reset: {err}");
            }
        }
        self.locked.clear();
        self.history.clear();
        self.refocus();
        self.children_changed();
    }

    /// Forget all undo and redo steps.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // --- property edits ---

    fn edit_widget(&mut self, id: WidgetId, edit: impl FnOnce(&mut Widget)) -> TreeResult<()> {
        self.ensure_inside(id)?;
        let before = self.capture_state();
        let widget = self.tree.widget_mut(id)?;
        let old = widget.clone();
        edit(widget);
        if *widget != old {
            self.history.record(before);
        }
        Ok(())
    }

    pub fn set_position(&mut self, id: WidgetId, position: Point) -> TreeResult<()> {
        self.edit_widget(id, |w| w.position = position)
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) -> TreeResult<()> {
        self.edit_widget(id, |w| w.size = size)
    }

    pub fn set_caption(&mut self, id: WidgetId, caption: impl Into<String>) -> TreeResult<()> {
        let caption = caption.into();
        self.edit_widget(id, |w| w.caption = caption)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> TreeResult<()> {
        self.edit_widget(id, |w| w.visible = visible)?;
        if !visible && self.hovered == Some(id) {
            self.hover(None);
        }
        Ok(())
    }

    /// Rename a widget. Returns the name actually given, which differs from
    /// `name` when another widget already uses it.
    pub fn rename(&mut self, id: WidgetId, name: &str) -> TreeResult<String> {
        self.ensure_inside(id)?;
        let widget = self.tree.widget(id)?;
        if widget.name == name {
            return Ok(name.to_string());
        }
        let unique = self.tree.unique_name(widget.kind.type_name(), Some(name));
        let assigned = unique.clone();
        self.edit_widget(id, |w| w.name = assigned)?;
        self.children_changed();
        Ok(unique)
    }

    // --- clipboard and history ---

    pub fn copy(&mut self) {
        let Some(selected) = self.selected else { return };
        match WidgetSnapshot::capture(&self.tree, selected, &self.locked) {
            Ok(snapshot) => self.clipboard = Some(snapshot),
            Err(err) => log::warn!("Copy failed: {err}"),
        }
    }

    pub fn cut(&mut self) {
        if self.selected.is_some() {
            self.copy();
            self.remove_selected();
        }
    }

    /// Paste the clipboard under the selected container, or the workspace.
    pub fn paste(&mut self) -> Option<WidgetId> {
        let snapshot = self.clipboard.clone()?;
        let parent = self
            .selected
            .filter(|&s| self.tree.get(s).is_some_and(|w| w.kind.is_container()))
            .unwrap_or(self.workspace);

        let before = self.capture_state();
        match snapshot.instantiate(&mut self.tree, parent, &mut self.locked, Naming::Unique) {
            Ok(id) => {
                self.history.record(before);
                self.children_changed();
                self.set_selected(Some(id));
                Some(id)
            }
            Err(err) => {
                log::warn!("Paste failed: {err}");
                None
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        let current = self.capture_state();
        match self.history.undo(current) {
            Some(state) => {
                self.restore_state(&state);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.capture_state();
        match self.history.redo(current) {
            Some(state) => {
                self.restore_state(&state);
                true
            }
            None => false,
        }
    }

    fn restore_state(&mut self, state: &[WidgetSnapshot]) {
        self.drag = None;
        self.mode = EditMode::Select;
        self.hover_mode = EditMode::Select;
        self.set_selected(None);
        self.hover(None);
        for child in self.children().to_vec() {
            if let Err(err) = self.tree.remove(child) {
                log::warn!("Restore: {err}");
            }
        }
        self.locked.clear();
        for snapshot in state {
            if let Err(err) =
                snapshot.instantiate(&mut self.tree, self.workspace, &mut self.locked, Naming::Keep)
            {
                log::warn!("Restore: {err}");
            }
        }
        self.refocus();
        self.children_changed();
    }

    /// Ask preview observers to show the first top-level widget.
    pub fn preview(&mut self) {
        match self.children().first().copied() {
            Some(first) => self.preview_observers.notify(first),
            None => log::warn!("Have no element to preview"),
        }
    }
}

impl std::fmt::Debug for EditorWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorWorkspace")
            .field("workspace", &self.workspace)
            .field("mode", &self.mode)
            .field("selected", &self.selected)
            .field("hovered", &self.hovered)
            .field("widgets", &self.tree.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn workspace() -> EditorWorkspace {
        EditorWorkspace::new(WorkspaceConfig::default(), Rect::new(0.0, 0.0, 400.0, 400.0))
    }

    fn panel(ws: &mut EditorWorkspace, parent: WidgetId, rect: Rect) -> WidgetId {
        let widget = Widget::new(WidgetKind::Panel)
            .with_position(rect.origin())
            .with_size(rect.size());
        ws.add_widget(parent, widget).unwrap()
    }

    fn down(ws: &mut EditorWorkspace, x: f64, y: f64) {
        ws.handle_pointer(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
    }

    fn up(ws: &mut EditorWorkspace, x: f64, y: f64) {
        ws.handle_pointer(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
    }

    fn motion(ws: &mut EditorWorkspace, x: f64, y: f64) {
        ws.handle_pointer(PointerEvent::Move {
            position: Point::new(x, y),
            delta: Vec2::ZERO,
            modifiers: Modifiers::NONE,
        });
    }

    fn right_click(ws: &mut EditorWorkspace) {
        ws.handle_pointer(PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
        });
    }

    fn count_selection(ws: &mut EditorWorkspace) -> Rc<RefCell<Vec<Option<WidgetId>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        ws.on_selection_changed(move |s| sink.borrow_mut().push(s));
        log
    }

    fn count_hover(ws: &mut EditorWorkspace) -> Rc<RefCell<Vec<Option<WidgetId>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        ws.on_hover_changed(move |s| sink.borrow_mut().push(s));
        log
    }

    #[test]
    fn test_initial_state() {
        let ws = workspace();
        assert_eq!(ws.mode(), EditMode::Select);
        assert_eq!(ws.selected(), None);
        assert_eq!(ws.hovered(), None);
        assert_eq!(ws.tree().focused(), Some(ws.workspace_id()));
    }

    #[test]
    fn test_press_selects_widget_under_pointer() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let selections = count_selection(&mut ws);

        down(&mut ws, 20.0, 20.0);
        up(&mut ws, 20.0, 20.0);
        assert_eq!(ws.selected(), Some(a));
        assert_eq!(*selections.borrow(), vec![Some(a)]);
        assert_eq!(ws.tree().focused(), Some(root));

        down(&mut ws, 300.0, 300.0);
        assert_eq!(ws.selected(), None);
        assert_eq!(selections.borrow().len(), 2);
    }

    #[test]
    fn test_mode_at() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        let child = panel(&mut ws, a, Rect::new(30.0, 30.0, 45.0, 45.0));
        assert_eq!(ws.mode_at(Point::new(120.0, 120.0)), EditMode::Select);

        ws.set_selected(Some(a));
        assert_eq!(
            ws.mode_at(Point::new(100.0, 125.0)),
            EditMode::Resize(ResizeDirection::Left)
        );
        assert_eq!(ws.mode_at(Point::new(120.0, 120.0)), EditMode::Move);
        // Over a child of the selection.
        assert_eq!(ws.mode_at(Point::new(135.0, 135.0)), EditMode::Select);
        assert_eq!(ws.tree().parent(child), Some(a));
    }

    #[test]
    fn test_mode_at_fault_clears_selection() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));
        // Sneak a stale handle past the removal hooks.
        ws.tree.remove(a).unwrap();
        assert_eq!(ws.mode_at(Point::new(120.0, 120.0)), EditMode::Select);
        assert_eq!(ws.selected(), None);
    }

    #[test]
    fn test_locked_widget_never_resizes() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));
        ws.set_locked(a, true);

        let area = ws.edit_area().unwrap();
        for handle in area.handles {
            let mode = ws.mode_at(handle.center);
            assert!(matches!(mode, EditMode::Select | EditMode::Move), "{mode:?}");
        }
        down(&mut ws, 151.0, 151.0);
        assert!(!matches!(ws.mode(), EditMode::Resize(_)));
    }

    #[test]
    fn test_resize_bottom_right_with_grid() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));

        down(&mut ws, 151.0, 151.0);
        assert_eq!(ws.mode(), EditMode::Resize(ResizeDirection::BottomRight));

        motion(&mut ws, 161.0, 161.0);
        assert_eq!(
            ws.tree().absolute_rect(a).unwrap(),
            Rect::new(100.0, 100.0, 160.0, 160.0)
        );

        up(&mut ws, 161.0, 161.0);
        assert_eq!(ws.mode(), EditMode::Select);
        let widget = ws.tree().get(a).unwrap();
        assert_eq!(widget.position, Point::new(100.0, 100.0));
        assert_eq!(widget.size, Size::new(60.0, 60.0));
        assert!(ws.can_undo());
    }

    #[test]
    fn test_resize_top_only_moves_top_edge() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));

        down(&mut ws, 125.0, 99.0);
        assert_eq!(ws.mode(), EditMode::Resize(ResizeDirection::Top));
        motion(&mut ws, 170.0, 82.0);
        assert_eq!(
            ws.tree().absolute_rect(a).unwrap(),
            Rect::new(100.0, 80.0, 150.0, 150.0)
        );
    }

    #[test]
    fn test_resize_nested_widget() {
        let mut ws = EditorWorkspace::new(
            WorkspaceConfig::default(),
            Rect::new(20.0, 20.0, 420.0, 420.0),
        );
        let root = ws.workspace_id();
        let outer = panel(&mut ws, root, Rect::new(40.0, 40.0, 240.0, 240.0));
        let inner = panel(&mut ws, outer, Rect::new(20.0, 20.0, 70.0, 70.0));
        ws.set_selected(Some(inner));
        // inner sits at (80,80)-(130,130) in pointer space.
        assert_eq!(
            ws.pointer_rect(inner).unwrap(),
            Rect::new(80.0, 80.0, 130.0, 130.0)
        );

        // Inside the selection, so the outer panel does not take the press.
        down(&mut ws, 128.0, 128.0);
        assert_eq!(ws.mode(), EditMode::Resize(ResizeDirection::BottomRight));
        motion(&mut ws, 148.0, 153.0);
        let widget = ws.tree().get(inner).unwrap();
        assert_eq!(widget.position, Point::new(20.0, 20.0));
        assert_eq!(widget.size, Size::new(70.0, 70.0));
    }

    #[test]
    fn test_move_snaps_to_grid() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));

        down(&mut ws, 120.0, 120.0);
        assert_eq!(ws.mode(), EditMode::Move);
        assert_eq!(ws.hovered(), Some(a));

        motion(&mut ws, 133.0, 126.0);
        assert_eq!(ws.tree().get(a).unwrap().position, Point::new(110.0, 110.0));
        motion(&mut ws, 137.0, 126.0);
        assert_eq!(ws.tree().get(a).unwrap().position, Point::new(120.0, 110.0));

        up(&mut ws, 137.0, 126.0);
        assert_eq!(ws.mode(), EditMode::Select);
    }

    #[test]
    fn test_move_without_snap() {
        let mut ws = workspace();
        ws.set_snap_to_grid(false);
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));

        down(&mut ws, 120.0, 120.0);
        motion(&mut ws, 123.0, 127.0);
        assert_eq!(ws.tree().get(a).unwrap().position, Point::new(103.0, 107.0));
    }

    #[test]
    fn test_release_always_returns_to_select() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        let presses = [
            (120.0, 120.0),
            (100.0, 100.0),
            (125.0, 150.0),
            (150.0, 125.0),
            (300.0, 300.0),
        ];
        for (x, y) in presses {
            ws.set_selected(Some(a));
            down(&mut ws, x, y);
            motion(&mut ws, x + 13.0, y - 7.0);
            up(&mut ws, x + 13.0, y - 7.0);
            assert_eq!(ws.mode(), EditMode::Select);
        }
        ws.set_selected(Some(a));
        ws.begin_select_new_parent();
        up(&mut ws, 10.0, 10.0);
        assert_eq!(ws.mode(), EditMode::Select);
    }

    #[test]
    fn test_hover_fires_only_on_change() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let b = panel(&mut ws, root, Rect::new(100.0, 10.0, 160.0, 60.0));
        let hovers = count_hover(&mut ws);

        motion(&mut ws, 20.0, 20.0);
        motion(&mut ws, 25.0, 25.0);
        motion(&mut ws, 110.0, 20.0);
        motion(&mut ws, 115.0, 20.0);
        motion(&mut ws, 300.0, 300.0);
        motion(&mut ws, 301.0, 300.0);
        assert_eq!(*hovers.borrow(), vec![Some(a), Some(b), None]);
    }

    #[test]
    fn test_handles_force_hover_to_selection() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));
        motion(&mut ws, 152.0, 152.0);
        assert_eq!(ws.hovered(), Some(a));
        assert_eq!(ws.hover_mode(), EditMode::Resize(ResizeDirection::BottomRight));
    }

    #[test]
    fn test_redirect_to_topmost_visible() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 200.0, 200.0));
        let b = panel(&mut ws, a, Rect::new(10.0, 10.0, 50.0, 50.0));
        ws.set_selected(Some(a));
        let selections = count_selection(&mut ws);

        down(&mut ws, 30.0, 30.0);
        assert_eq!(ws.selected(), Some(b));
        assert_eq!(ws.mode(), EditMode::Select);
        assert_eq!(*selections.borrow(), vec![Some(b)]);
        assert_eq!(ws.tree().focused(), Some(root));
    }

    #[test]
    fn test_right_click_cancels_without_rollback() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_selected(Some(a));

        down(&mut ws, 151.0, 151.0);
        motion(&mut ws, 171.0, 171.0);
        right_click(&mut ws);
        assert_eq!(ws.mode(), EditMode::Select);
        assert_eq!(ws.tree().get(a).unwrap().size, Size::new(70.0, 70.0));

        // Further motion does not resize.
        motion(&mut ws, 200.0, 200.0);
        assert_eq!(ws.tree().get(a).unwrap().size, Size::new(70.0, 70.0));
    }

    #[test]
    fn test_remove_selected_fires_once() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let child = panel(&mut ws, a, Rect::new(5.0, 5.0, 10.0, 10.0));
        ws.set_selected(Some(a));
        ws.set_hovered(Some(child));
        ws.set_locked(child, true);
        let selections = count_selection(&mut ws);
        let hovers = count_hover(&mut ws);

        ws.handle_key(KeyEvent::release(Key::Delete, Modifiers::NONE));
        assert_eq!(ws.selected(), None);
        assert_eq!(ws.hovered(), None);
        assert_eq!(*selections.borrow(), vec![None]);
        assert_eq!(*hovers.borrow(), vec![None]);
        assert!(!ws.is_locked(child));
        assert!(ws.children().is_empty());
    }

    #[test]
    fn test_remove_ancestor_of_selection_clears_it() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let child = panel(&mut ws, a, Rect::new(5.0, 5.0, 10.0, 10.0));
        ws.set_selected(Some(child));
        let selections = count_selection(&mut ws);

        ws.remove_widget(a).unwrap();
        assert_eq!(ws.selected(), None);
        assert_eq!(selections.borrow().len(), 1);
    }

    #[test]
    fn test_reparent_by_pointer() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let b = panel(&mut ws, root, Rect::new(100.0, 100.0, 300.0, 300.0));
        ws.set_selected(Some(a));
        ws.handle_key(KeyEvent::release(Key::char('p'), Modifiers::CTRL));
        assert_eq!(ws.mode(), EditMode::SelectNewParent);
        let selections = count_selection(&mut ws);

        motion(&mut ws, 150.0, 150.0);
        assert_eq!(ws.hovered(), Some(b));
        down(&mut ws, 150.0, 150.0);
        assert_eq!(ws.mode(), EditMode::SelectNewParent);
        up(&mut ws, 150.0, 150.0);

        assert_eq!(ws.mode(), EditMode::Select);
        assert_eq!(ws.tree().parent(a), Some(b));
        assert_eq!(ws.tree().get(a).unwrap().position, Point::ZERO);
        assert_eq!(ws.selected(), Some(a));
        assert_eq!(*selections.borrow(), vec![Some(a)]);
    }

    #[test]
    fn test_reparent_into_own_descendant_is_ignored() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 200.0, 200.0));
        let inner = panel(&mut ws, a, Rect::new(10.0, 10.0, 100.0, 100.0));
        ws.set_selected(Some(a));
        ws.begin_select_new_parent();
        up(&mut ws, 50.0, 50.0);
        assert_eq!(ws.tree().parent(a), Some(root));
        assert_eq!(ws.tree().parent(inner), Some(a));
        assert_eq!(ws.mode(), EditMode::Select);
    }

    #[test]
    fn test_reparent_mode_needs_selection() {
        let mut ws = workspace();
        ws.handle_key(KeyEvent::release(Key::char('p'), Modifiers::CTRL));
        assert_eq!(ws.mode(), EditMode::Select);
    }

    #[test]
    fn test_keys_fire_on_release_only() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        ws.set_selected(Some(a));
        let consumed = ws.handle_key(KeyEvent {
            key: Key::Delete,
            action: KeyAction::Press,
            modifiers: Modifiers::NONE,
        });
        assert!(!consumed);
        assert!(ws.tree().contains(a));
    }

    #[test]
    fn test_unbound_key_is_not_consumed() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        ws.set_selected(Some(a));
        assert!(!ws.handle_key(KeyEvent::release(Key::char('q'), Modifiers::NONE)));
        assert!(ws.handle_key(KeyEvent::release(Key::Delete, Modifiers::NONE)));
        assert!(!ws.tree().contains(a));
    }

    #[test]
    fn test_hover_is_pinned_during_drag() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        let b = panel(&mut ws, root, Rect::new(300.0, 300.0, 350.0, 350.0));
        ws.set_selected(Some(a));

        down(&mut ws, 120.0, 120.0);
        assert_eq!(ws.mode(), EditMode::Move);
        assert!(!ws.set_hovered(Some(b)));
        assert_eq!(ws.hovered(), Some(a));

        motion(&mut ws, 130.0, 130.0);
        assert_eq!(ws.tree().get(a).unwrap().position, Point::new(110.0, 110.0));
        assert_eq!(ws.tree().get(b).unwrap().position, Point::new(300.0, 300.0));

        up(&mut ws, 130.0, 130.0);
        assert!(ws.set_hovered(Some(b)));
    }

    #[test]
    fn test_lock_ignores_foreign_handles() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        ws.set_locked(root, true);
        assert!(!ws.is_locked(root));

        ws.remove_widget(a).unwrap();
        ws.set_locked(a, true);
        assert!(!ws.is_locked(a));
    }

    #[test]
    fn test_scroll_steps_through_siblings() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 20.0, 20.0));
        let b = panel(&mut ws, root, Rect::new(30.0, 10.0, 40.0, 20.0));
        let c = panel(&mut ws, root, Rect::new(50.0, 10.0, 60.0, 20.0));
        let scroll = |ws: &mut EditorWorkspace, dy: f64| {
            ws.handle_pointer(PointerEvent::Scroll {
                position: Point::ZERO,
                delta: Vec2::new(0.0, dy),
            });
        };

        scroll(&mut ws, -1.0);
        assert_eq!(ws.selected(), Some(a));
        scroll(&mut ws, -1.0);
        assert_eq!(ws.selected(), Some(b));
        scroll(&mut ws, -1.0);
        scroll(&mut ws, -1.0);
        assert_eq!(ws.selected(), Some(c));
        scroll(&mut ws, 1.0);
        assert_eq!(ws.selected(), Some(b));
    }

    #[test]
    fn test_cut_paste_and_copy() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        panel(&mut ws, a, Rect::new(5.0, 5.0, 10.0, 10.0));
        ws.set_selected(Some(a));

        ws.handle_key(KeyEvent::release(Key::char('x'), Modifiers::CTRL));
        assert!(ws.children().is_empty());
        assert!(ws.has_clipboard());

        ws.handle_key(KeyEvent::release(Key::char('v'), Modifiers::CTRL));
        let pasted = ws.selected().unwrap();
        assert_eq!(ws.tree().get(pasted).unwrap().name, "panel_0");
        assert_eq!(ws.tree().children(pasted).len(), 1);

        ws.handle_key(KeyEvent::release(Key::char('c'), Modifiers::CTRL));
        ws.set_selected(None);
        let copy = ws.paste().unwrap();
        assert_ne!(ws.tree().get(copy).unwrap().name, "panel_0");
        assert_eq!(ws.children().len(), 2);
    }

    #[test]
    fn test_undo_redo_restores_geometry_and_locks() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(100.0, 100.0, 150.0, 150.0));
        ws.set_locked(a, true);
        ws.clear_history();
        ws.set_position(a, Point::new(0.0, 0.0)).unwrap();
        ws.set_selected(Some(a));
        let selections = count_selection(&mut ws);

        assert!(ws.undo());
        assert_eq!(ws.selected(), None);
        assert_eq!(*selections.borrow(), vec![None]);
        let restored = ws.children()[0];
        assert_eq!(
            ws.tree().get(restored).unwrap().position,
            Point::new(100.0, 100.0)
        );
        assert!(ws.is_locked(restored));

        assert!(ws.redo());
        let redone = ws.children()[0];
        assert_eq!(ws.tree().get(redone).unwrap().position, Point::ZERO);
        assert!(!ws.redo());
    }

    #[test]
    fn test_bring_to_front() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        let a = panel(&mut ws, root, Rect::new(10.0, 10.0, 60.0, 60.0));
        let b = panel(&mut ws, root, Rect::new(20.0, 20.0, 70.0, 70.0));
        ws.set_selected(Some(a));
        ws.handle_key(KeyEvent::release(Key::char('b'), Modifiers::CTRL));
        assert_eq!(ws.children(), &[b, a]);
    }

    #[test]
    fn test_create_widget_names() {
        let mut ws = workspace();
        let first = ws
            .create_widget(WidgetKind::Button, None, Point::new(5.0, 5.0))
            .unwrap();
        let second = ws
            .create_widget(WidgetKind::Button, None, Point::new(5.0, 50.0))
            .unwrap();
        assert_eq!(ws.tree().get(first).unwrap().name, "button_0");
        assert_eq!(ws.tree().get(second).unwrap().caption, "button_1");
        assert_eq!(ws.selected(), Some(second));
        assert_eq!(ws.tree().get(first).unwrap().size, Size::new(100.0, 30.0));
    }

    #[test]
    fn test_rename_keeps_names_unique() {
        let mut ws = workspace();
        let a = ws.create_widget(WidgetKind::Label, None, Point::ZERO).unwrap();
        let b = ws.create_widget(WidgetKind::Label, None, Point::ZERO).unwrap();
        assert_eq!(ws.rename(a, "title").unwrap(), "title");
        assert_eq!(ws.rename(b, "title").unwrap(), "label_0");
    }

    #[test]
    fn test_reset_and_children_changed() {
        let mut ws = workspace();
        let changes = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&changes);
        ws.on_children_changed(move || *sink.borrow_mut() += 1);

        let a = ws.create_widget(WidgetKind::Panel, None, Point::ZERO).unwrap();
        assert_eq!(*changes.borrow(), 1);
        ws.set_hovered(Some(a));
        ws.handle_key(KeyEvent::release(Key::char('n'), Modifiers::CTRL));
        assert!(ws.children().is_empty());
        assert_eq!(ws.selected(), None);
        assert_eq!(ws.hovered(), None);
        assert_eq!(*changes.borrow(), 2);
        assert!(!ws.can_undo());
    }

    #[test]
    fn test_preview() {
        let mut ws = workspace();
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shown);
        ws.on_preview(move |id| sink.borrow_mut().push(id));

        ws.preview();
        assert!(shown.borrow().is_empty());

        let a = ws.create_widget(WidgetKind::Window, None, Point::ZERO).unwrap();
        ws.handle_key(KeyEvent::release(Key::char('r'), Modifiers::CTRL));
        assert_eq!(*shown.borrow(), vec![a]);
    }

    #[test]
    fn test_selection_is_limited_to_workspace() {
        let mut ws = workspace();
        let root = ws.workspace_id();
        assert!(!ws.set_selected(Some(root)));
        assert_eq!(ws.selected(), None);

        let mut other = WidgetTree::new();
        let stray = other.insert_root(Widget::new(WidgetKind::Panel));
        assert!(!ws.set_selected(Some(stray)));
    }

    #[test]
    fn test_multiple_selection_observers_in_order() {
        let mut ws = workspace();
        let a = ws.create_widget(WidgetKind::Panel, None, Point::ZERO).unwrap();
        ws.set_selected(None);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let sink = Rc::clone(&order);
            ws.on_selection_changed(move |s| sink.borrow_mut().push((tag, s)));
        }
        ws.set_selected(Some(a));
        assert_eq!(
            *order.borrow(),
            vec![(0, Some(a)), (1, Some(a)), (2, Some(a))]
        );
    }
}
