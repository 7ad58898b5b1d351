use ratatui::text::Line;

use crate::action::{TreeAction, TreeEvent};
use crate::connector::RenderContext;
use crate::glyphs::{ConnectorStyle, TreeSymbols};
use crate::model::{NodeState, TreeModel};
use crate::style::TreeViewStyle;
use crate::visible::{self, VisibleIter};

#[cfg(feature = "keymap")]
use crate::keymap::TreeKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::Event;

/// Viewport and cursor over the visible sequence of a [`TreeModel`].
///
/// `offset` is the first visible node drawn, `cursor` the selected one; both index the
/// visible sequence and are re-clamped whenever its length may have changed. The window
/// is measured in display rows, so multi-line bodies shrink the number of nodes shown.
///
/// Rendering through [`TreeView`](crate::TreeView) re-clamps without touching node
/// flags; hosts that read `SELECTED` should call [`sync`](Self::sync) after the render
/// area changes size.
#[derive(Clone, Debug)]
pub struct TreeViewState<Id> {
    width: u16,
    height: u16,
    offset: usize,
    cursor: usize,
    // Node currently carrying the SELECTED flag.
    selected: Option<Id>,
    focused: bool,
}

impl<Id: Copy + Eq> Default for TreeViewState<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Copy + Eq> TreeViewState<Id> {
    /// Creates a focused state with a zero-sized viewport.
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            offset: 0,
            cursor: 0,
            selected: None,
            focused: true,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Index of the first visible node in the viewport.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Index of the selected node in the visible sequence.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the node carrying the `SELECTED` flag, if any.
    pub const fn selected_id(&self) -> Option<Id> {
        self.selected
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub const fn focus(&mut self) {
        self.focused = true;
    }

    /// Stops reacting to navigation; resizes are still applied.
    pub const fn blur(&mut self) {
        self.focused = false;
    }

    /// Returns the number of visible nodes.
    pub fn visible_len<T: TreeModel<Id = Id>>(&self, model: &T) -> usize {
        visible::count_visible(model, model.roots())
    }

    /// Returns the node under the cursor, resolved against the current model.
    pub fn cursor_node<T: TreeModel<Id = Id>>(&self, model: &T) -> Option<Id> {
        visible::node_at(model, model.roots(), self.cursor)
    }

    /// Updates the viewport size and re-clamps cursor and offset.
    pub fn resize<T: TreeModel<Id = Id>>(&mut self, model: &mut T, width: u16, height: u16) {
        log::debug!("tree viewport resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.reclamp(model);
    }

    /// Moves the cursor by `delta` rows, scrolling just enough to keep it in view.
    pub fn move_by<T: TreeModel<Id = Id>>(&mut self, model: &mut T, delta: isize) {
        let count = self.visible_len(model);
        if count == 0 {
            return;
        }
        let target = self.cursor.saturating_add_signed(delta).min(count - 1);
        self.set_cursor(model, target, count);
    }

    pub fn move_up<T: TreeModel<Id = Id>>(&mut self, model: &mut T, rows: usize) {
        self.move_by(model, -to_delta(rows));
    }

    pub fn move_down<T: TreeModel<Id = Id>>(&mut self, model: &mut T, rows: usize) {
        self.move_by(model, to_delta(rows));
    }

    pub fn page_up<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        self.move_up(model, self.page_rows());
    }

    pub fn page_down<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        self.move_down(model, self.page_rows());
    }

    pub fn half_page_up<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        self.move_up(model, self.half_page_rows());
    }

    pub fn half_page_down<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        self.move_down(model, self.half_page_rows());
    }

    pub fn goto_top<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        let count = self.visible_len(model);
        if count > 0 {
            self.set_cursor(model, 0, count);
        }
    }

    pub fn goto_bottom<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        let count = self.visible_len(model);
        if count > 0 {
            self.set_cursor(model, count - 1, count);
        }
    }

    /// Flips `COLLAPSED` on the node under the cursor.
    ///
    /// Returns `false` (and changes nothing) when that node is not collapsible.
    pub fn toggle_expand<T: TreeModel<Id = Id>>(&mut self, model: &mut T) -> bool {
        let Some(id) = self.cursor_node(model) else {
            return false;
        };
        let state = model.state(id);
        if !state.is_collapsible() {
            return false;
        }
        log::trace!(
            "{} node at row {}",
            if state.is_expanded() { "collapsing" } else { "expanding" },
            self.cursor
        );
        model.set_state(id, state ^ NodeState::COLLAPSED);
        self.reclamp(model);
        true
    }

    /// Recomputes derived flags after the host changed the model.
    ///
    /// Applies sibling bits, moves `SELECTED` to the cursor node and marks nodes
    /// outside the viewport with `SKIP_RENDER`.
    pub fn sync<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        visible::refresh_sibling_flags(model);
        self.reclamp(model);

        let height = usize::from(self.height);
        let mut used = 0;
        let view: &T = model;
        let updates: Vec<_> = VisibleIter::new(view)
            .filter_map(|node| {
                let inside = node.index >= self.offset && used < height;
                if inside {
                    used += visible::body_rows(view, node.id);
                }
                let outside = !inside;
                (view.state(node.id).skip_render() != outside).then_some((node.id, outside))
            })
            .collect();
        for (id, outside) in updates {
            model.update_state(id, NodeState::SKIP_RENDER, outside);
        }
    }

    /// Applies an input event.
    pub fn handle_action<T: TreeModel<Id = Id>>(
        &mut self,
        model: &mut T,
        action: TreeAction,
    ) -> TreeEvent {
        if let TreeAction::Resize { width, height } = action {
            self.resize(model, width, height);
            return TreeEvent::Handled;
        }
        if !self.focused || self.visible_len(model) == 0 {
            return TreeEvent::Unhandled;
        }

        match action {
            TreeAction::MoveUp(rows) => self.move_up(model, rows),
            TreeAction::MoveDown(rows) => self.move_down(model, rows),
            TreeAction::PageUp => self.page_up(model),
            TreeAction::PageDown => self.page_down(model),
            TreeAction::HalfPageUp => self.half_page_up(model),
            TreeAction::HalfPageDown => self.half_page_down(model),
            TreeAction::GotoTop => self.goto_top(model),
            TreeAction::GotoBottom => self.goto_bottom(model),
            TreeAction::ToggleExpand => {
                if !self.toggle_expand(model) {
                    return TreeEvent::Unhandled;
                }
            }
            TreeAction::Resize { .. } => {}
        }
        TreeEvent::Handled
    }

    /// Resolves a terminal event through `bindings` and applies the resulting action.
    #[cfg(feature = "keymap")]
    pub fn handle_event<T: TreeModel<Id = Id>>(
        &mut self,
        model: &mut T,
        bindings: &TreeKeyBindings,
        event: &Event,
    ) -> TreeEvent {
        bindings
            .resolve_event(event)
            .map_or(TreeEvent::Unhandled, |action| self.handle_action(model, action))
    }

    /// Renders the viewport window: at most `height` lines of at most `width` cells.
    pub fn render_lines<'a, T, S>(
        &self,
        model: &'a T,
        symbols: TreeSymbols<'a>,
        connector_style: &S,
        style: &TreeViewStyle<'_>,
    ) -> Vec<Line<'a>>
    where
        T: TreeModel<Id = Id>,
        S: ConnectorStyle,
    {
        let height = usize::from(self.height);
        if height == 0 || self.width == 0 {
            return Vec::new();
        }
        let ctx = RenderContext {
            symbols,
            connector_style,
            line_style: style.line_style,
            expander: style.show_expander,
            width: usize::from(self.width),
        };

        let mut lines = Vec::with_capacity(height);
        for node in VisibleIter::new(model).skip(self.offset) {
            let node_lines = ctx.node_lines(model, node.id);
            if self.focused && node.index == self.cursor {
                lines.extend(
                    node_lines
                        .into_iter()
                        .map(|line| line.patch_style(style.highlight_style)),
                );
            } else {
                lines.extend(node_lines);
            }
            if lines.len() >= height {
                break;
            }
        }
        lines.truncate(height);
        lines
    }

    /// Adopts a new viewport size without touching node flags.
    pub(crate) fn fit_viewport<T: TreeModel<Id = Id>>(
        &mut self,
        model: &T,
        width: u16,
        height: u16,
    ) {
        self.width = width;
        self.height = height;
        let count = self.visible_len(model);
        self.clamp(model, count);
    }

    /// Returns the display rows above the viewport and the rows of the whole sequence.
    pub fn row_span<T: TreeModel<Id = Id>>(&self, model: &T) -> (usize, usize) {
        VisibleIter::new(model).fold((0, 0), |(above, total), node| {
            let rows = visible::body_rows(model, node.id);
            if node.index < self.offset {
                (above + rows, total + rows)
            } else {
                (above, total + rows)
            }
        })
    }

    fn page_rows(&self) -> usize {
        usize::from(self.height).max(1)
    }

    fn half_page_rows(&self) -> usize {
        (usize::from(self.height) / 2).max(1)
    }

    fn set_cursor<T: TreeModel<Id = Id>>(&mut self, model: &mut T, cursor: usize, count: usize) {
        log::trace!("tree cursor {} -> {cursor}", self.cursor);
        self.cursor = cursor;
        self.clamp(model, count);
        self.select(model);
    }

    fn reclamp<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        let count = self.visible_len(model);
        self.clamp(model, count);
        self.select(model);
    }

    // Keeps the cursor node's first row on screen and the bottom of the window filled.
    fn clamp<T: TreeModel<Id = Id>>(&mut self, model: &T, count: usize) {
        if count == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(count - 1);
        let height = usize::from(self.height).max(1);

        // Node-count bounds first: every node takes at least one row.
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        // Rows of the nodes from `start` to one window past the offset.
        let start = self.offset.saturating_sub(height);
        let rows: Vec<usize> = VisibleIter::new(model)
            .skip(start)
            .take(self.offset + height + 1 - start)
            .map(|node| visible::body_rows(model, node.id))
            .collect();
        let span = |from: usize, to: usize| -> usize {
            rows[from - start..=to - start].iter().sum()
        };

        while self.offset < self.cursor && span(self.offset, self.cursor) > height {
            self.offset += 1;
        }

        let last = start + rows.len() - 1;
        if last + 1 == count {
            while self.offset > start && span(self.offset - 1, last) <= height {
                self.offset -= 1;
            }
        }
    }

    // Moves the SELECTED flag to the node under the cursor.
    fn select<T: TreeModel<Id = Id>>(&mut self, model: &mut T) {
        let current = self.cursor_node(model);
        if current == self.selected {
            if let Some(id) = current
                && !model.state(id).is_selected()
            {
                model.update_state(id, NodeState::SELECTED, true);
            }
            return;
        }
        if let Some(previous) = self.selected {
            model.update_state(previous, NodeState::SELECTED, false);
        }
        if let Some(id) = current {
            model.update_state(id, NodeState::SELECTED, true);
        }
        self.selected = current;
    }
}

fn to_delta(rows: usize) -> isize {
    isize::try_from(rows).unwrap_or(isize::MAX)
}
