use bitflags::bitflags;
use ratatui::text::Text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-node display state.
    ///
    /// Every flag owns a fixed bit; values never depend on declaration order.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeState: u16 {
        /// Subtree is hidden from the visible sequence.
        const COLLAPSED = 1 << 0;
        /// Node has children and may be toggled.
        const COLLAPSIBLE = 1 << 1;
        /// Node and its whole subtree are excluded from display.
        const HIDDEN = 1 << 2;
        /// Node is under the cursor.
        const SELECTED = 1 << 3;
        /// Node is the last non-hidden entry of its sibling list.
        const LAST_CHILD = 1 << 4;
        /// Node is not the first non-hidden entry of its sibling list.
        const HAS_PREVIOUS_SIBLING = 1 << 5;
        /// Node body spans more than one display line.
        const MULTI_LINE = 1 << 6;
        /// Node lies outside the viewport window for the current cycle.
        const SKIP_RENDER = 1 << 7;
    }
}

impl NodeState {
    /// Bits recomputed from the sibling list on every traversal.
    pub const SIBLING_BITS: Self = Self::LAST_CHILD.union(Self::HAS_PREVIOUS_SIBLING);

    /// Returns `true` if every bit of `other` is set (`true` for the empty set).
    #[inline]
    pub const fn is(self, other: Self) -> bool {
        self.contains(other)
    }

    #[inline]
    pub const fn is_hidden(self) -> bool {
        self.contains(Self::HIDDEN)
    }

    #[inline]
    pub const fn is_expanded(self) -> bool {
        !self.contains(Self::COLLAPSED)
    }

    #[inline]
    pub const fn is_collapsible(self) -> bool {
        self.contains(Self::COLLAPSIBLE)
    }

    #[inline]
    pub const fn is_last_child(self) -> bool {
        self.contains(Self::LAST_CHILD)
    }

    #[inline]
    pub const fn is_selected(self) -> bool {
        self.contains(Self::SELECTED)
    }

    #[inline]
    pub const fn is_multi_line(self) -> bool {
        self.contains(Self::MULTI_LINE)
    }

    #[inline]
    pub const fn has_previous_sibling(self) -> bool {
        self.contains(Self::HAS_PREVIOUS_SIBLING)
    }

    #[inline]
    pub const fn skip_render(self) -> bool {
        self.contains(Self::SKIP_RENDER)
    }

    /// Returns `true` if the node's children take part in the visible sequence.
    #[inline]
    pub const fn shows_children(self) -> bool {
        self.is_collapsible() && self.is_expanded()
    }
}

/// Node contract required by the widget.
///
/// Nodes are addressed by a copyable id; the model owns them. The widget only reads
/// the tree shape and updates flags through [`TreeModel::set_state`].
///
/// A proper forest is expected:
/// - `parent` must agree with `children`;
/// - no cycles (walks are capped at [`MAX_DEPTH`](crate::MAX_DEPTH) levels and
///   render truncated output past it).
pub trait TreeModel {
    /// Node identifier type.
    type Id: Copy + Eq;

    /// Returns the top-level nodes in display order.
    fn roots(&self) -> &[Self::Id];
    /// Returns the owning node, or `None` for roots.
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;
    /// Returns the node's children in display order.
    fn children(&self, id: Self::Id) -> &[Self::Id];
    /// Returns the current state flags of the node.
    fn state(&self, id: Self::Id) -> NodeState;
    /// Replaces the state flags of the node.
    fn set_state(&mut self, id: Self::Id, state: NodeState);
    /// Returns the node body; each line becomes one display row.
    fn body(&self, id: Self::Id) -> Text<'_>;

    /// Sets or clears `flags` on the node, leaving other bits untouched.
    fn update_state(&mut self, id: Self::Id, flags: NodeState, value: bool) {
        let mut state = self.state(id);
        state.set(flags, value);
        self.set_state(id, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_matches_subsets() {
        let empty = NodeState::empty();
        assert!(empty.is(NodeState::empty()));
        assert!(NodeState::COLLAPSIBLE.is(NodeState::COLLAPSIBLE));
        assert!(!NodeState::COLLAPSED.is(NodeState::COLLAPSIBLE));
        assert!((NodeState::COLLAPSED | NodeState::COLLAPSIBLE).is(NodeState::COLLAPSIBLE));
        assert!(!NodeState::COLLAPSED.is(NodeState::COLLAPSED | NodeState::COLLAPSIBLE));
    }

    #[test]
    fn bits_are_fixed() {
        assert_eq!(NodeState::COLLAPSED.bits(), 1);
        assert_eq!(NodeState::COLLAPSIBLE.bits(), 2);
        assert_eq!(NodeState::HIDDEN.bits(), 4);
        assert_eq!(NodeState::SELECTED.bits(), 8);
        assert_eq!(NodeState::LAST_CHILD.bits(), 16);
        assert_eq!(NodeState::HAS_PREVIOUS_SIBLING.bits(), 32);
        assert_eq!(NodeState::MULTI_LINE.bits(), 64);
        assert_eq!(NodeState::SKIP_RENDER.bits(), 128);
    }

    #[test]
    fn flag_tests() {
        let state = NodeState::COLLAPSIBLE | NodeState::LAST_CHILD | NodeState::MULTI_LINE;
        assert!(state.is_expanded());
        assert!(state.shows_children());
        assert!(state.is_last_child());
        assert!(state.is_multi_line());
        assert!(!state.is_hidden());
        assert!(!state.is_selected());
        assert!(!state.has_previous_sibling());
        assert!(!state.skip_render());

        let collapsed = state | NodeState::COLLAPSED;
        assert!(!collapsed.is_expanded());
        assert!(!collapsed.shows_children());
    }
}
