//! Linearization of a forest into the visible pre-order sequence.
//!
//! Nothing here caches: every query walks the model as it is now, so toggles between
//! calls are always observed.

use smallvec::SmallVec;

use crate::model::{NodeState, TreeModel};

/// Upper bound for parent and child walks; deeper levels are treated as absent.
pub const MAX_DEPTH: usize = 256;

/// A node of the visible sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleNode<Id> {
    /// Zero-based position in the visible sequence.
    pub index: usize,
    pub id: Id,
    /// Number of ancestors (roots are at depth 0).
    pub depth: usize,
}

/// Returns the number of visible slots in `ids` and their expanded descendants.
pub fn count_visible<T: TreeModel>(model: &T, ids: &[T::Id]) -> usize {
    count_at_depth(model, ids, 0)
}

fn count_at_depth<T: TreeModel>(model: &T, ids: &[T::Id], depth: usize) -> usize {
    if depth >= MAX_DEPTH {
        log::warn!("tree deeper than {MAX_DEPTH} levels, truncating");
        return 0;
    }
    ids.iter()
        .copied()
        .map(|id| {
            let state = model.state(id);
            if state.is_hidden() {
                0
            } else if state.shows_children() {
                1 + count_at_depth(model, model.children(id), depth + 1)
            } else {
                1
            }
        })
        .sum()
}

/// Returns the node at `index` of the visible sequence, or `None` past its end.
pub fn node_at<T: TreeModel>(model: &T, ids: &[T::Id], index: usize) -> Option<T::Id> {
    let mut remaining = index;
    find_at_depth(model, ids, &mut remaining, 0)
}

fn find_at_depth<T: TreeModel>(
    model: &T,
    ids: &[T::Id],
    remaining: &mut usize,
    depth: usize,
) -> Option<T::Id> {
    if depth >= MAX_DEPTH {
        return None;
    }
    for id in ids.iter().copied() {
        let state = model.state(id);
        if state.is_hidden() {
            continue;
        }
        if *remaining == 0 {
            return Some(id);
        }
        *remaining -= 1;
        if state.shows_children()
            && let Some(found) = find_at_depth(model, model.children(id), remaining, depth + 1)
        {
            return Some(found);
        }
    }
    None
}

/// Pre-order iterator over the visible nodes of a forest.
pub struct VisibleIter<'a, T: TreeModel> {
    model: &'a T,
    // One sibling cursor per open level.
    stack: SmallVec<[std::slice::Iter<'a, T::Id>; 8]>,
    index: usize,
}

impl<'a, T: TreeModel> VisibleIter<'a, T> {
    pub fn new(model: &'a T) -> Self {
        Self::over(model, model.roots())
    }

    /// Iterates over `ids` as if they were the roots.
    pub fn over(model: &'a T, ids: &'a [T::Id]) -> Self {
        let mut stack = SmallVec::new();
        stack.push(ids.iter());
        Self {
            model,
            stack,
            index: 0,
        }
    }
}

impl<T: TreeModel> Iterator for VisibleIter<'_, T> {
    type Item = VisibleNode<T::Id>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some(id) = level.next().copied() else {
                self.stack.pop();
                continue;
            };
            let state = self.model.state(id);
            if state.is_hidden() {
                continue;
            }
            let depth = self.stack.len() - 1;
            let index = self.index;
            self.index += 1;
            if state.shows_children() {
                if self.stack.len() < MAX_DEPTH {
                    self.stack.push(self.model.children(id).iter());
                } else {
                    log::warn!("tree deeper than {MAX_DEPTH} levels, truncating");
                }
            }
            return Some(VisibleNode { index, id, depth });
        }
    }
}

/// Display rows taken by the body of `id`; an empty body still takes one.
pub fn body_rows<T: TreeModel>(model: &T, id: T::Id) -> usize {
    model.body(id).lines.len().max(1)
}

/// Returns the number of display rows of the whole visible sequence.
pub fn visible_rows<T: TreeModel>(model: &T) -> usize {
    VisibleIter::new(model)
        .map(|node| body_rows(model, node.id))
        .sum()
}

/// Returns the number of ancestors of `id`, capped at [`MAX_DEPTH`].
pub fn depth<T: TreeModel>(model: &T, id: T::Id) -> usize {
    let mut depth = 0;
    let mut current = id;
    while let Some(parent) = model.parent(current) {
        if depth >= MAX_DEPTH {
            log::warn!("parent chain longer than {MAX_DEPTH}, possible cycle");
            break;
        }
        depth += 1;
        current = parent;
    }
    depth
}

/// Walks `steps` parents up from `id`.
pub fn ancestor<T: TreeModel>(model: &T, id: T::Id, steps: usize) -> Option<T::Id> {
    let mut current = id;
    for _ in 0..steps.min(MAX_DEPTH) {
        current = model.parent(current)?;
    }
    Some(current)
}

/// Returns the sibling list `id` belongs to (the roots for top-level nodes).
pub fn siblings<T: TreeModel>(model: &T, id: T::Id) -> &[T::Id] {
    model
        .parent(id)
        .map_or_else(|| model.roots(), |parent| model.children(parent))
}

/// Derives `LAST_CHILD` and `HAS_PREVIOUS_SIBLING` from the current non-hidden siblings.
pub fn sibling_state<T: TreeModel>(model: &T, id: T::Id) -> NodeState {
    let siblings = siblings(model, id);
    let Some(pos) = siblings.iter().position(|sibling| *sibling == id) else {
        // Not listed by its parent: draw it as a lone child.
        return NodeState::LAST_CHILD;
    };
    let shown = |sibling: &T::Id| !model.state(*sibling).is_hidden();

    let mut state = NodeState::empty();
    state.set(
        NodeState::HAS_PREVIOUS_SIBLING,
        siblings[..pos].iter().any(shown),
    );
    state.set(NodeState::LAST_CHILD, !siblings[pos + 1..].iter().any(shown));
    state
}

/// Node state with the sibling bits replaced by their derived values.
pub fn effective_state<T: TreeModel>(model: &T, id: T::Id) -> NodeState {
    model
        .state(id)
        .difference(NodeState::SIBLING_BITS)
        .union(sibling_state(model, id))
}

/// Writes the derived sibling bits onto every visible node.
pub fn refresh_sibling_flags<T: TreeModel>(model: &mut T) {
    let view: &T = model;
    let updates: Vec<_> = VisibleIter::new(view)
        .map(|node| (node.id, effective_state(view, node.id)))
        .collect();
    for (id, state) in updates {
        if model.state(id) != state {
            model.set_state(id, state);
        }
    }
}
