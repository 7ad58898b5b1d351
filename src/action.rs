/// Input events the tree view reacts to.
///
/// Hosts translate raw terminal input into these (see `TreeKeyBindings` with the
/// `keymap` feature).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// The viewport changed size.
    Resize { width: u16, height: u16 },
    /// Move the cursor up by the given number of rows.
    MoveUp(usize),
    /// Move the cursor down by the given number of rows.
    MoveDown(usize),
    /// Move the cursor up by one viewport height.
    PageUp,
    /// Move the cursor down by one viewport height.
    PageDown,
    /// Move the cursor up by half a viewport height.
    HalfPageUp,
    /// Move the cursor down by half a viewport height.
    HalfPageDown,
    /// Select the first visible node.
    GotoTop,
    /// Select the last visible node.
    GotoBottom,
    /// Collapse or expand the node under the cursor.
    ToggleExpand,
}

/// Result of handling an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeEvent {
    /// The action was handled and state may have changed.
    Handled,
    /// The action was ignored (unfocused view, nothing to toggle).
    Unhandled,
}

impl TreeEvent {
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
