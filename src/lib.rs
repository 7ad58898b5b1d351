//! Collapsible tree view widget for ratatui that draws box-drawing connectors
//! (`│ ├─ └─`) in front of each node body.
//!
//! The host owns the nodes and exposes them through [`TreeModel`]; the widget keeps a
//! viewport and cursor in [`TreeViewState`] and renders the visible window with
//! [`TreeView`].
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `TreeViewState::handle_event`.
//! - `serde`: serde support for [`NodeState`] and [`SymbolSet`].

mod action;
mod connector;
mod glyphs;
#[cfg(feature = "keymap")]
mod keymap;
mod model;
pub mod prelude;
mod state;
mod style;
#[cfg(test)]
mod testing;
mod visible;
mod widget;

pub use action::{TreeAction, TreeEvent};
pub use connector::{
    Connector, RenderContext, connector_at, connectors, ellipsize, fit_spans, line_connectors,
};
pub use glyphs::{ConnectorStyle, NoConnectorStyle, SymbolSet, TreeSymbols};
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, TreeKeyBindings};
pub use model::{NodeState, TreeModel};
pub use state::TreeViewState;
pub use style::TreeViewStyle;
pub use visible::{
    MAX_DEPTH, VisibleIter, VisibleNode, ancestor, body_rows, count_visible, depth,
    effective_state, node_at, refresh_sibling_flags, sibling_state, siblings, visible_rows,
};
pub use widget::TreeView;
