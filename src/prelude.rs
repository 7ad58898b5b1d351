pub use crate::{
    ConnectorStyle, NoConnectorStyle, NodeState, SymbolSet, TreeAction, TreeEvent, TreeModel,
    TreeSymbols, TreeView, TreeViewState, TreeViewStyle,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, TreeKeyBindings};
