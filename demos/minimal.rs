// Minimal example: a tiny in-memory forest rendered into a buffer.
use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::text::Text;
use ratatui::widgets::StatefulWidget;

use tui_treeview::{NodeState, TreeAction, TreeModel, TreeView, TreeViewState, TreeViewStyle};

// Arena of nodes addressed by index.
struct Model {
    roots: Vec<usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    names: Vec<&'static str>,
    states: Vec<NodeState>,
}

impl Model {
    // root -> {alpha, beta -> {gamma}}
    fn new() -> Self {
        let collapsible = NodeState::COLLAPSIBLE;
        Self {
            roots: vec![0],
            parents: vec![None, Some(0), Some(0), Some(2)],
            children: vec![vec![1, 2], vec![], vec![3], vec![]],
            names: vec!["root", "alpha", "beta", "gamma"],
            states: vec![collapsible, NodeState::empty(), collapsible, NodeState::empty()],
        }
    }
}

// The widget queries and flags the tree through this trait only.
impl TreeModel for Model {
    type Id = usize;

    fn roots(&self) -> &[usize] {
        &self.roots
    }

    fn parent(&self, id: usize) -> Option<usize> {
        self.parents[id]
    }

    fn children(&self, id: usize) -> &[usize] {
        &self.children[id]
    }

    fn state(&self, id: usize) -> NodeState {
        self.states[id]
    }

    fn set_state(&mut self, id: usize, state: NodeState) {
        self.states[id] = state;
    }

    fn body(&self, id: usize) -> Text<'_> {
        Text::raw(self.names[id])
    }
}

fn print(buffer: &Buffer) {
    for row in buffer.content.chunks(usize::from(buffer.area.width)) {
        let line: String = row.iter().map(ratatui::buffer::Cell::symbol).collect();
        println!("{}", line.trim_end());
    }
}

fn main() {
    let mut model = Model::new();
    // State holds viewport and cursor and must live across frames.
    let mut state = TreeViewState::new();
    let area = Rect::new(0, 0, 30, 6);
    state.handle_action(&mut model, TreeAction::Resize { width: 30, height: 6 });

    let mut buffer = Buffer::empty(area);
    TreeView::new(&model, TreeViewStyle::default())
        .expander(true)
        .render(area, &mut buffer, &mut state);
    print(&buffer);

    // Collapse `beta`.
    state.handle_action(&mut model, TreeAction::MoveDown(2));
    state.handle_action(&mut model, TreeAction::ToggleExpand);

    let mut buffer = Buffer::empty(area);
    TreeView::new(&model, TreeViewStyle::default())
        .expander(true)
        .render(area, &mut buffer, &mut state);
    println!();
    print(&buffer);
}
