//! In-memory forest shared by the unit tests.

use ratatui::text::Text;

use crate::model::{NodeState, TreeModel};

pub struct TestNode {
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub state: NodeState,
}

#[derive(Default)]
pub struct TestForest {
    pub roots: Vec<usize>,
    pub nodes: Vec<TestNode>,
}

impl TestForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; `parent == None` appends a root. Parents become collapsible.
    pub fn add(&mut self, parent: Option<usize>, name: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TestNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            state: NodeState::empty(),
        });
        match parent {
            Some(parent) => {
                self.nodes[parent].children.push(id);
                self.nodes[parent].state |= NodeState::COLLAPSIBLE;
            }
            None => self.roots.push(id),
        }
        id
    }

    pub fn with_state(&mut self, id: usize, state: NodeState) -> &mut Self {
        self.nodes[id].state |= state;
        self
    }

    pub fn id(&self, name: &str) -> usize {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .unwrap_or_else(|| panic!("no node named {name}"))
    }

    pub fn names(&self, ids: &[usize]) -> Vec<&str> {
        ids.iter().map(|id| self.nodes[*id].name.as_str()).collect()
    }
}

impl TreeModel for TestForest {
    type Id = usize;

    fn roots(&self) -> &[usize] {
        &self.roots
    }

    fn parent(&self, id: usize) -> Option<usize> {
        self.nodes[id].parent
    }

    fn children(&self, id: usize) -> &[usize] {
        &self.nodes[id].children
    }

    fn state(&self, id: usize) -> NodeState {
        self.nodes[id].state
    }

    fn set_state(&mut self, id: usize, state: NodeState) {
        self.nodes[id].state = state;
    }

    fn body(&self, id: usize) -> Text<'_> {
        Text::raw(self.nodes[id].name.as_str())
    }
}

/// Builds the fixture drawn below (`tmp` is the only root):
///
/// ```text
/// └─ tmp
///    ├─ example1
///    └─ test
///       ├─ example
///       │  ├─ file2
///       │  ├─ file4
///       │  └─ lastchild
///       │     └─ file
///       ├─ file1
///       ├─ file3
///       └─ file5
/// ```
pub fn tree_one() -> TestForest {
    let mut forest = TestForest::new();
    let tmp = forest.add(None, "tmp");
    forest.add(Some(tmp), "example1");
    let test = forest.add(Some(tmp), "test");
    let example = forest.add(Some(test), "example");
    forest.add(Some(example), "file2");
    forest.add(Some(example), "file4");
    let lastchild = forest.add(Some(example), "lastchild");
    forest.add(Some(lastchild), "file");
    forest.add(Some(test), "file1");
    forest.add(Some(test), "file3");
    forest.add(Some(test), "file5");
    forest
}

/// `root{ exampleLeaf, test{ file1, file2 } }`
pub fn small_forest() -> TestForest {
    let mut forest = TestForest::new();
    let root = forest.add(None, "root");
    forest.add(Some(root), "exampleLeaf");
    let test = forest.add(Some(root), "test");
    forest.add(Some(test), "file1");
    forest.add(Some(test), "file2");
    forest
}
