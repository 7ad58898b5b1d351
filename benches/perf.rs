use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::text::Text;
use ratatui::widgets::StatefulWidget;

use tui_treeview::{
    NodeState, TreeAction, TreeModel, TreeView, TreeViewState, TreeViewStyle, VisibleIter,
    count_visible, node_at,
};

struct Node {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    state: NodeState,
}

struct Forest {
    roots: Vec<usize>,
    nodes: Vec<Node>,
}

impl Forest {
    // `roots` trees, each `fanout` wide and `levels` deep.
    fn build(roots: usize, fanout: usize, levels: usize) -> Self {
        let mut forest = Self {
            roots: Vec::new(),
            nodes: Vec::new(),
        };
        for _ in 0..roots {
            forest.grow(None, fanout, levels);
        }
        forest
    }

    fn grow(&mut self, parent: Option<usize>, fanout: usize, levels: usize) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: format!("node-{id}"),
            parent,
            children: Vec::new(),
            state: NodeState::empty(),
        });
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        if levels > 0 {
            self.nodes[id].state |= NodeState::COLLAPSIBLE;
            for _ in 0..fanout {
                self.grow(Some(id), fanout, levels - 1);
            }
        }
    }
}

impl TreeModel for Forest {
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

fn visible_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible");
    for levels in [3, 5] {
        let forest = Forest::build(4, 6, levels);
        let count = count_visible(&forest, forest.roots());
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(BenchmarkId::new("count", count), |b| {
            b.iter(|| count_visible(black_box(&forest), forest.roots()));
        });
        group.bench_function(BenchmarkId::new("node_at_last", count), |b| {
            b.iter(|| node_at(black_box(&forest), forest.roots(), count - 1));
        });
        group.bench_function(BenchmarkId::new("iterate", count), |b| {
            b.iter(|| VisibleIter::new(black_box(&forest)).count());
        });
    }
    group.finish();
}

fn render_window(c: &mut Criterion) {
    let mut forest = Forest::build(4, 6, 5);
    let area = Rect::new(0, 0, 120, 50);
    let mut state = TreeViewState::new();
    state.handle_action(
        &mut forest,
        TreeAction::Resize {
            width: area.width,
            height: area.height,
        },
    );

    let mut group = c.benchmark_group("render");
    for (name, rows) in [("top", 0), ("middle", 20_000), ("bottom", usize::MAX / 2)] {
        state.handle_action(&mut forest, TreeAction::GotoTop);
        state.handle_action(&mut forest, TreeAction::MoveDown(rows));
        group.bench_function(name, |b| {
            let mut buffer = Buffer::empty(area);
            b.iter(|| {
                TreeView::new(&forest, TreeViewStyle::default()).render(
                    area,
                    &mut buffer,
                    &mut state,
                );
                black_box(&buffer);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, visible_sequence, render_window);
criterion_main!(benches);
