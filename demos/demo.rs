use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{LevelFilter, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Borders;
use ratatui::{DefaultTerminal, Frame};
use simplelog::{Config, WriteLogger};

use tui_treeview::{
    NodeState, SymbolSet, TreeKeyBindings, TreeModel, TreeView, TreeViewState, TreeViewStyle,
};

const DEPTH_COLORS: [Color; 4] = [
    Color::Rgb(136, 192, 208),
    Color::Rgb(163, 190, 140),
    Color::Rgb(235, 203, 139),
    Color::Rgb(180, 142, 173),
];

struct Node {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    modified: String,
    is_dir: bool,
    state: NodeState,
}

struct FsModel {
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

impl FsModel {
    fn push_node(&mut self, node: Node) -> usize {
        let id = self.nodes.len();
        if let Some(parent) = node.parent {
            self.nodes[parent].children.push(id);
            self.nodes[parent].state |= NodeState::COLLAPSIBLE;
        } else {
            self.roots.push(id);
        }
        self.nodes.push(node);
        id
    }

    fn set_dotfiles_hidden(&mut self, hidden: bool) {
        for node in &mut self.nodes {
            if node.name.starts_with('.') {
                node.state.set(NodeState::HIDDEN, hidden);
            }
        }
    }
}

impl TreeModel for FsModel {
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
        let node = &self.nodes[id];
        let name_style = if node.is_dir {
            Style::default()
                .fg(Color::Rgb(129, 161, 193))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Text::from(vec![
            Line::from(Span::styled(node.name.as_str(), name_style)),
            Line::from(Span::styled(
                node.modified.as_str(),
                Style::default().fg(Color::Rgb(110, 120, 140)),
            )),
        ])
    }
}

struct EntryInfo {
    name: String,
    path: PathBuf,
    metadata: fs::Metadata,
}

struct DemoArgs {
    root: PathBuf,
    max_depth: usize,
}

impl DemoArgs {
    fn usage() {
        eprintln!("Usage: demo [PATH] [DEPTH]");
        eprintln!("  PATH   Root directory (default: current dir)");
        eprintln!("  DEPTH  Max depth from root (default: 2)");
        eprintln!("Keys: j/k move, Enter toggles, t cycles glyphs, . hides dotfiles, q quits");
    }

    fn parse() -> Self {
        let mut path: Option<PathBuf> = None;
        let mut depth: Option<usize> = None;

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "-h" | "--help" => {
                    Self::usage();
                    std::process::exit(0);
                }
                _ if path.is_none() => path = Some(PathBuf::from(arg)),
                _ => depth = arg.parse().ok(),
            }
        }

        let root =
            path.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        Self {
            root,
            max_depth: depth.unwrap_or(2),
        }
    }
}

fn build_model(root: &Path, max_depth: usize) -> io::Result<FsModel> {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let metadata = fs::symlink_metadata(&root)?;

    let mut model = FsModel {
        nodes: Vec::new(),
        roots: Vec::new(),
    };
    let root_id = model.push_node(node_from_meta(root.display().to_string(), None, &metadata));
    if metadata.is_dir() {
        build_children(&mut model, root_id, &root, 0, max_depth);
    }
    Ok(model)
}

fn build_children(model: &mut FsModel, parent: usize, path: &Path, depth: usize, max_depth: usize) {
    if depth >= max_depth {
        return;
    }

    let Ok(read_dir) = fs::read_dir(path) else {
        return;
    };
    let mut entries: Vec<EntryInfo> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let path = entry.path();
            let metadata = fs::symlink_metadata(&path).ok()?;
            let name = entry.file_name().to_string_lossy().to_string();
            Some(EntryInfo {
                name,
                path,
                metadata,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        b.metadata
            .is_dir()
            .cmp(&a.metadata.is_dir())
            .then_with(|| a.name.cmp(&b.name))
    });

    for entry in entries {
        let is_dir = entry.metadata.is_dir();
        let id = model.push_node(node_from_meta(entry.name, Some(parent), &entry.metadata));
        if is_dir {
            build_children(model, id, &entry.path, depth + 1, max_depth);
        }
    }
}

fn node_from_meta(name: String, parent: Option<usize>, metadata: &fs::Metadata) -> Node {
    Node {
        name,
        parent,
        children: Vec::new(),
        modified: format_modified(metadata),
        is_dir: metadata.is_dir(),
        state: NodeState::MULTI_LINE,
    }
}

fn format_modified(metadata: &fs::Metadata) -> String {
    match metadata.modified() {
        Ok(time) => {
            let datetime: DateTime<Local> = DateTime::from(time);
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        Err(_) => "-".to_string(),
    }
}

struct App {
    model: FsModel,
    state: TreeViewState<usize>,
    bindings: TreeKeyBindings,
    style: TreeViewStyle<'static>,
    symbols: SymbolSet,
    hide_dotfiles: bool,
}

impl App {
    fn render(&mut self, frame: &mut Frame) {
        let widget = TreeView::new(&self.model, self.style.clone())
            .symbols(self.symbols.symbols())
            .connector_style(|depth: usize, _glyph: &str| {
                Style::default().fg(DEPTH_COLORS[depth % DEPTH_COLORS.len()])
            });
        frame.render_stateful_widget(widget, frame.area(), &mut self.state);
    }

    fn next_symbols(&mut self) {
        let index = SymbolSet::ALL
            .iter()
            .position(|set| *set == self.symbols)
            .map_or(0, |index| (index + 1) % SymbolSet::ALL.len());
        self.symbols = SymbolSet::ALL[index];
        info!("symbol set {}", self.symbols.name());
    }

    fn toggle_dotfiles(&mut self) {
        self.hide_dotfiles = !self.hide_dotfiles;
        self.model.set_dotfiles_hidden(self.hide_dotfiles);
        self.state.sync(&mut self.model);
        info!("dotfiles hidden: {}", self.hide_dotfiles);
    }
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let event = event::read()?;
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('t') => {
                    app.next_symbols();
                    continue;
                }
                KeyCode::Char('.') => {
                    app.toggle_dotfiles();
                    continue;
                }
                KeyCode::Char('e') => {
                    app.style.show_expander = !app.style.show_expander;
                    continue;
                }
                _ => {}
            }
        }
        let handled = app.state.handle_event(&mut app.model, &app.bindings, &event);
        if handled.is_handled() {
            log::debug!(
                "cursor {} offset {}",
                app.state.cursor(),
                app.state.offset()
            );
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let args = DemoArgs::parse();
    if !args.root.is_dir() {
        eprintln!("Path is not a directory: {}", args.root.display());
        return Ok(());
    }

    let log_file = File::create("tree-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .map_err(io::Error::other)?;

    let model = build_model(&args.root, args.max_depth)?;
    info!("loaded {} nodes from {}", model.nodes.len(), args.root.display());

    let style = TreeViewStyle {
        title: Some(Line::from(format!(
            "{} (depth {})",
            args.root.display(),
            args.max_depth
        ))),
        block_style: Style::default()
            .fg(Color::Rgb(221, 227, 235))
            .bg(Color::Rgb(24, 28, 36)),
        border_style: Style::default().fg(Color::Rgb(92, 110, 140)),
        highlight_style: Style::default()
            .bg(Color::Rgb(52, 66, 96))
            .add_modifier(Modifier::BOLD),
        line_style: Style::default().fg(Color::Rgb(86, 98, 120)),
        borders: Borders::ALL,
        show_expander: true,
        scrollbar: true,
    };

    let app = App {
        model,
        state: TreeViewState::new(),
        bindings: TreeKeyBindings::new(),
        style,
        symbols: SymbolSet::Normal,
        hide_dotfiles: false,
    };

    let terminal = ratatui::init();
    let result = run_app(terminal, app);
    ratatui::restore();
    result
}
