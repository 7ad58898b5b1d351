use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Borders;

/// Visual settings of the tree view.
#[derive(Clone)]
pub struct TreeViewStyle<'a> {
    pub title: Option<Line<'a>>,
    /// Base style of the whole area.
    pub block_style: Style,
    pub border_style: Style,
    /// Patched onto every line of the selected node while focused.
    pub highlight_style: Style,
    /// Base style of connector glyphs.
    pub line_style: Style,
    pub borders: Borders,
    /// Draws `⊞`/`⊟` (or the symbol set's markers) before collapsible bodies.
    pub show_expander: bool,
    /// Reserves the rightmost column for a scrollbar when the tree overflows.
    pub scrollbar: bool,
}

impl Default for TreeViewStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            block_style: Style::default(),
            border_style: Style::default(),
            highlight_style: Style::default(),
            line_style: Style::default(),
            borders: Borders::NONE,
            show_expander: false,
            scrollbar: false,
        }
    }
}
