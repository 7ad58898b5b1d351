use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
};

use crate::glyphs::{ConnectorStyle, NoConnectorStyle, TreeSymbols};
use crate::model::TreeModel;
use crate::state::TreeViewState;
use crate::style::TreeViewStyle;
use crate::visible;

/// Collapsible tree widget drawing box-drawing connectors in front of node bodies.
pub struct TreeView<'a, T, S = NoConnectorStyle>
where
    T: TreeModel,
    S: ConnectorStyle,
{
    model: &'a T,
    style: TreeViewStyle<'a>,
    symbols: TreeSymbols<'a>,
    connector_style: S,
}

impl<'a, T> TreeView<'a, T, NoConnectorStyle>
where
    T: TreeModel,
{
    pub const fn new(model: &'a T, style: TreeViewStyle<'a>) -> Self {
        Self {
            model,
            style,
            symbols: TreeSymbols::normal(),
            connector_style: NoConnectorStyle,
        }
    }

    /// Styles connector glyphs per depth, e.g. `|depth, _glyph| palette[depth % 4]`.
    pub fn connector_style<S>(self, connector_style: S) -> TreeView<'a, T, S>
    where
        S: ConnectorStyle,
    {
        TreeView {
            model: self.model,
            style: self.style,
            symbols: self.symbols,
            connector_style,
        }
    }
}

impl<'a, T, S> TreeView<'a, T, S>
where
    T: TreeModel,
    S: ConnectorStyle,
{
    pub fn symbols(mut self, symbols: TreeSymbols<'a>) -> Self {
        self.symbols = symbols;
        self
    }

    /// Shows the collapsed/expanded marker before collapsible bodies.
    pub const fn expander(mut self, show: bool) -> Self {
        self.style.show_expander = show;
        self
    }

    fn block(&self) -> Block<'a> {
        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block
            .style(self.style.block_style)
            .border_style(self.style.border_style)
    }

    // `position` and `total` are display rows, not nodes.
    #[inline]
    fn render_scrollbar(
        area: Rect,
        buf: &mut Buffer,
        position: usize,
        total: usize,
        viewport: usize,
    ) {
        let scroll_len = total.saturating_sub(viewport).saturating_add(1);
        let position = position.min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(viewport);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl<T, S> StatefulWidget for TreeView<'_, T, S>
where
    T: TreeModel,
    S: ConnectorStyle,
{
    type State = TreeViewState<T::Id>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let total = if self.style.scrollbar {
            visible::visible_rows(self.model)
        } else {
            0
        };
        let viewport = usize::from(inner.height);
        let overflow = self.style.scrollbar && total > viewport && inner.width > 1;
        let text_area = if overflow {
            Rect {
                width: inner.width - 1,
                ..inner
            }
        } else {
            inner
        };

        state.fit_viewport(self.model, text_area.width, text_area.height);
        let lines = state.render_lines(
            self.model,
            self.symbols,
            &self.connector_style,
            &self.style,
        );
        for (line, y) in lines.iter().zip(text_area.top()..text_area.bottom()) {
            let row = Rect {
                y,
                height: 1,
                ..text_area
            };
            buf.set_style(row, line.style);
            buf.set_line(text_area.x, y, line, text_area.width);
        }

        if overflow {
            let scrollbar_area = Rect {
                x: inner.right() - 1,
                width: 1,
                ..inner
            };
            let (above, total) = state.row_span(self.model);
            Self::render_scrollbar(scrollbar_area, buf, above, total, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};
    use ratatui::widgets::Borders;

    use crate::action::TreeAction;
    use crate::glyphs::SymbolSet;
    use crate::model::NodeState;
    use crate::testing::{TestForest, small_forest, tree_one};

    fn rows(buf: &Buffer) -> Vec<String> {
        buf.content
            .chunks(usize::from(buf.area.width))
            .map(|row| {
                row.iter()
                    .map(ratatui::buffer::Cell::symbol)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn renders_small_forest() {
        let mut forest = small_forest();
        let mut state = TreeViewState::new();
        state.handle_action(&mut forest, TreeAction::Resize { width: 20, height: 5 });

        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, TreeViewStyle::default()).render(area, &mut buf, &mut state);

        assert_eq!(
            rows(&buf),
            vec![
                " └─ root",
                "    ├─ exampleLeaf",
                "    └─ test",
                "       ├─ file1",
                "       └─ file2",
            ]
        );
    }

    #[test]
    fn highlight_covers_selected_row() {
        let mut forest = small_forest();
        let mut state = TreeViewState::new();
        state.handle_action(&mut forest, TreeAction::Resize { width: 20, height: 5 });
        state.handle_action(&mut forest, TreeAction::MoveDown(1));

        let style = TreeViewStyle {
            highlight_style: Style::new().bg(Color::Blue),
            ..TreeViewStyle::default()
        };
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, style).render(area, &mut buf, &mut state);

        assert_eq!(buf[(19, 1)].bg, Color::Blue);
        assert_eq!(buf[(0, 1)].bg, Color::Blue);
        assert_ne!(buf[(0, 0)].bg, Color::Blue);
        assert_ne!(buf[(0, 2)].bg, Color::Blue);
    }

    #[test]
    fn borders_shrink_the_viewport() {
        let forest = tree_one();
        let mut state = TreeViewState::new();
        let style = TreeViewStyle {
            borders: Borders::ALL,
            ..TreeViewStyle::default()
        };
        let area = Rect::new(0, 0, 24, 6);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, style)
            .symbols(SymbolSet::Rounded.symbols())
            .render(area, &mut buf, &mut state);

        assert_eq!((state.width(), state.height()), (22, 4));
        assert_eq!(rows(&buf)[1], format!("│{:<22}│", " ╰─ tmp"));
    }

    #[test]
    fn scrollbar_takes_last_column() {
        let forest = tree_one();
        let mut state = TreeViewState::new();
        let style = TreeViewStyle {
            scrollbar: true,
            ..TreeViewStyle::default()
        };
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, style).render(area, &mut buf, &mut state);

        assert_eq!(state.width(), 19);
        assert_ne!(buf[(19, 0)].symbol(), " ");
    }

    #[test]
    fn scrollbar_counts_body_rows() {
        let mut forest = TestForest::new();
        for name in ["a\n1", "b\n2", "c\n3"] {
            let id = forest.add(None, name);
            forest.with_state(id, NodeState::MULTI_LINE);
        }
        let mut state = TreeViewState::new();
        let style = TreeViewStyle {
            scrollbar: true,
            ..TreeViewStyle::default()
        };
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, style.clone()).render(area, &mut buf, &mut state);

        assert_eq!(state.width(), 19);
        assert_ne!(buf[(19, 0)].symbol(), " ");

        state.handle_action(&mut forest, TreeAction::GotoBottom);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, style).render(area, &mut buf, &mut state);
        assert_eq!(state.offset(), 1);
        let lines = rows(&buf);
        assert!(lines[2].starts_with(" └─ c "));
        assert!(lines[3].starts_with("    3 "));
    }

    #[test]
    fn depth_colours_apply_to_connectors() {
        let forest = tree_one();
        let mut state = TreeViewState::new();
        let palette = [Color::Red, Color::Green, Color::Yellow];
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, TreeViewStyle::default())
            .connector_style(|depth: usize, _glyph: &str| {
                Style::new().fg(palette[depth % palette.len()])
            })
            .render(area, &mut buf, &mut state);

        // Row 1 is `example1`: padding at depth 0, branch at depth 1.
        assert_eq!(buf[(1, 1)].fg, Color::Red);
        assert_eq!(buf[(4, 1)].fg, Color::Green);
        assert_eq!(buf[(8, 1)].fg, Color::Reset);
    }

    #[test]
    fn zero_sized_area_draws_nothing() {
        let forest = tree_one();
        let mut state = TreeViewState::new();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        TreeView::new(&forest, TreeViewStyle::default()).render(area, &mut buf, &mut state);
        assert!(buf.content.is_empty());
    }
}
