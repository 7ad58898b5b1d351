//! Box-drawing prefixes for visible nodes.
//!
//! Connectors are derived per column by walking the node's ancestors, so any slice of
//! the visible sequence can be drawn without state from the rows above it.

use std::borrow::Cow;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use smallvec::SmallVec;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::glyphs::{ConnectorStyle, TreeSymbols};
use crate::model::TreeModel;
use crate::visible::{self, MAX_DEPTH};

/// Glyph kind drawn in one connector column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    /// Blank column: the ancestor has no siblings below.
    Padding,
    /// The ancestor still has a sibling below.
    Vertical,
    /// The node itself, followed by a sibling.
    Branch,
    /// The node itself, last of its siblings.
    Corner,
}

impl Connector {
    pub fn glyph<'a>(self, symbols: &TreeSymbols<'a>) -> Cow<'a, str> {
        match self {
            Self::Padding => symbols.padding(),
            Self::Vertical => symbols.draw(symbols.vertical),
            Self::Branch => symbols.draw(symbols.branch),
            Self::Corner => symbols.draw(symbols.corner),
        }
    }
}

/// Returns the connector of `id` at column `position`, where `max_depth` is the
/// node's depth. Columns past the node's own column have no connector.
pub fn connector_at<T: TreeModel>(
    model: &T,
    id: T::Id,
    position: usize,
    max_depth: usize,
) -> Option<Connector> {
    if position > max_depth {
        return None;
    }
    if position == max_depth {
        let own = visible::sibling_state(model, id);
        return Some(if own.is_last_child() {
            Connector::Corner
        } else {
            Connector::Branch
        });
    }
    let ancestor = visible::ancestor(model, id, max_depth - position)?;
    Some(if visible::sibling_state(model, ancestor).is_last_child() {
        Connector::Padding
    } else {
        Connector::Vertical
    })
}

/// Connectors for the first line of `id`, one per column from the root level down.
pub fn connectors<T: TreeModel>(model: &T, id: T::Id) -> SmallVec<[Connector; 8]> {
    let mut columns = SmallVec::<[Connector; 8]>::new();
    let own = if visible::sibling_state(model, id).is_last_child() {
        Connector::Corner
    } else {
        Connector::Branch
    };
    columns.push(own);

    let mut current = id;
    while let Some(parent) = model.parent(current) {
        if columns.len() > MAX_DEPTH {
            log::warn!("parent chain longer than {MAX_DEPTH}, possible cycle");
            break;
        }
        columns.push(if visible::sibling_state(model, parent).is_last_child() {
            Connector::Padding
        } else {
            Connector::Vertical
        });
        current = parent;
    }
    columns.reverse();
    columns
}

/// Connectors for body line `line` of a node spanning `line_count` lines.
///
/// Follow-up lines continue the node's own column vertically; the final line of a
/// last child leaves it blank.
pub fn line_connectors(
    first: &[Connector],
    line: usize,
    line_count: usize,
) -> SmallVec<[Connector; 8]> {
    let mut columns = SmallVec::from_slice(first);
    if line == 0 {
        return columns;
    }
    if let Some(own) = columns.last_mut() {
        let is_last_child = *own == Connector::Corner;
        *own = if is_last_child && line + 1 == line_count {
            Connector::Padding
        } else {
            Connector::Vertical
        };
    }
    columns
}

/// Returns the longest prefix of `text` that fits in `width` cells.
fn take_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let cells = ch.width().unwrap_or(0);
        if used + cells > width {
            return &text[..idx];
        }
        used += cells;
    }
    text
}

/// Truncates `text` to `width` cells, replacing the last visible cell with `ellipsis`.
pub fn ellipsize<'a>(text: &'a str, width: usize, ellipsis: &str) -> Cow<'a, str> {
    if text.width() <= width {
        return Cow::Borrowed(text);
    }
    let marker = ellipsis.width();
    if marker > width {
        return Cow::Borrowed(take_width(text, width));
    }
    let mut out = take_width(text, width - marker).to_string();
    out.push_str(ellipsis);
    Cow::Owned(out)
}

/// Span-aware [`ellipsize`]; the marker inherits the style of the span it cuts.
pub fn fit_spans<'a>(spans: Vec<Span<'a>>, width: usize, ellipsis: &str) -> Vec<Span<'a>> {
    let total: usize = spans.iter().map(Span::width).sum();
    if total <= width {
        return spans;
    }
    let marker = ellipsis.width();
    let (budget, marker) = if marker > width {
        (width, "")
    } else {
        (width - marker, ellipsis)
    };

    let mut out = Vec::with_capacity(spans.len());
    let mut used = 0;
    for span in spans {
        let cells = span.width();
        if used + cells <= budget {
            used += cells;
            out.push(span);
            continue;
        }
        let head = take_width(&span.content, budget - used).to_string();
        let style = span.style;
        if !head.is_empty() {
            out.push(Span::styled(head, style));
        }
        if !marker.is_empty() {
            out.push(Span::styled(marker.to_string(), style));
        }
        break;
    }
    out
}

/// Settings shared by every node drawn in one render pass.
pub struct RenderContext<'a, 's, S: ConnectorStyle> {
    pub symbols: TreeSymbols<'a>,
    pub connector_style: &'s S,
    /// Base style of connector glyphs; `connector_style` is patched on top.
    pub line_style: Style,
    /// Draws the collapsed/expanded marker before collapsible bodies.
    pub expander: bool,
    /// Available cells per line.
    pub width: usize,
}

impl<'a, S: ConnectorStyle> RenderContext<'a, '_, S> {
    /// Renders one node: a prefixed line per body line.
    pub fn node_lines<T: TreeModel>(&self, model: &'a T, id: T::Id) -> Vec<Line<'a>> {
        if self.width == 0 {
            return Vec::new();
        }
        let state = visible::effective_state(model, id);
        let body = model.body(id);
        let body_lines = if body.lines.is_empty() {
            vec![Line::default()]
        } else {
            body.lines
        };
        let line_count = body_lines.len();
        if line_count > 1 && !state.is_multi_line() {
            log::trace!("{line_count}-line body without the multi-line flag");
        }

        let first = connectors(model, id);
        let expander = if self.expander && state.is_collapsible() {
            Some(if state.is_expanded() {
                self.symbols.expanded
            } else {
                self.symbols.collapsed
            })
        } else {
            None
        };

        let mut lines = Vec::with_capacity(line_count);
        for (idx, body_line) in body_lines.into_iter().enumerate() {
            let mut spans = Vec::with_capacity(first.len() + body_line.spans.len() + 2);
            for (depth, connector) in line_connectors(&first, idx, line_count)
                .into_iter()
                .enumerate()
            {
                let glyph = connector.glyph(&self.symbols);
                let style = self
                    .line_style
                    .patch(self.connector_style.style(depth, &glyph));
                spans.push(Span::styled(glyph, style));
            }
            spans.push(Span::styled(self.symbols.separator(), self.line_style));
            if let Some(marker) = expander {
                if idx == 0 {
                    spans.push(Span::raw(marker));
                } else {
                    spans.push(Span::raw(" ".repeat(marker.width())));
                }
                spans.push(Span::raw(" "));
            }

            let prefix_width: usize = spans.iter().map(Span::width).sum();
            let remaining = self.width.saturating_sub(prefix_width);
            let line_style = body_line.style;
            let body_spans = body_line
                .spans
                .into_iter()
                .map(|span| {
                    let style = line_style.patch(span.style);
                    span.style(style)
                })
                .collect();
            spans.extend(fit_spans(body_spans, remaining, self.symbols.ellipsis));

            if prefix_width > self.width {
                // Deeper than the viewport is wide: clip the connectors as well.
                spans = fit_spans(spans, self.width, "");
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    /// Renders `id` followed by its visible descendants.
    pub fn subtree_lines<T: TreeModel>(&self, model: &'a T, id: T::Id) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        self.push_subtree(model, id, 0, &mut lines);
        lines
    }

    fn push_subtree<T: TreeModel>(
        &self,
        model: &'a T,
        id: T::Id,
        level: usize,
        lines: &mut Vec<Line<'a>>,
    ) {
        let state = model.state(id);
        if state.is_hidden() {
            return;
        }
        lines.extend(self.node_lines(model, id));
        if !state.shows_children() || level + 1 >= MAX_DEPTH {
            return;
        }
        for child in model.children(id).iter().copied() {
            self.push_subtree(model, child, level + 1, lines);
        }
    }
}
