use std::borrow::Cow;

use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Glyphs used to draw tree connectors.
///
/// Every connector column is `width` cells wide; glyphs are right-aligned inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeSymbols<'a> {
    /// Cells per connector column.
    pub width: u16,
    /// Continuation drawn where an ancestor still has siblings below.
    pub vertical: &'a str,
    /// Marker for a node followed by a sibling.
    pub branch: &'a str,
    /// Marker for the last node of a sibling list.
    pub corner: &'a str,
    /// Rule drawn between the connectors and the body instead of a space.
    pub horizontal: Option<&'a str>,
    /// Expander shown before collapsed bodies.
    pub collapsed: &'a str,
    /// Expander shown before expanded bodies.
    pub expanded: &'a str,
    /// Replaces the last visible cell of truncated bodies.
    pub ellipsis: &'a str,
}

impl TreeSymbols<'static> {
    pub const fn normal() -> Self {
        Self {
            width: 3,
            vertical: "│ ",
            branch: "├─",
            corner: "└─",
            horizontal: None,
            collapsed: "⊞",
            expanded: "⊟",
            ellipsis: "…",
        }
    }

    pub const fn rounded() -> Self {
        Self {
            corner: "╰─",
            ..Self::normal()
        }
    }

    pub const fn thick() -> Self {
        Self {
            vertical: "┃ ",
            branch: "┣━",
            corner: "┗━",
            ..Self::normal()
        }
    }

    pub const fn double() -> Self {
        Self {
            vertical: "║ ",
            branch: "╠═",
            corner: "╚═",
            ..Self::normal()
        }
    }

    /// Narrow set that draws only the left edge of each level.
    pub const fn edge() -> Self {
        Self {
            width: 2,
            vertical: "│",
            branch: "├",
            corner: "└",
            ..Self::normal()
        }
    }
}

impl Default for TreeSymbols<'static> {
    fn default() -> Self {
        Self::normal()
    }
}

impl<'a> TreeSymbols<'a> {
    /// Right-aligns `glyph` in a connector column.
    pub fn draw(&self, glyph: &'a str) -> Cow<'a, str> {
        let pad = usize::from(self.width).saturating_sub(glyph.width());
        if pad == 0 {
            Cow::Borrowed(glyph)
        } else {
            Cow::Owned(format!("{}{glyph}", " ".repeat(pad)))
        }
    }

    /// Blank connector column.
    pub fn padding(&self) -> Cow<'a, str> {
        Cow::Owned(" ".repeat(usize::from(self.width)))
    }

    /// Separator between connectors and body.
    pub fn separator(&self) -> &'a str {
        self.horizontal.unwrap_or(" ")
    }
}

/// Built-in symbol sets, selectable by name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymbolSet {
    #[default]
    Normal,
    Rounded,
    Thick,
    Double,
    Edge,
}

impl SymbolSet {
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Rounded,
        Self::Thick,
        Self::Double,
        Self::Edge,
    ];

    pub const fn symbols(self) -> TreeSymbols<'static> {
        match self {
            Self::Normal => TreeSymbols::normal(),
            Self::Rounded => TreeSymbols::rounded(),
            Self::Thick => TreeSymbols::thick(),
            Self::Double => TreeSymbols::double(),
            Self::Edge => TreeSymbols::edge(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rounded => "rounded",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Edge => "edge",
        }
    }

    /// Looks a set up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.name() == name)
    }
}

/// Depth-dependent styling for connector glyphs.
pub trait ConnectorStyle {
    /// Returns the style for `glyph` drawn in the column of ancestor depth `depth`.
    fn style(&self, depth: usize, glyph: &str) -> Style;
}

impl<F> ConnectorStyle for F
where
    F: Fn(usize, &str) -> Style,
{
    #[inline]
    fn style(&self, depth: usize, glyph: &str) -> Style {
        self(depth, glyph)
    }
}

/// Leaves connectors in the widget's line style.
#[derive(Clone, Copy, Debug)]
pub struct NoConnectorStyle;

impl ConnectorStyle for NoConnectorStyle {
    #[inline]
    fn style(&self, _depth: usize, _glyph: &str) -> Style {
        Style::default()
    }
}
