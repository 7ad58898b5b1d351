use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::TreeAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    /// Arrows plus vim keys.
    #[default]
    Default,
    Vim,
    Arrows,
}

/// Translates crossterm input into [`TreeAction`]s.
#[derive(Clone, Copy, Debug)]
pub struct TreeKeyBindings {
    profile: KeymapProfile,
}

impl Default for TreeKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    /// Maps key presses and terminal resizes; everything else yields `None`.
    pub fn resolve_event(&self, event: &Event) -> Option<TreeAction> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.resolve(*key),
            Event::Resize(width, height) => Some(TreeAction::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    pub fn resolve(&self, key: KeyEvent) -> Option<TreeAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => Some(TreeAction::HalfPageUp),
                KeyCode::Char('d') => Some(TreeAction::HalfPageDown),
                KeyCode::Char('b') => Some(TreeAction::PageUp),
                KeyCode::Char('f') => Some(TreeAction::PageDown),
                _ => None,
            };
        }

        let nav_action = match self.profile {
            KeymapProfile::Default => Self::resolve_default_nav(key),
            KeymapProfile::Vim => Self::resolve_vim_nav(key),
            KeymapProfile::Arrows => Self::resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        Self::resolve_common(key)
    }

    const fn resolve_default_nav(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::MoveUp(1)),
            KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::MoveDown(1)),
            KeyCode::Char('g') => Some(TreeAction::GotoTop),
            KeyCode::Char('G') => Some(TreeAction::GotoBottom),
            _ => None,
        }
    }

    const fn resolve_vim_nav(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::Char('k') => Some(TreeAction::MoveUp(1)),
            KeyCode::Char('j') => Some(TreeAction::MoveDown(1)),
            KeyCode::Char('g') => Some(TreeAction::GotoTop),
            KeyCode::Char('G') => Some(TreeAction::GotoBottom),
            _ => None,
        }
    }

    const fn resolve_arrow_nav(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::Up => Some(TreeAction::MoveUp(1)),
            KeyCode::Down => Some(TreeAction::MoveDown(1)),
            _ => None,
        }
    }

    const fn resolve_common(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::PageUp => Some(TreeAction::PageUp),
            KeyCode::PageDown => Some(TreeAction::PageDown),
            KeyCode::Home => Some(TreeAction::GotoTop),
            KeyCode::End => Some(TreeAction::GotoBottom),
            KeyCode::Enter | KeyCode::Char(' ') => Some(TreeAction::ToggleExpand),
            _ => None,
        }
    }
}
