use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used throughout the UI.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,
    pub divider: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Debug {
    fn roles(&self) -> &ThemeRoles;

    // Text styles
    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }

    // Menu bar surfaces
    fn bar_style(&self) -> Style {
        Style::default().bg(self.roles().surface_muted).fg(self.roles().text)
    }
    fn bar_item_active_style(&self) -> Style {
        self.selection_style().add_modifier(Modifier::BOLD)
    }
    fn menu_surface_style(&self) -> Style {
        Style::default().bg(self.roles().surface).fg(self.roles().text)
    }
    fn menu_item_hover_style(&self) -> Style {
        Style::default().fg(self.roles().background).bg(self.roles().accent_secondary)
    }
    fn divider_style(&self) -> Style {
        Style::default().fg(self.roles().divider)
    }
}
