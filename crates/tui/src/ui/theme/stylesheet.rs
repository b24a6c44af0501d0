//! Class based styling for the menu bar.
//!
//! A [`Stylesheet`] maps class names to terminal styles. It is seeded from the
//! active theme with the built-in classes and can be extended with classes
//! declared in the menu document. Resolution patches, in order: the style of
//! every class in the list, then the inline declarations.

use std::str::FromStr;

use indexmap::IndexMap;
use menubar_types::{ClassList, StyleMap, StyleValue};
use ratatui::style::{Color, Modifier, Style};
use tracing::trace;

use super::Theme;

/// Built-in class names.
pub mod class {
    pub const MENUBAR_CONTAINER: &str = "menubar-container";
    pub const MENUBAR_ITEM: &str = "menubar-item";
    pub const MENUBAR_ITEM_ACTIVE: &str = "menubar-item-active";
    pub const MENU_CONTAINER: &str = "menu-container";
    pub const MENU_ITEM: &str = "menu-item";
    pub const MENU_ITEM_HOVER: &str = "menu-item-hover";
    pub const MENU_DIVIDER: &str = "menu-divider";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    classes: IndexMap<String, Style>,
}

impl Stylesheet {
    /// Empty stylesheet; every class resolves to nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stylesheet with the built-in classes derived from `theme`.
    pub fn from_theme<T: Theme + ?Sized>(theme: &T) -> Self {
        let mut sheet = Self::new();
        sheet.define(class::MENUBAR_CONTAINER, theme.bar_style());
        sheet.define(class::MENUBAR_ITEM, theme.text_primary_style());
        sheet.define(class::MENUBAR_ITEM_ACTIVE, theme.bar_item_active_style());
        sheet.define(class::MENU_CONTAINER, theme.menu_surface_style().patch(theme.border_style(false)));
        sheet.define(class::MENU_ITEM, theme.menu_surface_style());
        sheet.define(class::MENU_ITEM_HOVER, theme.menu_item_hover_style());
        sheet.define(class::MENU_DIVIDER, theme.divider_style());
        sheet
    }

    /// Defines or replaces a class.
    pub fn define(&mut self, class_name: impl Into<String>, style: Style) {
        self.classes.insert(class_name.into(), style);
    }

    /// Adds classes declared as inline maps. Existing classes are patched,
    /// so a document can tweak a built-in class without restating it.
    pub fn extend_with_declarations<'a>(&mut self, declarations: impl IntoIterator<Item = (&'a String, &'a StyleMap)>) {
        for (class_name, map) in declarations {
            let style = style_from_declarations(map);
            let merged = match self.classes.get(class_name) {
                Some(existing) => existing.patch(style),
                None => style,
            };
            self.classes.insert(class_name.clone(), merged);
        }
    }

    pub fn class_style(&self, class_name: &str) -> Option<Style> {
        self.classes.get(class_name).copied()
    }

    /// Resolves a class list plus inline declarations into one style.
    pub fn resolve(&self, classes: &ClassList, inline: &StyleMap) -> Style {
        let from_classes = classes
            .iter()
            .filter_map(|class_name| self.class_style(class_name))
            .fold(Style::default(), Style::patch);
        from_classes.patch(style_from_declarations(inline))
    }
}

/// Converts inline declarations into a terminal style.
///
/// Understood properties: `color`/`fg`, `background`/`backgroundColor`/`bg`,
/// `fontWeight`, `fontStyle`, `textDecoration` and `opacity`. Anything else
/// has no terminal equivalent and is skipped.
pub fn style_from_declarations(map: &StyleMap) -> Style {
    let mut style = Style::default();
    for (property, value) in map.iter() {
        match property {
            "color" | "fg" | "foreground" => {
                if let Some(color) = parse_color(value) {
                    style = style.fg(color);
                }
            }
            "background" | "backgroundColor" | "background-color" | "bg" => {
                if let Some(color) = parse_color(value) {
                    style = style.bg(color);
                }
            }
            "fontWeight" | "font-weight" => style = apply_font_weight(style, value),
            "fontStyle" | "font-style" => match value.as_str() {
                Some("italic") | Some("oblique") => style = style.add_modifier(Modifier::ITALIC),
                Some("normal") => style = style.remove_modifier(Modifier::ITALIC),
                _ => {}
            },
            "textDecoration" | "text-decoration" => {
                let text = value.to_string();
                if text == "none" {
                    style = style.remove_modifier(Modifier::UNDERLINED | Modifier::CROSSED_OUT);
                }
                if text.contains("underline") {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if text.contains("line-through") {
                    style = style.add_modifier(Modifier::CROSSED_OUT);
                }
            }
            "opacity" => {
                if let StyleValue::Number(opacity) = value
                    && *opacity < 0.75
                {
                    style = style.add_modifier(Modifier::DIM);
                }
            }
            other => trace!(property = other, "ignoring style property without terminal equivalent"),
        }
    }
    style
}

fn parse_color(value: &StyleValue) -> Option<Color> {
    match value {
        StyleValue::Text(text) => Color::from_str(text.trim()).ok(),
        StyleValue::Number(number) if (0.0..=255.0).contains(number) => Some(Color::Indexed(*number as u8)),
        _ => None,
    }
}

fn apply_font_weight(style: Style, value: &StyleValue) -> Style {
    let bold = match value {
        StyleValue::Text(text) => match text.as_str() {
            "bold" | "bolder" => Some(true),
            "normal" | "lighter" => Some(false),
            numeric => numeric.parse::<f64>().ok().map(|weight| weight >= 600.0),
        },
        StyleValue::Number(weight) => Some(*weight >= 600.0),
        StyleValue::Flag(flag) => Some(*flag),
    };
    match bold {
        Some(true) => style.add_modifier(Modifier::BOLD),
        Some(false) => style.remove_modifier(Modifier::BOLD),
        None => style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    #[test]
    fn declarations_map_to_terminal_style() {
        let map = StyleMap::new()
            .with("color", "blue")
            .with("background", "#102030")
            .with("fontWeight", 700)
            .with("fontSize", 12)
            .with("textDecoration", "underline");

        let style = style_from_declarations(&map);

        assert_eq!(style.fg, Some(Color::Blue));
        assert_eq!(style.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
    }

    #[test]
    fn unparsable_colors_are_skipped() {
        let style = style_from_declarations(&StyleMap::new().with("color", "not-a-color"));
        assert_eq!(style, Style::default());
    }

    #[test]
    fn inline_declarations_win_over_classes() {
        let mut sheet = Stylesheet::new();
        sheet.define("warm", Style::default().fg(Color::Red).bg(Color::Black));
        let mut classes = ClassList::new();
        classes.push("warm missing");

        let style = sheet.resolve(&classes, &StyleMap::new().with("color", "green"));

        assert_eq!(style.fg, Some(Color::Green));
        assert_eq!(style.bg, Some(Color::Black));
    }

    #[test]
    fn later_classes_patch_earlier_ones() {
        let mut sheet = Stylesheet::new();
        sheet.define("a", Style::default().fg(Color::Red));
        sheet.define("b", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let mut classes = ClassList::new();
        classes.push("a b");

        let style = sheet.resolve(&classes, &StyleMap::new());

        assert_eq!(style.fg, Some(Color::Yellow));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn document_classes_patch_builtins() {
        let theme = DraculaTheme::new();
        let mut sheet = Stylesheet::from_theme(&theme);
        let before = sheet.class_style(class::MENUBAR_ITEM_ACTIVE).unwrap();
        let mut declarations = IndexMap::new();
        declarations.insert(class::MENUBAR_ITEM_ACTIVE.to_string(), StyleMap::new().with("color", "yellow"));

        sheet.extend_with_declarations(&declarations);

        let after = sheet.class_style(class::MENUBAR_ITEM_ACTIVE).unwrap();
        assert_eq!(after.fg, Some(Color::Yellow));
        assert_eq!(after.bg, before.bg);
    }
}
