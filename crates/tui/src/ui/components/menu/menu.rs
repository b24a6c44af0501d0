use std::fmt;
use std::rc::Rc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use menubar_types::{ClassList, EntryDecl, SlotClassNames, SlotStyles, StyleMap};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::{Stylesheet, class};

/// Selection callback: `(tag, checked, originating event)`.
pub type MenuAction = Rc<dyn Fn(&str, bool, &MouseEvent)>;

/// Slot names a menu reads from its style and class maps.
pub mod slot {
    pub const CONTAINER: &str = "unorderedlist";
    pub const ITEM: &str = "listitem";
    pub const ITEM_HOVER: &str = "activeListitem";
    pub const DIVIDER: &str = "divider";
}

/// Props a menu receives from the bar on every render.
#[derive(Clone, Default)]
pub struct MenuProps {
    /// Whether the submenu is visible.
    pub display: bool,
    pub menu_styles: SlotStyles,
    pub menu_class_names: SlotClassNames,
    /// Effective selection callback, `None` when the menu has none.
    pub action: Option<MenuAction>,
}

impl fmt::Debug for MenuProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuProps")
            .field("display", &self.display)
            .field("menu_styles", &self.menu_styles)
            .field("menu_class_names", &self.menu_class_names)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl MenuProps {
    fn classes(&self, built_in: &str, slot: &str) -> ClassList {
        let mut classes = ClassList::new();
        classes.push(built_in);
        classes.push_opt(self.menu_class_names.slot(slot));
        classes
    }

    fn inline(&self, slot: &str) -> StyleMap {
        self.menu_styles.slot(slot).cloned().unwrap_or_default()
    }
}

/// A submenu the bar can drive. The bar only hands it props; what it draws
/// and how it reacts to the pointer is its own business.
pub trait MenuUnit {
    /// Draws the submenu below `anchor`. Returns the area drawn, `None` when hidden.
    fn render(&mut self, frame: &mut Frame, anchor: Rect, props: &MenuProps, stylesheet: &Stylesheet) -> Option<Rect>;

    /// Handles a pointer event. Returns `true` when the event landed on the submenu.
    fn handle_mouse(&mut self, props: &MenuProps, mouse: &MouseEvent) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        tag: String,
        label: String,
        /// `Some` makes the item checkable.
        checked: Option<bool>,
    },
    Divider,
}

impl MenuEntry {
    pub fn item(tag: impl Into<String>, label: impl Into<String>) -> Self {
        MenuEntry::Item {
            tag: tag.into(),
            label: label.into(),
            checked: None,
        }
    }

    pub fn checkable(tag: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        MenuEntry::Item {
            tag: tag.into(),
            label: label.into(),
            checked: Some(checked),
        }
    }

    fn width(&self) -> usize {
        match self {
            MenuEntry::Item { label, .. } => label.width(),
            MenuEntry::Divider => 0,
        }
    }
}

impl From<&EntryDecl> for MenuEntry {
    fn from(decl: &EntryDecl) -> Self {
        if decl.divider {
            MenuEntry::Divider
        } else {
            let label = if decl.label.is_empty() { decl.tag.clone() } else { decl.label.clone() };
            MenuEntry::Item {
                tag: decl.tag.clone(),
                label,
                checked: decl.checked,
            }
        }
    }
}

/// Bordered dropdown list of entries.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    hovered: Option<usize>,
    last_area: Rect,
    entry_areas: Vec<Rect>,
}

impl Menu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Size of the popup including borders.
    fn preferred_size(&self, min_width: u16) -> (u16, u16) {
        let content = self.entries.iter().map(MenuEntry::width).max().unwrap_or(0);
        // " ✓ label " plus the two borders
        let width = (content + 5).min(u16::MAX as usize) as u16;
        let height = (self.entries.len() + 2).min(u16::MAX as usize) as u16;
        (width.max(min_width), height)
    }

    fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.entry_areas.iter().position(|area| area.contains(position))
    }

    fn hide(&mut self) {
        self.hovered = None;
        self.last_area = Rect::default();
        self.entry_areas.clear();
    }
}

impl MenuUnit for Menu {
    fn render(&mut self, frame: &mut Frame, anchor: Rect, props: &MenuProps, stylesheet: &Stylesheet) -> Option<Rect> {
        if !props.display || self.entries.is_empty() {
            self.hide();
            return None;
        }

        let (width, height) = self.preferred_size(anchor.width);
        let popup = Rect::new(anchor.x, anchor.bottom(), width, height).intersection(frame.area());
        if popup.is_empty() {
            self.hide();
            return None;
        }

        let container_style = stylesheet.resolve(&props.classes(class::MENU_CONTAINER, slot::CONTAINER), &props.inline(slot::CONTAINER));
        let block = Block::default().borders(Borders::ALL).style(container_style);
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        self.entry_areas.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            let row = inner.y.saturating_add(index as u16);
            if row >= inner.bottom() {
                break;
            }
            let area = Rect::new(inner.x, row, inner.width, 1);
            self.entry_areas.push(area);

            let paragraph = match entry {
                MenuEntry::Item { label, checked, .. } => {
                    let mut classes = props.classes(class::MENU_ITEM, slot::ITEM);
                    let mut inline = props.inline(slot::ITEM);
                    if self.hovered == Some(index) {
                        classes.push(class::MENU_ITEM_HOVER);
                        classes.push_opt(props.menu_class_names.slot(slot::ITEM_HOVER));
                        inline = inline.overlay(&props.inline(slot::ITEM_HOVER));
                    }
                    let mark = if *checked == Some(true) { "✓" } else { " " };
                    Paragraph::new(Line::from(format!(" {mark} {label}"))).style(stylesheet.resolve(&classes, &inline))
                }
                MenuEntry::Divider => {
                    let rule = "─".repeat(inner.width as usize);
                    Paragraph::new(rule).style(stylesheet.resolve(&props.classes(class::MENU_DIVIDER, slot::DIVIDER), &props.inline(slot::DIVIDER)))
                }
            };
            frame.render_widget(paragraph, area);
        }

        self.last_area = popup;
        Some(popup)
    }

    fn handle_mouse(&mut self, props: &MenuProps, mouse: &MouseEvent) -> bool {
        let inside = props.display && self.last_area.contains(Position::new(mouse.column, mouse.row));
        let hovering = matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_));
        if !inside {
            if hovering {
                self.hovered = None;
            }
            return false;
        }

        let target = self.entry_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.hovered = target.filter(|index| matches!(self.entries[*index], MenuEntry::Item { .. }));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(MenuEntry::Item { tag, checked, .. }) = target.and_then(|index| self.entries.get_mut(index)) {
                    if let Some(value) = checked.as_mut() {
                        *value = !*value;
                    }
                    let checked = checked.unwrap_or(false);
                    debug!(tag = %tag, checked, "menu entry selected");
                    if let Some(action) = props.action.as_ref() {
                        action(tag, checked, mouse);
                    }
                }
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use std::cell::RefCell;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(menu: &mut Menu, props: &MenuProps) -> Option<Rect> {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let mut drawn = None;
        terminal
            .draw(|frame| drawn = menu.render(frame, Rect::new(2, 0, 6, 1), props, &Stylesheet::new()))
            .unwrap();
        drawn
    }

    fn sample_menu() -> Menu {
        Menu::new(vec![
            MenuEntry::item("open", "Open"),
            MenuEntry::Divider,
            MenuEntry::checkable("autosave", "Autosave", false),
        ])
    }

    #[test]
    fn hidden_menu_draws_nothing() {
        let mut menu = sample_menu();
        assert_eq!(render(&mut menu, &MenuProps::default()), None);
    }

    #[test]
    fn displayed_menu_opens_below_anchor() {
        let mut menu = sample_menu();
        let props = MenuProps {
            display: true,
            ..MenuProps::default()
        };

        let area = render(&mut menu, &props).unwrap();

        assert_eq!((area.x, area.y), (2, 1));
        assert_eq!(area.height, 5);
        assert_eq!(area.width, "Autosave".len() as u16 + 5);
    }

    #[test]
    fn pressing_a_checkable_item_toggles_and_reports() {
        let calls: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
        let seen = calls.clone();
        let action: MenuAction = Rc::new(move |tag: &str, checked: bool, _event: &MouseEvent| seen.borrow_mut().push((tag.to_string(), checked)));
        let props = MenuProps {
            display: true,
            action: Some(action),
            ..MenuProps::default()
        };
        let mut menu = sample_menu();
        let area = render(&mut menu, &props).unwrap();
        // first inner row is "Open", third is "Autosave"
        let autosave_row = area.y + 3;

        assert!(menu.handle_mouse(&props, &mouse(MouseEventKind::Down(MouseButton::Left), area.x + 2, autosave_row)));
        assert!(menu.handle_mouse(&props, &mouse(MouseEventKind::Down(MouseButton::Left), area.x + 2, area.y + 1)));

        assert_eq!(*calls.borrow(), vec![("autosave".to_string(), true), ("open".to_string(), false)]);
        assert_eq!(menu.entries()[2], MenuEntry::checkable("autosave", "Autosave", true));
    }

    #[test]
    fn dividers_are_never_hovered() {
        let props = MenuProps {
            display: true,
            ..MenuProps::default()
        };
        let mut menu = sample_menu();
        let area = render(&mut menu, &props).unwrap();

        menu.handle_mouse(&props, &mouse(MouseEventKind::Moved, area.x + 2, area.y + 2));
        assert_eq!(menu.hovered(), None);
        menu.handle_mouse(&props, &mouse(MouseEventKind::Moved, area.x + 2, area.y + 1));
        assert_eq!(menu.hovered(), Some(0));
        assert!(!menu.handle_mouse(&props, &mouse(MouseEventKind::Moved, 39, 11)));
        assert_eq!(menu.hovered(), None);
    }

    #[test]
    fn dragging_moves_the_highlight() {
        let props = MenuProps {
            display: true,
            ..MenuProps::default()
        };
        let mut menu = sample_menu();
        let area = render(&mut menu, &props).unwrap();
        let drag = MouseEventKind::Drag(MouseButton::Left);

        menu.handle_mouse(&props, &mouse(drag, area.x + 2, area.y + 1));
        assert_eq!(menu.hovered(), Some(0));
        menu.handle_mouse(&props, &mouse(drag, area.x + 2, area.y + 3));
        assert_eq!(menu.hovered(), Some(2));
        menu.handle_mouse(&props, &mouse(drag, 39, 11));
        assert_eq!(menu.hovered(), None);
    }

    #[test]
    fn entry_without_label_uses_tag() {
        let decl = EntryDecl {
            tag: "quit".into(),
            ..EntryDecl::default()
        };
        assert_eq!(MenuEntry::from(&decl), MenuEntry::item("quit", "quit"));
    }
}
