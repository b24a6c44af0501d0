use std::fmt;

use menubar_types::{ChildDecl, MenuDecl, SlotClassNames, SlotStyles, StyleMap};
use tracing::warn;

use crate::ui::components::menu::{Menu, MenuAction, MenuEntry, MenuUnit};

/// How a menu declares its action.
#[derive(Clone, Default)]
pub enum DeclaredAction {
    /// Nothing declared; the bar's default action applies.
    #[default]
    Inherit,
    /// Declared explicitly. `None` means "no action" and does not fall back.
    Declared(Option<MenuAction>),
}

impl fmt::Debug for DeclaredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredAction::Inherit => f.write_str("Inherit"),
            DeclaredAction::Declared(Some(_)) => f.write_str("Declared(<fn>)"),
            DeclaredAction::Declared(None) => f.write_str("Declared(None)"),
        }
    }
}

/// One top-level label plus the submenu it owns.
pub struct MenuDescriptor {
    /// Caller supplied identity used for the rendering key.
    pub id: Option<String>,
    pub label: String,
    pub action: DeclaredAction,
    /// Overrides for the submenu's slots, applied over the bar's `menu` defaults.
    pub menu_styles: SlotStyles,
    pub menu_class_names: SlotClassNames,
    /// Overrides for this label's wrapper, applied over the bar's `listitem`.
    pub item_style: StyleMap,
    pub item_class_names: Option<String>,
    pub menu: Box<dyn MenuUnit>,
}

impl fmt::Debug for MenuDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("action", &self.action)
            .field("menu_styles", &self.menu_styles)
            .field("menu_class_names", &self.menu_class_names)
            .field("item_style", &self.item_style)
            .field("item_class_names", &self.item_class_names)
            .finish_non_exhaustive()
    }
}

impl MenuDescriptor {
    pub fn new(label: impl Into<String>, menu: impl MenuUnit + 'static) -> Self {
        Self {
            id: None,
            label: label.into(),
            action: DeclaredAction::Inherit,
            menu_styles: SlotStyles::default(),
            menu_class_names: SlotClassNames::default(),
            item_style: StyleMap::default(),
            item_class_names: None,
            menu: Box::new(menu),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Declares the action; `None` declares an empty one.
    pub fn with_action(mut self, action: Option<MenuAction>) -> Self {
        self.action = DeclaredAction::Declared(action);
        self
    }

    pub fn with_menu_styles(mut self, menu_styles: SlotStyles) -> Self {
        self.menu_styles = menu_styles;
        self
    }

    pub fn with_menu_class_names(mut self, menu_class_names: SlotClassNames) -> Self {
        self.menu_class_names = menu_class_names;
        self
    }

    pub fn with_item_style(mut self, item_style: StyleMap) -> Self {
        self.item_style = item_style;
        self
    }

    pub fn with_item_class_names(mut self, class_names: impl Into<String>) -> Self {
        self.item_class_names = Some(class_names.into());
        self
    }

    /// Builds a descriptor backed by a stock [`Menu`]. Named actions are
    /// turned into callbacks by `resolve_action`.
    pub fn from_decl(decl: &MenuDecl, resolve_action: &dyn Fn(&str) -> MenuAction) -> Self {
        let menu = Menu::new(decl.entries.iter().map(MenuEntry::from).collect());
        let mut descriptor = Self::new(decl.label.clone(), menu)
            .with_menu_styles(decl.menu_styles.clone())
            .with_menu_class_names(decl.menu_class_names.clone())
            .with_item_style(decl.item_style.clone());
        descriptor.id = decl.id.clone();
        descriptor.item_class_names = decl.item_class_names.clone();
        descriptor.action = match &decl.action {
            None => DeclaredAction::Inherit,
            Some(None) => DeclaredAction::Declared(None),
            Some(Some(name)) => DeclaredAction::Declared(Some(resolve_action(name))),
        };
        descriptor
    }
}

/// An entry in the bar's child sequence. Every variant takes up an index;
/// only `Menu` can become active.
#[derive(Debug)]
pub enum MenubarChild {
    Menu(MenuDescriptor),
    /// Passed through as plain text.
    Text(String),
    /// Absent child, drawn as nothing.
    Empty,
}

impl MenubarChild {
    pub fn from_decl(decl: Option<&ChildDecl>, resolve_action: &dyn Fn(&str) -> MenuAction) -> Self {
        match decl {
            Some(ChildDecl::Menu(menu)) => MenubarChild::Menu(MenuDescriptor::from_decl(menu, resolve_action)),
            Some(ChildDecl::Text(text)) => MenubarChild::Text(text.clone()),
            Some(malformed @ ChildDecl::Malformed(value)) => {
                warn!(child = %value, "menubar child is neither text nor a menu; rendering a placeholder");
                malformed.placeholder_text().map_or(MenubarChild::Empty, MenubarChild::Text)
            }
            None => MenubarChild::Empty,
        }
    }

    pub fn as_menu(&self) -> Option<&MenuDescriptor> {
        match self {
            MenubarChild::Menu(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

impl From<MenuDescriptor> for MenubarChild {
    fn from(descriptor: MenuDescriptor) -> Self {
        MenubarChild::Menu(descriptor)
    }
}
