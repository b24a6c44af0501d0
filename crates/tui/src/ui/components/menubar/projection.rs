//! Per-render projection of the bar's children.
//!
//! Nothing here is stored: every render derives, for each child index, what
//! the wrapper looks like and which props its submenu receives.

use std::fmt;

use menubar_types::{ClassList, MenubarClassNames, MenubarStyles, StyleMap};

use super::descriptor::{DeclaredAction, MenuDescriptor, MenubarChild};
use crate::ui::components::menu::{MenuAction, MenuProps};
use crate::ui::theme::class;

/// Inputs shared by every child of one render.
#[derive(Clone, Copy)]
pub struct ProjectionContext<'a> {
    pub active: Option<usize>,
    pub is_open: bool,
    /// Bar level default action.
    pub action: Option<&'a MenuAction>,
    pub styles: &'a MenubarStyles,
    pub class_names: &'a MenubarClassNames,
}

pub struct ItemProjection {
    pub index: usize,
    /// Rendering identity, `menu-bar-item-<id or index>`.
    pub key: String,
    pub tab_index: usize,
    pub label: String,
    pub display: bool,
    pub class_names: ClassList,
    pub style: StyleMap,
    pub menu_props: MenuProps,
}

impl fmt::Debug for ItemProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemProjection")
            .field("index", &self.index)
            .field("key", &self.key)
            .field("label", &self.label)
            .field("display", &self.display)
            .field("class_names", &self.class_names)
            .field("style", &self.style)
            .field("menu_props", &self.menu_props)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum ChildProjection {
    Item(ItemProjection),
    /// Not a menu unit. Keeps its index and renders its text, if any, as is.
    Inert { index: usize, text: Option<String> },
}

impl ChildProjection {
    pub fn index(&self) -> usize {
        match self {
            ChildProjection::Item(item) => item.index,
            ChildProjection::Inert { index, .. } => *index,
        }
    }

    pub fn as_item(&self) -> Option<&ItemProjection> {
        match self {
            ChildProjection::Item(item) => Some(item),
            ChildProjection::Inert { .. } => None,
        }
    }
}

/// Effective action of a unit: its own declaration, else the bar default.
/// A declared empty action stays empty.
pub fn effective_action(declared: &DeclaredAction, default: Option<&MenuAction>) -> Option<MenuAction> {
    match declared {
        DeclaredAction::Inherit => default.cloned(),
        DeclaredAction::Declared(action) => action.clone(),
    }
}

/// Submenu props for the unit at `index`.
pub fn menu_props(index: usize, descriptor: &MenuDescriptor, context: &ProjectionContext<'_>) -> MenuProps {
    MenuProps {
        display: is_displayed(index, context),
        menu_styles: context.styles.menu.overlay(&descriptor.menu_styles),
        menu_class_names: context.class_names.menu.overlay(&descriptor.menu_class_names),
        action: effective_action(&descriptor.action, context.action),
    }
}

pub fn project_children(children: &[MenubarChild], context: &ProjectionContext<'_>) -> Vec<ChildProjection> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| match child {
            MenubarChild::Menu(descriptor) => ChildProjection::Item(project_item(index, descriptor, context)),
            MenubarChild::Text(text) => ChildProjection::Inert {
                index,
                text: Some(text.clone()),
            },
            MenubarChild::Empty => ChildProjection::Inert { index, text: None },
        })
        .collect()
}

/// Classes of the bar's list container.
pub fn container_classes(class_names: &MenubarClassNames) -> ClassList {
    let mut classes = ClassList::new();
    classes.push(class::MENUBAR_CONTAINER);
    classes.push_opt(class_names.unorderedlist.as_deref());
    classes
}

fn is_displayed(index: usize, context: &ProjectionContext<'_>) -> bool {
    context.is_open && context.active == Some(index)
}

fn project_item(index: usize, descriptor: &MenuDescriptor, context: &ProjectionContext<'_>) -> ItemProjection {
    let display = is_displayed(index, context);

    let mut class_names = ClassList::new();
    class_names.push(class::MENUBAR_ITEM);
    class_names.push_opt(context.class_names.listitem.as_deref());
    class_names.push_opt(descriptor.item_class_names.as_deref());

    let mut style = context.styles.listitem.overlay(&descriptor.item_style);
    if display {
        class_names.push(class::MENUBAR_ITEM_ACTIVE);
        class_names.push_opt(context.class_names.active_listitem.as_deref());
        style = style.overlay(&context.styles.active_listitem);
    }

    let key = match descriptor.id.as_deref() {
        Some(id) => format!("menu-bar-item-{id}"),
        None => format!("menu-bar-item-{index}"),
    };

    ItemProjection {
        index,
        key,
        tab_index: index + 1,
        label: descriptor.label.clone(),
        display,
        class_names,
        style,
        menu_props: menu_props(index, descriptor, context),
    }
}
