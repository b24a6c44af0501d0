//! Declarative menu bar document.
//!
//! A document describes the children of a bar, the bar-level overrides, and
//! extra stylesheet classes. It is what the CLI loads from a YAML or JSON
//! configuration file.
//!
//! ```yaml
//! menus:
//!   - label: File
//!     entries:
//!       - { tag: open, label: Open }
//!       - { divider: true }
//!       - { tag: autosave, label: Autosave, checked: false }
//!   - "|"            # inert text passthrough
//!   - null           # absent child, rendered as nothing
//!   - 42             # anything else is kept as an inert placeholder
//! styles:
//!   listitem: { color: white }
//! classNames:
//!   activeListitem: emphasized
//! stylesheet:
//!   emphasized: { fontWeight: bold }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::menubar::{MenubarClassNames, MenubarStyles};
use crate::style::{SlotClassNames, SlotStyles, StyleMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenubarDocument {
    /// Children in display order. `null` entries are kept so indices stay
    /// aligned with the source list.
    pub menus: Vec<Option<ChildDecl>>,
    pub styles: MenubarStyles,
    pub class_names: MenubarClassNames,
    /// Additional class definitions, `class name -> declarations`.
    pub stylesheet: IndexMap<String, StyleMap>,
}

impl MenubarDocument {
    /// Counts of the different child kinds, in document order.
    pub fn summary(&self) -> DocumentSummary {
        let mut summary = DocumentSummary::default();
        for child in &self.menus {
            match child {
                Some(ChildDecl::Menu(menu)) => {
                    summary.menus += 1;
                    summary.entries += menu.entries.iter().filter(|e| !e.divider).count();
                }
                Some(ChildDecl::Text(_)) => summary.inert += 1,
                Some(ChildDecl::Malformed(_)) => summary.malformed += 1,
                None => summary.empty += 1,
            }
        }
        summary.stylesheet_classes = self.stylesheet.len();
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub menus: usize,
    pub entries: usize,
    pub inert: usize,
    pub empty: usize,
    pub malformed: usize,
    pub stylesheet_classes: usize,
}

/// One child of the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildDecl {
    /// Plain text, passed through without becoming a menu.
    Text(String),
    Menu(MenuDecl),
    /// Anything that is neither text nor a menu, such as a number or a map
    /// without a `label`. Kept so the rest of the document still loads.
    Malformed(serde_json::Value),
}

impl ChildDecl {
    /// Text to show for a malformed scalar child. Collections show nothing.
    pub fn placeholder_text(&self) -> Option<String> {
        match self {
            ChildDecl::Malformed(serde_json::Value::Bool(value)) => Some(value.to_string()),
            ChildDecl::Malformed(serde_json::Value::Number(value)) => Some(value.to_string()),
            ChildDecl::Malformed(serde_json::Value::String(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

/// A top-level label with its submenu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDecl {
    pub label: String,
    /// Stable identifier used for the rendering key instead of the position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Action channel for this menu.
    ///
    /// - absent: inherit the bar default action
    /// - `null`: declared but empty, the menu gets no action at all
    /// - a name: a dedicated action reporting under that channel name
    #[serde(default, deserialize_with = "deserialize_declared", skip_serializing_if = "Option::is_none")]
    pub action: Option<Option<String>>,
    #[serde(default)]
    pub menu_styles: SlotStyles,
    #[serde(default)]
    pub menu_class_names: SlotClassNames,
    #[serde(default)]
    pub item_style: StyleMap,
    #[serde(default)]
    pub item_class_names: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryDecl>,
}

/// A submenu entry or divider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDecl {
    pub tag: String,
    pub label: String,
    /// `Some` makes the entry checkable.
    pub checked: Option<bool>,
    pub divider: bool,
}

/// Distinguishes a present-but-null field from an absent one.
fn deserialize_declared<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
