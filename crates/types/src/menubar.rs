use serde::{Deserialize, Serialize};

use crate::style::{SlotClassNames, SlotStyles, StyleMap};

/// Bar-level inline style overrides.
///
/// Every field is optional; an absent field contributes no declarations.
/// `menu` is handed to each child menu as its default, overlaid by the
/// child's own menu styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenubarStyles {
    /// The bar container.
    pub unorderedlist: StyleMap,
    /// Every top-level label wrapper.
    pub listitem: StyleMap,
    /// Added on top of `listitem` for the wrapper whose submenu is displayed.
    pub active_listitem: StyleMap,
    /// Defaults for each child menu's slots.
    pub menu: SlotStyles,
}

/// Bar-level class name overrides, appended after the built-in classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenubarClassNames {
    pub unorderedlist: Option<String>,
    pub listitem: Option<String>,
    pub active_listitem: Option<String>,
    pub menu: SlotClassNames,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_fields_use_camel_case_names() {
        let styles: MenubarStyles = serde_json::from_str(
            r#"{"listitem":{"color":"red"},"activeListitem":{"background":"blue"},"menu":{"listitem":{"color":"green"}}}"#,
        )
        .unwrap();

        assert_eq!(styles.listitem, StyleMap::new().with("color", "red"));
        assert_eq!(styles.active_listitem, StyleMap::new().with("background", "blue"));
        assert!(styles.unorderedlist.is_empty());
        assert_eq!(styles.menu.slot("listitem"), Some(&StyleMap::new().with("color", "green")));
    }

    #[test]
    fn missing_configuration_defaults_to_empty() {
        let class_names: MenubarClassNames = serde_json::from_str("{}").unwrap();
        assert_eq!(class_names, MenubarClassNames::default());
    }
}
