//! Inline style declarations and class name lists.
//!
//! Styles are kept renderer-agnostic here: a [`StyleMap`] is an ordered bag of
//! CSS-like `property -> value` declarations. The TUI crate resolves them into
//! terminal styles; properties it does not understand are carried but ignored.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single declaration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Returns the textual form when the value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Flag(flag) => write!(f, "{flag}"),
            StyleValue::Number(number) => write!(f, "{number}"),
            StyleValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Flag(value)
    }
}

/// Ordered set of inline style declarations.
///
/// Insertion order is preserved so the merged result of an overlay lists the
/// base declarations first, followed by anything only the overlay declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(property, value)| (property.as_str(), value))
    }

    /// Returns `self` with every declaration of `over` written on top.
    ///
    /// Conflicting properties take the value from `over`.
    pub fn overlay(&self, over: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (property, value) in &over.0 {
            merged.0.insert(property.clone(), value.clone());
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: Into<String>,
    V: Into<StyleValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Per-slot style maps, e.g. `listitem -> { color: "red" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotStyles(IndexMap<String, StyleMap>);

impl SlotStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: impl Into<String>, styles: StyleMap) -> Self {
        self.0.insert(slot.into(), styles);
        self
    }

    pub fn slot(&self, slot: &str) -> Option<&StyleMap> {
        self.0.get(slot)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges two slot maps slot by slot, and inside each slot declaration by
    /// declaration. `over` wins on conflicting properties.
    pub fn overlay(&self, over: &SlotStyles) -> SlotStyles {
        let mut merged = self.clone();
        for (slot, styles) in &over.0 {
            let combined = match merged.0.get(slot) {
                Some(base) => base.overlay(styles),
                None => styles.clone(),
            };
            merged.0.insert(slot.clone(), combined);
        }
        merged
    }
}

/// Per-slot class strings, e.g. `listitem -> "compact muted"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotClassNames(IndexMap<String, String>);

impl SlotClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: impl Into<String>, class_names: impl Into<String>) -> Self {
        self.0.insert(slot.into(), class_names.into());
        self
    }

    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.0.get(slot).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slot-level merge: a slot present in `over` replaces the base string.
    pub fn overlay(&self, over: &SlotClassNames) -> SlotClassNames {
        let mut merged = self.clone();
        for (slot, class_names) in &over.0 {
            merged.0.insert(slot.clone(), class_names.clone());
        }
        merged
    }
}

/// Ordered list of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every whitespace separated token of `class_names`.
    pub fn push(&mut self, class_names: &str) {
        self.0.extend(class_names.split_whitespace().map(str::to_string));
    }

    /// Appends the tokens of an optional class string; `None` adds nothing.
    pub fn push_opt(&mut self, class_names: Option<&str>) {
        if let Some(class_names) = class_names {
            self.push(class_names);
        }
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.0.iter().any(|c| c == class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
