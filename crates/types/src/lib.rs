//! Shared data model for the menu bar: inline style declarations, class name
//! lists, bar configuration objects, and the declarative menu document.

pub mod document;
pub mod menubar;
pub mod style;

pub use document::{ChildDecl, DocumentSummary, EntryDecl, MenuDecl, MenubarDocument};
pub use menubar::{MenubarClassNames, MenubarStyles};
pub use style::{ClassList, SlotClassNames, SlotStyles, StyleMap, StyleValue};
