//! Dropdown submenu primitive.
//!
//! The menu bar treats a submenu as an opaque [`MenuUnit`]: it passes down
//! [`MenuProps`] (visibility, merged styles and classes, effective action)
//! and lets the unit draw itself and react to the pointer. [`Menu`] is the
//! stock implementation, a bordered list of items and dividers.

#[allow(clippy::module_inception)]
mod menu;

pub use menu::{Menu, MenuAction, MenuEntry, MenuProps, MenuUnit, slot};
