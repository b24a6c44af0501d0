//! UI components: menu bar, submenu, activity panel.

pub mod activity;
pub mod component;
pub mod menu;
pub mod menubar;

pub use activity::ActivityComponent;
pub use component::*;
pub use menubar::MenubarComponent;
