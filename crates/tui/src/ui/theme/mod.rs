//! Theme styling for the menu bar UI.
//!
//! Color palettes (Dracula, Nord, and an ANSI 256-color fallback) map onto
//! semantic roles; the [`Stylesheet`] turns those roles into the class styles
//! the bar and its menus are drawn with.

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod loader;
pub mod nord;
pub mod roles;
pub mod stylesheet;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use loader::{LoadedTheme, load};
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};
pub use stylesheet::{Stylesheet, class, style_from_declarations};
