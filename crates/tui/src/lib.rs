//! # Menubar TUI Library
//!
//! A terminal menu bar: a row of labels whose submenus drop down while the
//! bar is open. The bar tracks which label is active, asks its owner to open
//! or close it, and closes on Escape or on a press outside its footprint.
//!
//! ## Architecture
//!
//! - [`ui::events`] is the listener hub components use for input they do not
//!   own, with subscriptions released on drop.
//! - [`ui::outside`] detects presses outside a rendered region.
//! - [`ui::components::menubar`] holds the bar's state machine, child
//!   projection, and rendering.
//! - [`ui::components::menu`] is the submenu the bar drives.
//! - [`app`] owns the open state and applies messages posted by callbacks.

pub mod app;
pub mod ui;

use anyhow::Result;
use menubar_types::MenubarDocument;
use menubar_util::DocumentSource;

pub use ui::theme::{LoadedTheme, load as load_theme};

/// Runs the menu bar TUI until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into or restored from
/// raw mode, or when drawing fails.
pub async fn run(document: MenubarDocument, source: DocumentSource, theme: LoadedTheme) -> Result<()> {
    ui::runtime::run_app(document, source, theme).await
}
