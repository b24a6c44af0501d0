//! Component system for the menu bar TUI.
//!
//! Components are self-contained UI elements that own their local state,
//! react to input routed to them, and render into the `Rect` they are given.
//! They never mutate application state behind the app's back: anything that
//! should change `App` is returned as a [`Msg`].

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::app::{App, Msg};

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: the runtime hands key and mouse events to
///    `handle_key_events` and `handle_mouse_events` after the listener hub
///    has seen them.
/// 2. **Messages**: returned messages are applied with `App::update`.
/// 3. **Rendering**: `render` draws the component into its area.
///
/// # Example Implementation
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Status;
///
/// impl Component for Status {
///     fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
///         let text = if app.menubar_open { "open" } else { "closed" };
///         frame.render_widget(Paragraph::new(text), rect);
///     }
/// }
/// ```
pub(crate) trait Component {
    /// Handle key events routed to this component.
    ///
    /// # Returns
    ///
    /// Messages the application should apply.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Msg> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    ///
    /// # Returns
    ///
    /// Messages the application should apply.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Msg> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should only draw and record hit-test geometry; state
    /// changes belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
