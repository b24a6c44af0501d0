//! Runtime: event loop and input routing for the menu bar TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (raw mode, alternate screen, mouse capture).
//! - Read terminal input on a dedicated task and forward it over a channel.
//! - Deliver every input event to the listener hub first, then to the
//!   components, so document-level listeners see events the way a browser
//!   would deliver them.
//! - Drain messages posted by menu bar callbacks and render once per batch.
//!
//! Entry Point
//! - `run_app(document, source, theme)` is called from `lib::run`.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use menubar_types::MenubarDocument;
use menubar_util::DocumentSource;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc::{self, UnboundedReceiver},
};
use tracing::{debug, info, warn};

use crate::app::{App, Msg};
use crate::ui::events::EventHub;
use crate::ui::main_component::MainView;
use crate::ui::theme::LoadedTheme;

/// Spawn a task that blocks on terminal input and forwards `crossterm`
/// events over a channel.
///
/// Mouse moves are throttled to one per 16 ms; hovering is the only thing
/// they drive.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        let mut last_mouse_move: Option<Instant> = None;
        loop {
            match event::poll(sixteen_ms) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Ok(true) => {}
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    let should_send = !is_mouse_move || last_mouse_move.is_none_or(|last| last.elapsed() >= sixteen_ms);
                    if is_mouse_move && should_send {
                        last_mouse_move = Some(Instant::now());
                    }

                    if should_send && let Err(e) = sender.blocking_send(event) {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Whether `key` ends the session. `q` only quits while the bar is closed.
fn is_quit_key(app: &App, key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers.is_empty() && !app.menubar_open,
        _ => false,
    }
}

/// Routes one input event: listener hub first, then components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, hub: &EventHub, input_event: Event) -> Vec<Msg> {
    hub.dispatch(&input_event);
    match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Key(_) | Event::Resize(..) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies returned and posted messages. Returns whether anything changed.
fn apply_messages(app: &mut App, returned: Vec<Msg>, posted: &mut UnboundedReceiver<Msg>) -> bool {
    let mut changed = false;
    for msg in returned {
        changed |= app.update(msg);
    }
    while let Ok(msg) = posted.try_recv() {
        changed |= app.update(msg);
    }
    changed
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the input
/// reader, runs the event loop, and restores the terminal on exit.
pub async fn run_app(document: MenubarDocument, source: DocumentSource, theme: LoadedTheme) -> Result<()> {
    let hub = EventHub::new();
    let (mut app, mut posted) = App::new(document, source, theme);
    let mut main_view = MainView::new(hub.clone());
    main_view.menubar_view.mount(app.on_set_open());
    info!(menus = app.children.len(), theme = app.theme.definition.id, "menubar started");

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                if let Event::Key(key_event) = &event
                    && is_quit_key(&app, key_event)
                {
                    break;
                }
                let returned = handle_input_event(&mut app, &mut main_view, &hub, event);
                apply_messages(&mut app, returned, &mut posted);
            }
            Some(msg) = posted.recv() => {
                app.update(msg);
                apply_messages(&mut app, Vec::new(), &mut posted);
            }
            _ = signal::ctrl_c() => { break; }
        }

        // hover changes live in the bar itself, so every event redraws
        render(&mut terminal, &mut app, &mut main_view)?;
    }

    main_view.menubar_view.unmount();
    input_receiver.close();
    cleanup_terminal(&mut terminal)?;
    info!("menubar stopped");
    Ok(())
}
