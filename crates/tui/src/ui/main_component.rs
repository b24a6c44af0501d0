use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::components::{ActivityComponent, Component, MenubarComponent};
use super::events::EventHub;
use crate::app::{App, Msg};

/// Root view: the menu bar on the first row, the activity panel below it,
/// and a hints row at the bottom.
#[derive(Debug)]
pub struct MainView {
    pub menubar_view: MenubarComponent,
    pub activity_view: ActivityComponent,
}

impl MainView {
    pub fn new(hub: EventHub) -> Self {
        Self {
            menubar_view: MenubarComponent::new(hub),
            activity_view: ActivityComponent::new(),
        }
    }

    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Msg> {
        self.activity_view.handle_key_events(app, key)
    }

    pub fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Msg> {
        self.menubar_view.handle_mouse_events(app, mouse)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(app.theme.theme.text_primary_style()), area);
        let [bar, body, hints] = Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(area);

        self.activity_view.render(frame, body, app);
        render_hints(frame, hints, app);
        // last, so an open submenu draws over the body
        Component::render(&mut self.menubar_view, frame, bar, app);
    }
}

fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &*app.theme.theme;
    let key = theme.accent_emphasis_style();
    let text = theme.text_muted_style();
    let quit = if app.menubar_open { "Ctrl+C" } else { "q" };
    let line = Line::from(vec![
        Span::styled(" Esc", key),
        Span::styled(" close menu  ", text),
        Span::styled(quit, key),
        Span::styled(" quit  ", text),
        Span::styled("c", key),
        Span::styled(" clear activity  ", text),
        Span::styled(format!("{} · {}", app.source, app.theme.definition.label), text),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::load;
    use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use menubar_util::{DocumentSource, builtin_document};
    use ratatui::{Terminal, backend::TestBackend};

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn open_file_menu_draws_over_the_activity_panel() {
        let hub = EventHub::new();
        let mut view = MainView::new(hub.clone());
        let (mut app, mut receiver) = App::new(builtin_document(), DocumentSource::BuiltIn, load(Some("nord")));
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).unwrap();
        assert!(row(&terminal, 0).starts_with(" File  Edit  View  Help "));

        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        hub.dispatch(&press);
        if let Event::Mouse(mouse) = press {
            view.handle_mouse_events(&mut app, mouse);
        }
        while let Ok(msg) = receiver.try_recv() {
            app.update(msg);
        }
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).unwrap();

        assert!(app.menubar_open);
        assert!(row(&terminal, 2).contains("New"));

        hub.dispatch(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        while let Ok(msg) = receiver.try_recv() {
            app.update(msg);
        }
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).unwrap();

        assert!(!app.menubar_open);
        assert!(!row(&terminal, 2).contains("New"));
    }
}
