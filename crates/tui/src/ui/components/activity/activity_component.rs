//! Activity panel listing what the menu bar reported: open and close
//! requests and menu selections, newest first.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::state::ActivityEntry;
use crate::app::{App, Msg};
use crate::ui::components::component::Component;

#[derive(Debug, Default)]
pub struct ActivityComponent;

impl ActivityComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Component for ActivityComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Msg> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.is_empty() && !app.activity.is_empty() => vec![Msg::ClearActivity],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(false))
            .title(Span::styled(" Activity ", theme.text_secondary_style()));
        let inner = block.inner(rect);

        if app.activity.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Click a label to open the menu bar, then pick an entry.",
                theme.text_muted_style(),
            )))
            .block(block);
            frame.render_widget(hint, rect);
            return;
        }

        let items: Vec<ListItem> = app
            .activity
            .recent(inner.height as usize)
            .map(|entry| {
                let style = match entry {
                    ActivityEntry::Selected { .. } => theme.text_primary_style(),
                    ActivityEntry::Opened | ActivityEntry::Closed => theme.text_muted_style(),
                };
                ListItem::new(Line::from(Span::styled(entry.to_string(), style)))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), rect);
    }
}

