//! Application state for the menu bar TUI.
//!
//! `App` owns everything the menu bar treats as external: whether the bar is
//! open, the children it shows, their configuration, and the callbacks it
//! reports through. Callbacks never touch `App` directly; they post a [`Msg`]
//! on a channel the runtime drains before every render.

use std::rc::Rc;

use crossterm::event::MouseEvent;
use menubar_types::{MenubarClassNames, MenubarDocument, MenubarStyles};
use menubar_util::DocumentSource;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use crate::ui::components::activity::{ActivityEntry, ActivityState};
use crate::ui::components::menu::MenuAction;
use crate::ui::components::menubar::{MenubarChild, MenubarProps, OnSetOpen};
use crate::ui::theme::{LoadedTheme, Stylesheet};

/// Channel name used for selections handled by the bar's default action.
pub const DEFAULT_CHANNEL: &str = "default";

/// Messages that change application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The bar asked for a new open state.
    SetMenubarOpen(bool),
    /// A submenu entry was selected.
    MenuActivated { channel: String, tag: String, checked: bool },
    ClearActivity,
}

pub struct App {
    /// Open state of the bar. Only `update` writes it.
    pub menubar_open: bool,
    pub children: Vec<MenubarChild>,
    pub menubar_styles: MenubarStyles,
    pub menubar_class_names: MenubarClassNames,
    pub stylesheet: Stylesheet,
    pub theme: LoadedTheme,
    pub activity: ActivityState,
    /// Where the menu document came from, shown in the hints row.
    pub source: DocumentSource,
    default_action: Option<MenuAction>,
    on_set_open: OnSetOpen,
}

impl App {
    /// Builds the app from a menu document. Returns the receiving end of the
    /// message channel the bar's callbacks post to.
    pub fn new(document: MenubarDocument, source: DocumentSource, theme: LoadedTheme) -> (Self, UnboundedReceiver<Msg>) {
        let (sender, receiver) = unbounded_channel();

        let mut stylesheet = Stylesheet::from_theme(&*theme.theme);
        stylesheet.extend_with_declarations(&document.stylesheet);

        let resolve_action = |channel: &str| channel_action(sender.clone(), channel);
        let children = document
            .menus
            .iter()
            .map(|decl| MenubarChild::from_decl(decl.as_ref(), &resolve_action))
            .collect();

        let open_sender = sender.clone();
        let on_set_open: OnSetOpen = Rc::new(move |open: bool| post(&open_sender, Msg::SetMenubarOpen(open)));

        let app = Self {
            menubar_open: false,
            children,
            menubar_styles: document.styles,
            menubar_class_names: document.class_names,
            stylesheet,
            theme,
            activity: ActivityState::default(),
            source,
            default_action: Some(channel_action(sender, DEFAULT_CHANNEL)),
            on_set_open,
        };
        (app, receiver)
    }

    /// Applies a message. Returns whether anything visible changed.
    pub fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::SetMenubarOpen(open) => {
                if self.menubar_open == open {
                    return false;
                }
                self.menubar_open = open;
                self.activity.push(if open { ActivityEntry::Opened } else { ActivityEntry::Closed });
                debug!(open, "menubar open state changed");
                true
            }
            Msg::MenuActivated { channel, tag, checked } => {
                self.activity.push(ActivityEntry::Selected { channel, tag, checked });
                true
            }
            Msg::ClearActivity => {
                let changed = !self.activity.is_empty();
                self.activity.clear();
                changed
            }
        }
    }

    pub fn on_set_open(&self) -> &OnSetOpen {
        &self.on_set_open
    }

    /// Props for routing input through the bar.
    pub fn menubar_props(&mut self) -> MenubarProps<'_> {
        MenubarProps {
            children: &mut self.children,
            action: self.default_action.clone(),
            is_open: self.menubar_open,
            on_set_open: self.on_set_open.clone(),
            menubar_styles: &self.menubar_styles,
            menubar_class_names: &self.menubar_class_names,
        }
    }

    /// Props plus the stylesheet, for drawing the bar.
    pub fn menubar_render_parts(&mut self) -> (MenubarProps<'_>, &Stylesheet) {
        let props = MenubarProps {
            children: &mut self.children,
            action: self.default_action.clone(),
            is_open: self.menubar_open,
            on_set_open: self.on_set_open.clone(),
            menubar_styles: &self.menubar_styles,
            menubar_class_names: &self.menubar_class_names,
        };
        (props, &self.stylesheet)
    }
}

/// A selection callback that posts to the named channel.
fn channel_action(sender: UnboundedSender<Msg>, channel: &str) -> MenuAction {
    let channel = channel.to_string();
    Rc::new(move |tag: &str, checked: bool, event: &MouseEvent| {
        debug!(channel = %channel, tag, checked, column = event.column, row = event.row, "menu entry activated");
        post(
            &sender,
            Msg::MenuActivated {
                channel: channel.clone(),
                tag: tag.to_string(),
                checked,
            },
        );
    })
}

fn post(sender: &UnboundedSender<Msg>, msg: Msg) {
    if let Err(error) = sender.send(msg) {
        warn!("Failed to post message: {}", error);
    }
}
