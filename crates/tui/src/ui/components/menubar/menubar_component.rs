use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use menubar_types::{MenubarClassNames, MenubarStyles};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, Paragraph},
};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use super::descriptor::MenubarChild;
use super::projection::{ChildProjection, ProjectionContext, container_classes, menu_props, project_children};
use super::state::{ActivationState, OnSetOpen};
use crate::app::{App, Msg};
use crate::ui::components::component::Component;
use crate::ui::components::menu::MenuAction;
use crate::ui::events::{EventHub, Subscription};
use crate::ui::outside::{RegionRef, on_click_outside};
use crate::ui::theme::Stylesheet;

/// Everything the bar reads from its owner on a render or an input event.
pub struct MenubarProps<'a> {
    /// Menu units in display order. Position is identity.
    pub children: &'a mut [MenubarChild],
    /// Default selection callback for units that declare none.
    pub action: Option<MenuAction>,
    pub is_open: bool,
    pub on_set_open: OnSetOpen,
    pub menubar_styles: &'a MenubarStyles,
    pub menubar_class_names: &'a MenubarClassNames,
}

/// Where the last render put things.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenubarLayout {
    pub bar: Rect,
    /// Label rect for every menu unit, by child index.
    pub items: Vec<(usize, Rect)>,
    /// The displayed submenu, if any.
    pub menu: Option<(usize, Rect)>,
}

impl MenubarLayout {
    fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.items.iter().find(|(_, area)| area.contains(position)).map(|(index, _)| *index)
    }
}

/// Listeners installed while mounted, bound to one `on_set_open`.
struct MenubarSubscriptions {
    close_with: OnSetOpen,
    _escape: Subscription,
    _outside: Subscription,
}

/// Horizontal menu bar.
///
/// Owns only which item is active. Whether the bar is open belongs to the
/// caller and arrives through [`MenubarProps`]; the bar asks for changes via
/// `on_set_open`. A submenu is displayed exactly when the bar is open and its
/// unit is the active one.
///
/// While mounted the bar listens, through the [`EventHub`], for Escape and
/// for presses outside its footprint; both close it.
pub struct MenubarComponent {
    hub: EventHub,
    state: Rc<ActivationState>,
    region: RegionRef,
    subscriptions: Option<MenubarSubscriptions>,
    layout: MenubarLayout,
    pointer_inside: bool,
    /// Label under the pointer after the last pointer event.
    hovered_item: Option<usize>,
}

impl std::fmt::Debug for MenubarComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenubarComponent")
            .field("state", &self.state)
            .field("mounted", &self.is_mounted())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl MenubarComponent {
    pub fn new(hub: EventHub) -> Self {
        Self {
            hub,
            state: Rc::new(ActivationState::new()),
            region: RegionRef::new(),
            subscriptions: None,
            layout: MenubarLayout::default(),
            pointer_inside: false,
            hovered_item: None,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.active_index()
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    pub fn layout(&self) -> &MenubarLayout {
        &self.layout
    }

    pub fn region(&self) -> &RegionRef {
        &self.region
    }

    pub fn is_mounted(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Installs the Escape and outside-press listeners. Mounting twice with
    /// the same callback keeps the existing listeners.
    pub fn mount(&mut self, on_set_open: &OnSetOpen) {
        self.sync_subscriptions(on_set_open);
    }

    /// Releases both listeners and forgets the footprint.
    pub fn unmount(&mut self) {
        if self.subscriptions.take().is_some() {
            debug!("menubar unmounted");
        }
        self.region.clear();
        self.layout = MenubarLayout::default();
        self.pointer_inside = false;
        self.hovered_item = None;
    }

    /// Keeps the listeners bound to the current `on_set_open`. A different
    /// callback replaces both listeners; the old ones are dropped first.
    pub fn sync_subscriptions(&mut self, on_set_open: &OnSetOpen) {
        if let Some(current) = &self.subscriptions
            && Rc::ptr_eq(&current.close_with, on_set_open)
        {
            return;
        }
        let replacing = self.subscriptions.take().is_some();

        let state = self.state.clone();
        let close_with = on_set_open.clone();
        let escape = self.hub.add_key_listener(move |key: &KeyEvent| {
            if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
                state.close(&close_with);
            }
        });

        let state = self.state.clone();
        let close_with = on_set_open.clone();
        let outside = on_click_outside(&self.hub, self.region.clone(), move || state.close(&close_with));

        self.subscriptions = Some(MenubarSubscriptions {
            close_with: on_set_open.clone(),
            _escape: escape,
            _outside: outside,
        });
        debug!(replacing, "menubar listeners installed");
    }

    /// A press inside the bar asks the owner to open it.
    pub fn handle_mouse_down(&self, on_set_open: &OnSetOpen) {
        debug!("menubar open requested");
        on_set_open(true);
    }

    pub fn handle_mouse_over(&self, index: usize) -> bool {
        self.state.handle_mouse_over(index)
    }

    pub fn handle_mouse_out(&self, is_open: bool) -> bool {
        self.state.handle_mouse_out(is_open)
    }

    pub fn close(&self, on_set_open: &OnSetOpen) {
        self.state.close(on_set_open);
    }

    /// Resyncs with the owner's `is_open`.
    pub fn sync_open(&self, is_open: bool) -> bool {
        self.state.sync_open(is_open)
    }

    /// Routes a terminal mouse event through the bar.
    ///
    /// The displayed submenu sees the event first. Then presses inside the
    /// footprint open the bar and moves over a label activate it. Leaving a
    /// label or the footprint counts as mouse-out. Returns whether the event
    /// landed inside the footprint.
    pub fn handle_mouse_event(&mut self, props: &mut MenubarProps<'_>, mouse: &MouseEvent) -> bool {
        self.forward_to_menu(props, mouse);

        let inside = self.region.contains(mouse.column, mouse.row);
        let item = self.layout.item_at(mouse.column, mouse.row);
        let left_label = self.hovered_item.is_some() && item.is_none();
        let left_footprint = self.pointer_inside && !inside;
        match mouse.kind {
            MouseEventKind::Down(_) if inside => {
                // the pointer is over the label it presses even when no move preceded it
                match item {
                    Some(index) => {
                        self.handle_mouse_over(index);
                    }
                    None if left_label => {
                        self.handle_mouse_out(props.is_open);
                    }
                    None => {}
                }
                self.handle_mouse_down(&props.on_set_open);
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => match item {
                Some(index) => {
                    self.handle_mouse_over(index);
                }
                None if left_label || left_footprint => {
                    self.handle_mouse_out(props.is_open);
                }
                None => {}
            },
            _ => {}
        }
        if matches!(mouse.kind, MouseEventKind::Down(_) | MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.hovered_item = item;
        }
        self.pointer_inside = inside;
        inside
    }

    fn forward_to_menu(&mut self, props: &mut MenubarProps<'_>, mouse: &MouseEvent) {
        let Some((index, _)) = self.layout.menu else {
            return;
        };
        let context = ProjectionContext {
            active: self.state.active_index(),
            is_open: props.is_open,
            action: props.action.as_ref(),
            styles: props.menubar_styles,
            class_names: props.menubar_class_names,
        };
        if let Some(MenubarChild::Menu(descriptor)) = props.children.get_mut(index) {
            let menu_props = menu_props(index, descriptor, &context);
            descriptor.menu.handle_mouse(&menu_props, mouse);
        }
    }

    /// Draws the bar into the first row of `area` and the displayed submenu
    /// below its label, then records the footprint.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: &mut MenubarProps<'_>, stylesheet: &Stylesheet) {
        self.sync_subscriptions(&props.on_set_open);
        self.sync_open(props.is_open);

        let context = ProjectionContext {
            active: self.state.active_index(),
            is_open: props.is_open,
            action: props.action.as_ref(),
            styles: props.menubar_styles,
            class_names: props.menubar_class_names,
        };
        let projections = project_children(props.children, &context);

        let bar = Rect { height: area.height.min(1), ..area };
        let container_style = stylesheet.resolve(&container_classes(props.menubar_class_names), &props.menubar_styles.unorderedlist);
        frame.render_widget(Block::default().style(container_style), bar);

        let mut layout = MenubarLayout {
            bar,
            ..MenubarLayout::default()
        };
        let mut x = bar.x;
        for projection in &projections {
            let remaining = bar.right().saturating_sub(x);
            match projection {
                ChildProjection::Item(item) => {
                    let text = format!(" {} ", item.label);
                    let label_area = Rect::new(x, bar.y, (text.width() as u16).min(remaining), bar.height);
                    let style = stylesheet.resolve(&item.class_names, &item.style);
                    frame.render_widget(Paragraph::new(Line::from(text)).style(style), label_area);
                    layout.items.push((item.index, label_area));
                    x = x.saturating_add(label_area.width);
                }
                ChildProjection::Inert { text: Some(text), .. } => {
                    let text_area = Rect::new(x, bar.y, (text.width() as u16).min(remaining), bar.height);
                    frame.render_widget(Paragraph::new(text.as_str()).style(container_style), text_area);
                    x = x.saturating_add(text_area.width);
                }
                ChildProjection::Inert { text: None, .. } => {}
            }
        }

        for projection in &projections {
            let ChildProjection::Item(item) = projection else {
                continue;
            };
            let anchor = layout
                .items
                .iter()
                .find(|(index, _)| *index == item.index)
                .map(|(_, area)| *area)
                .unwrap_or_default();
            if let Some(MenubarChild::Menu(descriptor)) = props.children.get_mut(item.index)
                && let Some(drawn) = descriptor.menu.render(frame, anchor, &item.menu_props, stylesheet)
            {
                layout.menu = Some((item.index, drawn));
            }
        }

        let mut footprint = vec![bar];
        footprint.extend(layout.menu.map(|(_, area)| area));
        self.region.set(footprint);
        trace!(items = layout.items.len(), menu = ?layout.menu, "menubar rendered");
        self.layout = layout;
    }
}

impl Component for MenubarComponent {
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Msg> {
        let mut props = app.menubar_props();
        self.handle_mouse_event(&mut props, &mouse);
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let (mut props, stylesheet) = app.menubar_render_parts();
        MenubarComponent::render(self, frame, rect, &mut props, stylesheet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::menu::{Menu, MenuEntry};
    use crate::ui::components::menubar::MenuDescriptor;
    use crossterm::event::{Event, KeyModifiers, MouseButton};
    use ratatui::{Terminal, backend::TestBackend};
    use std::cell::{Cell, RefCell};

    struct Harness {
        hub: EventHub,
        bar: MenubarComponent,
        children: Vec<MenubarChild>,
        styles: MenubarStyles,
        class_names: MenubarClassNames,
        action: Option<MenuAction>,
        open: Rc<Cell<bool>>,
        requests: Rc<RefCell<Vec<bool>>>,
        on_set_open: OnSetOpen,
        terminal: Terminal<TestBackend>,
    }

    fn on_set_open_for(open: &Rc<Cell<bool>>, requests: &Rc<RefCell<Vec<bool>>>) -> OnSetOpen {
        let open = open.clone();
        let requests = requests.clone();
        Rc::new(move |value: bool| {
            requests.borrow_mut().push(value);
            open.set(value);
        })
    }

    impl Harness {
        fn new(children: Vec<MenubarChild>) -> Self {
            let hub = EventHub::new();
            let open = Rc::new(Cell::new(false));
            let requests: Rc<RefCell<Vec<bool>>> = Rc::default();
            let on_set_open = on_set_open_for(&open, &requests);
            Self {
                bar: MenubarComponent::new(hub.clone()),
                hub,
                children,
                styles: MenubarStyles::default(),
                class_names: MenubarClassNames::default(),
                action: None,
                open,
                requests,
                on_set_open,
                terminal: Terminal::new(TestBackend::new(40, 10)).unwrap(),
            }
        }

        fn abc() -> Self {
            Self::new(["A", "B", "C"].into_iter().map(|label| unit(label, "x")).collect())
        }

        fn render(&mut self) {
            let mut props = MenubarProps {
                children: &mut self.children,
                action: self.action.clone(),
                is_open: self.open.get(),
                on_set_open: self.on_set_open.clone(),
                menubar_styles: &self.styles,
                menubar_class_names: &self.class_names,
            };
            let stylesheet = Stylesheet::new();
            let bar = &mut self.bar;
            self.terminal
                .draw(|frame| bar.render(frame, frame.area(), &mut props, &stylesheet))
                .unwrap();
        }

        /// Delivers an event the way the runtime does: hub first, then the bar.
        fn send(&mut self, event: Event) {
            self.hub.dispatch(&event);
            if let Event::Mouse(mouse) = event {
                let mut props = MenubarProps {
                    children: &mut self.children,
                    action: self.action.clone(),
                    is_open: self.open.get(),
                    on_set_open: self.on_set_open.clone(),
                    menubar_styles: &self.styles,
                    menubar_class_names: &self.class_names,
                };
                self.bar.handle_mouse_event(&mut props, &mouse);
            }
        }

        fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
            self.send(Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }));
        }

        fn escape(&mut self) {
            self.send(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        }

        fn row(&self, y: u16) -> String {
            let buffer = self.terminal.backend().buffer();
            (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
        }
    }

    fn unit(label: &str, entry: &str) -> MenubarChild {
        MenuDescriptor::new(label, Menu::new(vec![MenuEntry::item(entry, entry)])).into()
    }

    fn press() -> MouseEventKind {
        MouseEventKind::Down(MouseButton::Left)
    }

    // labels render as " A " " B " " C " from column 0
    const B_COLUMN: u16 = 4;

    #[test]
    fn open_hover_escape_scenario() {
        let mut harness = Harness::abc();
        harness.render();
        assert!(!harness.open.get());
        assert_eq!(harness.bar.active_index(), None);

        harness.mouse(press(), 30, 0);
        assert!(harness.open.get());
        assert_eq!(harness.bar.active_index(), None);
        harness.render();

        harness.mouse(MouseEventKind::Moved, B_COLUMN, 0);
        harness.render();
        assert_eq!(harness.bar.active_index(), Some(1));
        assert_eq!(harness.bar.layout().menu.map(|(index, _)| index), Some(1));

        harness.escape();
        assert!(!harness.open.get());
        assert_eq!(harness.bar.active_index(), None);
        harness.render();
        assert_eq!(harness.bar.layout().menu, None);
        assert_eq!(*harness.requests.borrow(), vec![true, false]);
    }

    #[test]
    fn hovering_the_same_item_twice_writes_once() {
        let mut harness = Harness::abc();
        harness.render();

        harness.mouse(MouseEventKind::Moved, 1, 0);
        let revision = harness.bar.state().revision();
        harness.mouse(MouseEventKind::Moved, 2, 0);

        assert_eq!(harness.bar.active_index(), Some(0));
        assert_eq!(harness.bar.state().revision(), revision);
    }

    #[test]
    fn pressing_a_label_opens_its_menu() {
        let mut harness = Harness::abc();
        harness.render();

        harness.mouse(press(), B_COLUMN, 0);
        harness.render();

        assert_eq!(harness.bar.layout().menu.map(|(index, _)| index), Some(1));
        assert!(harness.row(2).contains("x"));
    }

    fn press_outside(harness: &mut Harness) {
        harness.mouse(press(), 30, 8);
    }

    #[derive(Debug, Clone, Copy)]
    enum Reached {
        Closed,
        ClosedHovering,
        OpenNoneActive,
        OpenItemActive,
    }

    impl Reached {
        const ALL: [Reached; 4] = [Reached::Closed, Reached::ClosedHovering, Reached::OpenNoneActive, Reached::OpenItemActive];

        fn drive(self, harness: &mut Harness) {
            harness.render();
            match self {
                Reached::Closed => {}
                Reached::ClosedHovering => harness.mouse(MouseEventKind::Moved, B_COLUMN, 0),
                Reached::OpenNoneActive => harness.mouse(press(), 30, 0),
                Reached::OpenItemActive => harness.mouse(press(), B_COLUMN, 0),
            }
            harness.render();
        }
    }

    #[test]
    fn escape_and_outside_press_close_from_every_state() {
        let closers: [(&str, fn(&mut Harness)); 2] = [("escape", Harness::escape as fn(&mut Harness)), ("outside press", press_outside)];
        for reached in Reached::ALL {
            for (name, closer) in closers {
                let mut harness = Harness::abc();
                reached.drive(&mut harness);
                let before = harness.requests.borrow().len();

                closer(&mut harness);

                assert!(!harness.open.get(), "{reached:?} / {name}");
                assert_eq!(harness.bar.active_index(), None, "{reached:?} / {name}");
                assert_eq!(harness.requests.borrow().len(), before + 1, "{reached:?} / {name}");
                assert_eq!(harness.requests.borrow().last(), Some(&false), "{reached:?} / {name}");
            }
        }
    }

    #[test]
    fn press_inside_the_open_submenu_is_not_outside() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(press(), B_COLUMN, 0);
        harness.render();
        let (_, menu) = harness.bar.layout().menu.unwrap();

        harness.mouse(press(), menu.x + 2, menu.y + 1);

        assert!(harness.open.get());
        assert_eq!(harness.bar.active_index(), Some(1));
    }

    #[test]
    fn mouse_out_leaves_an_open_bar_alone() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(press(), B_COLUMN, 0);
        harness.render();

        harness.mouse(MouseEventKind::Moved, 30, 8);

        assert!(harness.open.get());
        assert_eq!(harness.bar.active_index(), Some(1));
    }

    #[test]
    fn mouse_out_clears_hover_on_a_closed_bar() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(MouseEventKind::Moved, B_COLUMN, 0);
        assert_eq!(harness.bar.active_index(), Some(1));

        harness.mouse(MouseEventKind::Moved, 30, 8);

        assert_eq!(harness.bar.active_index(), None);
    }

    #[test]
    fn leaving_a_label_on_a_closed_bar_clears_hover() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(MouseEventKind::Moved, 1, 0);
        assert_eq!(harness.bar.active_index(), Some(0));

        harness.mouse(MouseEventKind::Moved, 30, 0);
        assert_eq!(harness.bar.active_index(), None);

        harness.mouse(press(), 30, 0);
        harness.render();
        assert!(harness.open.get());
        assert_eq!(harness.bar.layout().menu, None);
    }

    #[test]
    fn leaving_a_label_on_an_open_bar_keeps_it_active() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(press(), B_COLUMN, 0);
        harness.render();

        harness.mouse(MouseEventKind::Moved, 30, 0);

        assert_eq!(harness.bar.active_index(), Some(1));
    }

    #[test]
    fn external_close_resets_on_next_render() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(press(), B_COLUMN, 0);
        harness.render();

        harness.open.set(false);
        harness.render();

        assert_eq!(harness.bar.active_index(), None);
        assert_eq!(harness.bar.layout().menu, None);
    }

    #[test]
    fn renders_keep_one_pair_of_listeners() {
        let mut harness = Harness::abc();
        for _ in 0..3 {
            harness.render();
        }
        assert_eq!(harness.hub.listener_count(), 2);

        let replacement_requests: Rc<RefCell<Vec<bool>>> = Rc::default();
        harness.on_set_open = on_set_open_for(&harness.open, &replacement_requests);
        harness.render();
        assert_eq!(harness.hub.listener_count(), 2);

        harness.escape();
        assert!(harness.requests.borrow().is_empty());
        assert_eq!(*replacement_requests.borrow(), vec![false]);
    }

    #[test]
    fn unmount_releases_listeners() {
        let mut harness = Harness::abc();
        harness.render();
        harness.bar.unmount();

        assert_eq!(harness.hub.listener_count(), 0);
        assert!(!harness.bar.region().is_attached());
        harness.escape();
        assert!(harness.requests.borrow().is_empty());
    }

    #[test]
    fn dropping_the_bar_releases_listeners() {
        let mut harness = Harness::abc();
        harness.render();
        let hub = harness.hub.clone();

        drop(harness);

        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn selection_reaches_the_default_action() {
        let calls: Rc<RefCell<Vec<String>>> = Rc::default();
        let seen = calls.clone();
        let mut harness = Harness::abc();
        harness.action = Some(Rc::new(move |tag: &str, _checked: bool, _event: &MouseEvent| seen.borrow_mut().push(tag.to_string())));
        harness.render();
        harness.mouse(press(), 1, 0);
        harness.render();
        let (_, menu) = harness.bar.layout().menu.unwrap();

        harness.mouse(press(), menu.x + 2, menu.y + 1);

        assert_eq!(*calls.borrow(), vec!["x".to_string()]);
    }

    #[test]
    fn inert_children_render_and_never_activate() {
        let mut harness = Harness::new(vec![unit("A", "a"), MenubarChild::Text("|".into()), MenubarChild::Empty, unit("B", "b")]);
        harness.render();

        assert!(harness.row(0).starts_with(" A | B "));
        harness.mouse(press(), 3, 0);
        harness.render();
        assert_eq!(harness.bar.active_index(), None);
        assert_eq!(harness.bar.layout().menu, None);

        harness.mouse(MouseEventKind::Moved, 5, 0);
        harness.render();
        assert_eq!(harness.bar.active_index(), Some(3));
        assert_eq!(harness.bar.layout().menu.map(|(index, _)| index), Some(3));
    }

    #[test]
    fn stale_active_index_displays_nothing() {
        let mut harness = Harness::abc();
        harness.render();
        harness.mouse(press(), 7, 0);
        harness.render();
        assert_eq!(harness.bar.active_index(), Some(2));

        harness.children.truncate(2);
        harness.render();

        assert!(harness.open.get());
        assert_eq!(harness.bar.layout().menu, None);
    }
}
