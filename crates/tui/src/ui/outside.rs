//! Detects presses that land outside a component's rendered footprint.
//!
//! The component publishes where it was drawn through a [`RegionRef`] and
//! registers a handler with [`on_click_outside`]. The handler runs once per
//! mouse press whose cell is outside every rect of the region. Content drawn
//! by another component outside the footprint counts as outside.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::ui::events::{EventHub, Subscription};

/// Stable, shared handle to the rects a component occupied on its last render.
#[derive(Debug, Clone, Default)]
pub struct RegionRef {
    rects: Rc<RefCell<Vec<Rect>>>,
}

impl RegionRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the footprint. Zero-sized rects are dropped.
    pub fn set(&self, rects: impl IntoIterator<Item = Rect>) {
        let mut current = self.rects.borrow_mut();
        current.clear();
        current.extend(rects.into_iter().filter(|rect| !rect.is_empty()));
    }

    pub fn clear(&self) {
        self.rects.borrow_mut().clear();
    }

    /// True once something has been rendered into the region.
    pub fn is_attached(&self) -> bool {
        !self.rects.borrow().is_empty()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        self.rects.borrow().iter().any(|rect| rect.contains(position))
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.rects.borrow().clone()
    }
}

/// Returns whether `mouse` is a press outside `region`.
///
/// A detached region never reports outside presses.
pub fn is_outside_press(region: &RegionRef, mouse: &MouseEvent) -> bool {
    matches!(mouse.kind, MouseEventKind::Down(_)) && region.is_attached() && !region.contains(mouse.column, mouse.row)
}

/// Calls `handler` for every press outside `region` until the subscription is dropped.
pub fn on_click_outside(hub: &EventHub, region: RegionRef, handler: impl Fn() + 'static) -> Subscription {
    hub.add_pointer_listener(move |mouse| {
        if is_outside_press(&region, mouse) {
            handler();
        }
    })
}
