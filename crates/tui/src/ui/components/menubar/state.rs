use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

/// Open-state change request sent to whoever owns `is_open`.
pub type OnSetOpen = Rc<dyn Fn(bool)>;

/// Which menu bar item is active.
///
/// The bar shares this with its Escape and outside-press listeners, so every
/// field is a `Cell` behind an `Rc`. All access happens on the UI thread.
///
/// `revision` counts writes to the active index. A transition that would not
/// change anything performs no write.
#[derive(Debug, Default)]
pub struct ActivationState {
    active: Cell<Option<usize>>,
    revision: Cell<u64>,
    observed_open: Cell<Option<bool>>,
}

impl ActivationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active item, `None` when no item is active.
    pub fn active_index(&self) -> Option<usize> {
        self.active.get()
    }

    /// Number of writes made to the active index so far.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Pointer entered item `index`. Hovering the active item is a no-op.
    pub fn handle_mouse_over(&self, index: usize) -> bool {
        if self.active.get() == Some(index) {
            return false;
        }
        self.write(Some(index));
        true
    }

    /// Pointer left the bar. Only clears the active item while the bar is
    /// closed; an open bar stays put so moving between a label and its
    /// submenu never closes it.
    pub fn handle_mouse_out(&self, is_open: bool) -> bool {
        if is_open {
            return false;
        }
        self.reset()
    }

    /// The one path that closes the bar: clear the active item and ask the
    /// owner to close.
    pub fn close(&self, on_set_open: &OnSetOpen) {
        self.reset();
        debug!("menubar close requested");
        on_set_open(false);
    }

    /// Observes the owner's `is_open`. When it changes to `false` the active
    /// item is cleared, even without any input.
    pub fn sync_open(&self, is_open: bool) -> bool {
        let previous = self.observed_open.replace(Some(is_open));
        if previous == Some(is_open) || is_open {
            return false;
        }
        self.reset()
    }

    fn reset(&self) -> bool {
        if self.active.get().is_none() {
            return false;
        }
        self.write(None);
        true
    }

    fn write(&self, active: Option<usize>) {
        self.active.set(active);
        self.revision.set(self.revision.get() + 1);
        debug!(active = ?active, "menubar active item changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording_open() -> (OnSetOpen, Rc<RefCell<Vec<bool>>>) {
        let requests: Rc<RefCell<Vec<bool>>> = Rc::default();
        let seen = requests.clone();
        (Rc::new(move |open: bool| seen.borrow_mut().push(open)), requests)
    }

    #[test]
    fn starts_with_nothing_active() {
        let state = ActivationState::new();
        assert_eq!(state.active_index(), None);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn hovering_the_active_item_writes_nothing() {
        let state = ActivationState::new();

        assert!(state.handle_mouse_over(0));
        assert!(!state.handle_mouse_over(0));

        assert_eq!(state.active_index(), Some(0));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn hovering_moves_the_single_active_item() {
        let state = ActivationState::new();
        for index in [2, 0, 1, 1, 2] {
            state.handle_mouse_over(index);
            assert_eq!(state.active_index(), Some(index));
        }
        assert_eq!(state.revision(), 4);
    }

    #[test]
    fn mouse_out_keeps_an_open_bar() {
        let state = ActivationState::new();
        state.handle_mouse_over(1);

        assert!(!state.handle_mouse_out(true));
        assert_eq!(state.active_index(), Some(1));

        assert!(state.handle_mouse_out(false));
        assert_eq!(state.active_index(), None);
    }

    #[test]
    fn close_resets_and_requests_close() {
        let (on_set_open, requests) = recording_open();
        let state = ActivationState::new();
        state.handle_mouse_over(2);

        state.close(&on_set_open);

        assert_eq!(state.active_index(), None);
        assert_eq!(*requests.borrow(), vec![false]);
    }

    #[test]
    fn close_from_idle_still_requests_close() {
        let (on_set_open, requests) = recording_open();
        let state = ActivationState::new();

        state.close(&on_set_open);

        assert_eq!(state.revision(), 0);
        assert_eq!(*requests.borrow(), vec![false]);
    }

    #[test]
    fn external_close_resyncs() {
        let state = ActivationState::new();
        state.sync_open(true);
        state.handle_mouse_over(1);

        assert!(!state.sync_open(true));
        assert_eq!(state.active_index(), Some(1));

        assert!(state.sync_open(false));
        assert_eq!(state.active_index(), None);
    }

    #[test]
    fn resync_runs_only_on_change_to_closed() {
        let state = ActivationState::new();
        state.sync_open(false);
        // hovering a closed bar is allowed; the next observation of the
        // same closed value must not wipe it
        state.handle_mouse_over(0);
        assert!(!state.sync_open(false));
        assert_eq!(state.active_index(), Some(0));
    }
}
