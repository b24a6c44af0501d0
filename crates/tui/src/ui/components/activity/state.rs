use std::collections::VecDeque;
use std::fmt;

/// Entries kept before the oldest ones are dropped.
pub const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Something the menu bar reported back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEntry {
    Opened,
    Closed,
    Selected { channel: String, tag: String, checked: bool },
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityEntry::Opened => f.write_str("menubar opened"),
            ActivityEntry::Closed => f.write_str("menubar closed"),
            ActivityEntry::Selected { channel, tag, checked } => write!(f, "[{channel}] {tag} (checked: {checked})"),
        }
    }
}

/// Bounded, newest-last log of menu bar activity.
#[derive(Debug, Default, Clone)]
pub struct ActivityState {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityState {
    pub fn push(&mut self, entry: ActivityEntry) {
        if self.entries.len() == MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    /// The newest `count` entries, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev().take(count)
    }
}
