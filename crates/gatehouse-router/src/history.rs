//! Navigation history

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::route::Location;

/// Entries kept before the oldest is dropped
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub location: Location,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, location: Location) {
        if self.entries.len() >= MAX_HISTORY {
            let excess = self.entries.len() + 1 - MAX_HISTORY;
            self.entries.drain(..excess);
        }
        self.entries.push(HistoryEntry {
            location,
            visited_at: Utc::now(),
        });
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.last().map(|entry| &entry.location)
    }

    /// The entry before the current one
    pub fn previous(&self) -> Option<&Location> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        Some(&self.entries[len - 2].location)
    }

    /// Replace the current entry and the one before it with `location`
    pub fn step_back(&mut self, location: Location) {
        let keep = self.entries.len().saturating_sub(2);
        self.entries.truncate(keep);
        self.push(location);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
