//! Broadcast event ring buffer.
//!
//! World-level announcements (deaths, births, monster spawns) are kept in a
//! small bounded buffer; pushing past the capacity drops the oldest entry.

use std::collections::VecDeque;

use mimesis_types::EventEntry;

/// Number of broadcast entries retained.
pub const EVENT_LOG_CAPACITY: usize = 5;

/// Bounded FIFO of the most recent broadcast events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<EventEntry>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest once the log is full.
    pub fn push(&mut self, tick: u64, text: impl Into<String>) {
        self.entries.push_back(EventEntry {
            tick,
            text: text.into(),
        });
        while self.entries.len() > EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EventEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been broadcast yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of the entries for a snapshot.
    pub fn snapshot(&self) -> Vec<EventEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_five_most_recent() {
        let mut log = EventLog::new();
        for tick in 0..8_u64 {
            log.push(tick, format!("event {tick}"));
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        let ticks: Vec<u64> = log.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn snapshot_preserves_text() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.push(12, "A shadow rises...");
        let snap = log.snapshot();
        assert_eq!(snap.first().map(|e| e.text.as_str()), Some("A shadow rises..."));
        assert_eq!(snap.first().map(|e| e.tick), Some(12));
    }
}
