//! Agent journal: a short rolling log plus the full episodic record.
//!
//! The rolling log holds the last [`LOG_CAPACITY`] human-readable lines and
//! is what tests and dashboards inspect for things like "Starving!". The
//! episode list is append-only for the agent's lifetime; it is released when
//! the agent is pruned from the roster.

use std::collections::VecDeque;

use mimesis_types::EpisodeKind;

/// Number of lines kept in the rolling log.
pub const LOG_CAPACITY: usize = 10;

/// One remembered event.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Tick the event happened.
    pub tick: u64,
    /// What kind of event it was.
    pub kind: EpisodeKind,
    /// Human-readable description.
    pub description: String,
    /// Emotional weight, -10 (trauma) to +10 (elation).
    pub weight: f64,
}

/// Rolling log and episodic memory of a single agent.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    log: VecDeque<String>,
    episodes: Vec<Episode>,
}

impl Journal {
    /// An empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the log and an episode to memory.
    pub fn record(&mut self, tick: u64, kind: EpisodeKind, description: String, weight: f64) {
        self.log.push_back(description.clone());
        while self.log.len() > LOG_CAPACITY {
            self.log.pop_front();
        }
        self.episodes.push(Episode {
            tick,
            kind,
            description,
            weight: weight.clamp(-10.0, 10.0),
        });
    }

    /// The rolling log, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Whether any retained log line contains `needle`.
    pub fn log_contains(&self, needle: &str) -> bool {
        self.log.iter().any(|line| line.contains(needle))
    }

    /// Every episode ever recorded, oldest first.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// The most recent episode.
    pub fn last(&self) -> Option<&Episode> {
        self.episodes.last()
    }
}
