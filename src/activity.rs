//! Bounded record of recent console operations.
//!
//! Entries are stored oldest-first and evicted FIFO once the log exceeds its
//! capacity. Display order is newest-first, applied at read time.

use std::collections::VecDeque;
use std::fmt;

/// Default number of entries kept by the console.
pub const RECENT_LIMIT: usize = 5;

/// How a recorded operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// The operation succeeded.
    Ok,
    /// The operation succeeded but the key was absent (GET only).
    NotFound,
    /// The operation failed; the message rides with the tag.
    Error(String),
}

/// One completed operation attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    description: String,
    outcome: ActivityOutcome,
}

impl ActivityEntry {
    /// Create an entry, e.g. `ActivityEntry::new("PUT key=a", ActivityOutcome::Ok)`.
    pub fn new(description: impl Into<String>, outcome: ActivityOutcome) -> Self {
        Self {
            description: description.into(),
            outcome,
        }
    }

    /// The operation description, without the outcome suffix.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The recorded outcome.
    pub fn outcome(&self) -> &ActivityOutcome {
        &self.outcome
    }
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ActivityOutcome::Ok => write!(f, "{} (OK)", self.description),
            ActivityOutcome::NotFound => write!(f, "{} (not found)", self.description),
            ActivityOutcome::Error(msg) => write!(f, "{} (Error: {})", self.description, msg),
        }
    }
}

/// Fixed-capacity, insertion-ordered activity log.
///
/// The capacity is set at construction and never changes; after any
/// [`ActivityLog::record`] call returns, the log holds at most that many
/// entries.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    /// Create a log bounded at `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest when over capacity.
    /// Always succeeds.
    pub fn record(&mut self, entry: ActivityEntry) {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries in newest-first order. Does not mutate the log; re-querying
    /// returns the same sequence until the next [`ActivityLog::record`].
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entries have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(RECENT_LIMIT)
    }
}
