//! Bounded undo history.
//!
//! The history is a stack of snapshots whose bottom entry is the
//! baseline (the state right after loading or clearing). It is never
//! empty: undo stops at the baseline, and when the stack is full the
//! oldest entry *above* the baseline is evicted so the baseline stays
//! reachable.

/// Stack of snapshots with a permanent baseline.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Create a history containing only `baseline`.
    ///
    /// `limit` is the maximum number of entries, baseline included; it
    /// is raised to 2 if smaller so at least one step can be undone.
    #[must_use]
    pub fn new(baseline: T, limit: usize) -> Self {
        Self {
            entries: vec![baseline],
            limit: limit.max(2),
        }
    }

    /// Append a snapshot, evicting the oldest non-baseline entry if the
    /// stack is full.
    pub fn push(&mut self, snapshot: T) {
        if self.entries.len() >= self.limit {
            self.entries.remove(1);
        }
        self.entries.push(snapshot);
    }

    /// Discard the latest snapshot and return the one now on top.
    ///
    /// Returns `None` (and changes nothing) when only the baseline is
    /// left.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    /// Drop everything and start over from a new baseline.
    pub fn reset(&mut self, baseline: T) {
        self.entries.clear();
        self.entries.push(baseline);
    }

    /// Whether there is a snapshot above the baseline.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// The most recent snapshot (the baseline if nothing was pushed).
    #[must_use]
    pub fn current(&self) -> &T {
        // `entries` always holds the baseline; `new` and `reset` both
        // push one and `undo` never pops the last entry.
        &self.entries[self.entries.len() - 1]
    }

    /// The bottom entry.
    #[must_use]
    pub fn baseline(&self) -> &T {
        &self.entries[0]
    }

    /// Number of entries, baseline included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; the baseline is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries, baseline included.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}
