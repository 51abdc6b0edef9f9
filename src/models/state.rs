//! Persisted watch state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Set of fixture ids recorded by previous runs.
///
/// The set only ever grows. Fixtures that later disappear from the page
/// stay marked as seen, so a listing that is pulled and relisted with the
/// same text does not trigger a second notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchState {
    /// ISO 8601 timestamp of the last save
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Ids of every fixture observed so far
    #[serde(default)]
    pub seen_ids: BTreeSet<String>,
}

impl Default for WatchState {
    fn default() -> Self {
        Self {
            updated_at: Utc::now(),
            seen_ids: BTreeSet::new(),
        }
    }
}

impl WatchState {
    /// True when no prior run has recorded any fixture.
    pub fn is_first_run(&self) -> bool {
        self.seen_ids.is_empty()
    }

    /// Whether an id has been seen before.
    pub fn contains(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Merge the current run's ids into the seen set and stamp the state.
    pub fn absorb<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.seen_ids.extend(ids);
        self.updated_at = Utc::now();
    }

    /// Number of seen ids.
    pub fn len(&self) -> usize {
        self.seen_ids.len()
    }

    /// True when the seen set is empty.
    pub fn is_empty(&self) -> bool {
        self.seen_ids.is_empty()
    }
}
