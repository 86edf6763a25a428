//! Persisted package list snapshot

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A self-consistent package list plus its freshness metadata
///
/// Snapshots are never mutated; a refresh builds a new one that replaces
/// the old file wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Package names, formulae first then casks, in source order
    pub packages: Vec<String>,

    /// When this snapshot was built
    pub last_updated: DateTime<Utc>,

    /// Upstream database update marker observed at build time
    #[serde(rename = "brew_update")]
    pub source_update_marker: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(packages: Vec<String>, source_update_marker: DateTime<Utc>) -> Self {
        Self {
            packages,
            last_updated: Utc::now(),
            source_update_marker,
        }
    }

    /// Age of the snapshot at `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_updated
    }

    /// Check whether the snapshot can be served without a rebuild
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) < max_age
    }

    /// Check whether the upstream marker has moved past ours
    ///
    /// An epoch marker means "unknown" and never counts as newer.
    pub fn is_outdated_by(&self, upstream_marker: DateTime<Utc>) -> bool {
        upstream_marker != DateTime::<Utc>::UNIX_EPOCH && upstream_marker > self.source_update_marker
    }
}
