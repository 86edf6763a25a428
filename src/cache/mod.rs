//! Package list cache
//!
//! Keeps a snapshot of every installable package name so the picker opens
//! instantly, and refreshes it when it ages out or upstream changes.
//!
//! # Decision paths
//!
//! | Snapshot | Action |
//! |----------|--------|
//! | Fresh (age < max age) | Serve it, check upstream marker in the background |
//! | Stale or missing | Rebuild synchronously, then serve |
//! | `--refresh` | Rebuild synchronously regardless of age |

pub mod manager;
pub mod snapshot;
pub mod store;

pub use manager::{ListOrigin, PackageCache, PackageList};
pub use snapshot::Snapshot;
pub use store::CacheStore;
