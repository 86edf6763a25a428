//! On-disk snapshot storage
//!
//! Saves go through a temp file in the same directory followed by a
//! rename, so readers see either the previous snapshot or the new one.
//! A process killed between the two steps leaves its temp file behind;
//! later saves remove such leftovers once they are old enough that no
//! writer can still own them.

use super::snapshot::Snapshot;
use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp files untouched for this long belong to an abandoned save
const STALE_TEMP_AGE: Duration = Duration::from_secs(600);

/// Snapshot file at a fixed path
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store for the given snapshot file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot
    ///
    /// Missing, unreadable and corrupt files all report `CacheNotFound`.
    pub async fn load(&self) -> BrewFuzzyResult<Snapshot> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            debug!(path = %self.path.display(), error = %e, "Snapshot not readable");
            BrewFuzzyError::CacheNotFound(self.path.clone())
        })?;

        serde_json::from_str(&content).map_err(|e| {
            debug!(path = %self.path.display(), error = %e, "Snapshot is corrupt");
            BrewFuzzyError::CacheNotFound(self.path.clone())
        })
    }

    /// Persist a snapshot, replacing any previous one atomically
    pub async fn save(&self, snapshot: &Snapshot) -> BrewFuzzyResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(self.write_error(e));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(self.write_error(e));
        }

        debug!(
            path = %self.path.display(),
            package_count = snapshot.packages.len(),
            "Saved package snapshot"
        );

        self.sweep_stale_temps().await;
        Ok(())
    }

    /// Remove temp files left over by saves that never reached the rename
    async fn sweep_stale_temps(&self) {
        let Some(parent) = self.path.parent() else {
            return;
        };
        let Ok(mut entries) = fs::read_dir(parent).await else {
            return;
        };

        let prefix = format!(".{}.", self.file_name());
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(&prefix) || !name.ends_with(".tmp") {
                continue;
            }

            let stale = entry
                .metadata()
                .await
                .ok()
                .and_then(|meta| meta.modified().ok())
                .and_then(|modified| modified.elapsed().ok())
                .is_some_and(|age| age >= STALE_TEMP_AGE);
            if !stale {
                continue;
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => debug!(file = %name, "Removed abandoned snapshot temp file"),
                Err(e) => debug!(file = %name, error = %e, "Could not remove temp file"),
            }
        }
    }

    /// Unique sibling path so concurrent writers never share a temp file
    fn temp_path(&self) -> PathBuf {
        let unique = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(
            ".{}.{}.{}.tmp",
            self.file_name(),
            std::process::id(),
            unique
        ))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cache.json".to_string())
    }

    fn write_error(&self, source: std::io::Error) -> BrewFuzzyError {
        BrewFuzzyError::CacheWrite {
            path: self.path.clone(),
            source,
        }
    }
}
