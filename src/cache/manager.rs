//! Cache orchestration
//!
//! Decides per invocation whether to serve the stored snapshot, rebuild it
//! synchronously, or kick off a detached freshness check.

use super::snapshot::Snapshot;
use super::store::CacheStore;
use crate::config::Config;
use crate::error::BrewFuzzyResult;
use crate::source::{Category, PackageSource};
use crate::ui::{TaskSpinner, UiContext};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Where a package list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrigin {
    /// Served from a fresh snapshot
    Cached,
    /// Rebuilt from the package source during this call
    Rebuilt,
}

/// Package names handed to the selector
#[derive(Debug, Clone)]
pub struct PackageList {
    pub packages: Vec<String>,
    pub origin: ListOrigin,
}

/// Snapshot lifecycle manager
#[derive(Clone)]
pub struct PackageCache {
    store: CacheStore,
    source: Arc<dyn PackageSource>,
    max_age: Duration,
}

impl PackageCache {
    /// Create a cache manager
    pub fn new(store: CacheStore, source: Arc<dyn PackageSource>, max_age: Duration) -> Self {
        Self {
            store,
            source,
            max_age,
        }
    }

    /// Create a cache manager using the configured paths and max age
    pub fn from_config(config: &Config, source: Arc<dyn PackageSource>) -> Self {
        Self::new(CacheStore::new(config.cache_file()), source, config.max_age)
    }

    /// Get the package list for a normal run
    ///
    /// A fresh snapshot is returned immediately and a detached freshness
    /// check is spawned. A stale, missing or unreadable snapshot is rebuilt
    /// before returning.
    pub async fn packages(&self, ctx: &UiContext) -> BrewFuzzyResult<PackageList> {
        if let Ok(snapshot) = self.store.load().await {
            let age = snapshot.age(Utc::now());
            if snapshot.is_fresh(Utc::now(), self.max_age) {
                debug!(
                    age_minutes = age.num_minutes(),
                    count = snapshot.packages.len(),
                    "Serving cached package list"
                );
                self.spawn_freshness_check();
                return Ok(PackageList {
                    packages: snapshot.packages,
                    origin: ListOrigin::Cached,
                });
            }
            info!(age_hours = age.num_hours(), "Package cache is stale");
        }

        let mut spinner = TaskSpinner::new(ctx);
        spinner.start("Building package cache... (this may take a moment)");

        match self.rebuild().await {
            Ok(snapshot) => {
                spinner.stop(&format!("Cached {} packages", snapshot.packages.len()));
                Ok(PackageList {
                    packages: snapshot.packages,
                    origin: ListOrigin::Rebuilt,
                })
            }
            Err(e) => {
                spinner.stop_error("Failed to build package cache");
                Err(e)
            }
        }
    }

    /// Query both categories concurrently and replace the snapshot
    ///
    /// Nothing is written unless both queries succeed.
    pub async fn rebuild(&self) -> BrewFuzzyResult<Snapshot> {
        let (formulae, casks) = tokio::try_join!(
            self.source.list(Category::Formula),
            self.source.list(Category::Cask)
        )?;

        debug!(
            formulae = formulae.len(),
            casks = casks.len(),
            "Fetched package lists"
        );

        let mut packages = formulae;
        packages.extend(casks);

        let marker = self.source.last_update_marker().await;
        let snapshot = Snapshot::new(packages, marker);
        self.store.save(&snapshot).await?;

        info!(count = snapshot.packages.len(), "Rebuilt package cache");
        Ok(snapshot)
    }

    /// Run the freshness check as a detached task
    ///
    /// Errors and panics stay inside the task; the result is only visible
    /// through the snapshot file on a later run.
    pub fn spawn_freshness_check(&self) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            match cache.check_freshness().await {
                Ok(true) => debug!("Background refresh completed"),
                Ok(false) => debug!("Package cache matches upstream"),
                Err(e) => debug!(error = %e, "Background refresh skipped"),
            }
        })
    }

    /// Rebuild if upstream reports an update newer than the snapshot
    ///
    /// Returns whether a rebuild happened.
    pub async fn check_freshness(&self) -> BrewFuzzyResult<bool> {
        let snapshot = self.store.load().await?;
        let upstream = self.source.last_update_marker().await;

        if !snapshot.is_outdated_by(upstream) {
            return Ok(false);
        }

        debug!(
            cached = %snapshot.source_update_marker,
            upstream = %upstream,
            "Upstream package database changed"
        );
        self.rebuild().await?;
        Ok(true)
    }
}
