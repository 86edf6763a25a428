//! Refresh command - rebuild the package cache unconditionally

use crate::cache::PackageCache;
use crate::config::Config;
use crate::error::BrewFuzzyResult;
use crate::source::BrewSource;
use crate::ui::{TaskSpinner, UiContext};
use std::sync::Arc;

/// Execute the refresh command
pub async fn execute(config: &Config) -> BrewFuzzyResult<()> {
    let ctx = UiContext::detect();
    config.ensure_dirs().await?;

    let cache = PackageCache::from_config(config, Arc::new(BrewSource::new()));

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Refreshing package cache...");

    match cache.rebuild().await {
        Ok(snapshot) => {
            spinner.stop(&format!(
                "Cache refreshed successfully ({} packages)",
                snapshot.packages.len()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Failed to refresh cache");
            Err(e)
        }
    }
}
