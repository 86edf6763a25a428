//! Pick command - choose a package in fzf and install it

use crate::cache::PackageCache;
use crate::cli::args::PickArgs;
use crate::config::Config;
use crate::error::BrewFuzzyResult;
use crate::installer::Installer;
use crate::selector::{FzfSelector, Selection};
use crate::source::BrewSource;
use crate::ui::UiContext;
use std::sync::Arc;
use tracing::debug;

/// Execute the default pick-and-install flow
pub async fn execute(args: PickArgs, config: &Config) -> BrewFuzzyResult<()> {
    let ctx = UiContext::detect();
    config.ensure_dirs().await?;

    let cache = PackageCache::from_config(config, Arc::new(BrewSource::new()));
    let list = cache.packages(&ctx).await?;
    debug!(count = list.packages.len(), origin = ?list.origin, "Loaded package list");

    let selection = FzfSelector::new(config)
        .select(&list.packages, args.preview_colors)
        .await?;

    let package = match selection {
        Selection::Picked(package) => package,
        Selection::Cancelled => {
            debug!("Selection cancelled");
            return Ok(());
        }
    };

    Installer::new()
        .install(&ctx, &package, args.dry_run)
        .await?;
    Ok(())
}
