//! Runtime configuration for brew-fuzzy
//!
//! Everything lives under `~/.cache/brew-fuzzy/` unless overridden:
//!
//! | Path | Contents |
//! |------|----------|
//! | `cache.json` | Package list snapshot |
//! | `info/<package>.txt` | `brew info` output used by the preview pane |
//! | `preview.sh` | Preview helper regenerated on every run |

use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use chrono::Duration;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default maximum snapshot age before a synchronous rebuild
pub const DEFAULT_MAX_AGE_HOURS: u64 = 24;

const CACHE_FILE: &str = "cache.json";
const PREVIEW_SCRIPT: &str = "preview.sh";
const INFO_DIR: &str = "info";

/// Process-wide configuration, read-only after startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the snapshot and preview script
    pub cache_dir: PathBuf,

    /// Directory holding per-package info text
    pub info_cache_dir: PathBuf,

    /// Snapshots at least this old are rebuilt before use
    pub max_age: Duration,
}

impl Config {
    /// Build a config rooted at `cache_dir`
    pub fn new(cache_dir: PathBuf, max_age: Duration) -> Self {
        Self {
            info_cache_dir: cache_dir.join(INFO_DIR),
            cache_dir,
            max_age,
        }
    }

    /// Resolve the config from the environment plus CLI overrides
    ///
    /// `HOME` wins over `dirs::home_dir()`; the home directory is only
    /// required when no explicit cache directory is given.
    pub fn from_env(cache_dir: Option<PathBuf>, max_age_hours: u64) -> BrewFuzzyResult<Self> {
        let max_age = i64::try_from(max_age_hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX);

        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => Self::default_cache_dir(&Self::home_dir()?),
        };

        debug!(cache_dir = %cache_dir.display(), max_age_hours, "Resolved configuration");
        Ok(Self::new(cache_dir, max_age))
    }

    /// Get the default cache directory for a home directory
    pub fn default_cache_dir(home: &Path) -> PathBuf {
        home.join(".cache").join("brew-fuzzy")
    }

    /// Get the snapshot file path
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }

    /// Get the preview helper script path
    pub fn preview_script(&self) -> PathBuf {
        self.cache_dir.join(PREVIEW_SCRIPT)
    }

    /// Ensure the cache and info directories exist
    pub async fn ensure_dirs(&self) -> BrewFuzzyResult<()> {
        for dir in [&self.cache_dir, &self.info_cache_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                BrewFuzzyError::io(format!("creating directory {}", dir.display()), e)
            })?;
        }
        Ok(())
    }

    fn home_dir() -> BrewFuzzyResult<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(BrewFuzzyError::HomeNotFound)
    }
}
