//! Package source abstraction
//!
//! Lists installable package names per category and reports when the
//! upstream package database was last updated.

mod brew;

pub use brew::{BrewSource, QUERY_TIMEOUT};

use crate::error::BrewFuzzyResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

/// The two independent package groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Command-line packages (primary)
    Formula,
    /// Bundled applications (secondary)
    Cask,
}

impl Category {
    /// Categories in snapshot order
    pub const ALL: [Category; 2] = [Category::Formula, Category::Cask];

    /// Flag selecting this category on `brew search`
    pub fn search_flag(&self) -> &'static str {
        match self {
            Category::Formula => "--formula",
            Category::Cask => "--cask",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Formula => write!(f, "formula"),
            Category::Cask => write!(f, "cask"),
        }
    }
}

/// Abstract package source interface
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// List package names in a category, in source order
    async fn list(&self, category: Category) -> BrewFuzzyResult<Vec<String>>;

    /// Last update of the upstream package database
    ///
    /// Returns the Unix epoch when the marker cannot be determined.
    async fn last_update_marker(&self) -> DateTime<Utc>;
}

/// Split command output into package names
///
/// Lines are trimmed and blank lines dropped; order is preserved.
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
