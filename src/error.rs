//! Error types for brew-fuzzy
//!
//! All modules use `BrewFuzzyResult<T>` as their return type.

use crate::source::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for brew-fuzzy operations
pub type BrewFuzzyResult<T> = Result<T, BrewFuzzyError>;

/// All errors that can occur in brew-fuzzy
#[derive(Error, Debug)]
pub enum BrewFuzzyError {
    // Environment errors
    #[error("Home directory not found. Set HOME to a writable directory.")]
    HomeNotFound,

    #[error("Required CLI not found: {name}. {hint}")]
    CliNotFound { name: String, hint: String },

    // Package source errors
    #[error("Failed to list {category} packages: {reason}")]
    SourceQuery { category: Category, reason: String },

    // Cache errors
    #[error("Package cache not found: {0}")]
    CacheNotFound(PathBuf),

    #[error("Failed to write package cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Selector errors
    #[error("fzf failed: {0}")]
    Selector(String),

    // Installer errors
    #[error("Installing {package} failed with exit code {code}")]
    InstallFailed { package: String, code: i32 },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrewFuzzyError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    ///
    /// A missing executable becomes `CliNotFound` so the user gets an
    /// install hint instead of a bare "No such file or directory".
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        let command = command.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            let name = command
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            let hint = install_hint(&name);
            return Self::CliNotFound { name, hint };
        }
        Self::CommandFailed { command, source }
    }

    /// Create a source query error for a category
    pub fn source_query(category: Category, reason: impl Into<String>) -> Self {
        Self::SourceQuery {
            category,
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::HomeNotFound => Some("Export HOME or pass --cache-dir"),
            Self::SourceQuery { .. } => Some("Check that `brew search` works in your shell"),
            Self::CacheWrite { .. } => Some("Check permissions on the cache directory"),
            Self::InstallFailed { .. } => Some("See the brew output above for details"),
            _ => None,
        }
    }
}

fn install_hint(name: &str) -> String {
    match name {
        "brew" => "Install Homebrew from https://brew.sh".to_string(),
        "fzf" => "Install it with: brew install fzf".to_string(),
        other => format!("Make sure `{}` is on your PATH", other),
    }
}
