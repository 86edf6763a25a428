//! Homebrew package source
//!
//! Runs `brew search` per category under a hard timeout and probes
//! `<brew --repository>/.git/FETCH_HEAD` as the upstream update marker.

use super::{parse_package_list, Category, PackageSource};
use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Hard limit for a single `brew` query
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Package source backed by the `brew` CLI
#[derive(Debug, Clone)]
pub struct BrewSource {
    program: String,
    timeout: Duration,
}

impl BrewSource {
    /// Create a source using `brew` from PATH
    pub fn new() -> Self {
        Self::with_program("brew")
    }

    /// Create a source using a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: QUERY_TIMEOUT,
        }
    }

    /// Override the per-query timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run brew with a timeout; the child is killed if the timeout fires
    async fn exec(&self, args: &[&str]) -> BrewFuzzyResult<Option<Output>> {
        debug!("Executing: {} {:?}", self.program, args);

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => output
                .map(Some)
                .map_err(|e| BrewFuzzyError::command_failed(self.describe(args), e)),
            Err(_) => Ok(None),
        }
    }

    /// Locate the Homebrew repository checkout
    async fn repository(&self) -> Option<PathBuf> {
        let output = self.exec(&["--repository"]).await.ok()??;
        if !output.status.success() {
            return None;
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }
}

impl Default for BrewSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageSource for BrewSource {
    async fn list(&self, category: Category) -> BrewFuzzyResult<Vec<String>> {
        let args = ["search", category.search_flag(), "."];

        let output = self.exec(&args).await?.ok_or_else(|| {
            BrewFuzzyError::source_query(
                category,
                format!("timed out after {}s", self.timeout.as_secs_f32()),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrewFuzzyError::source_query(
                category,
                format!(
                    "{} exited with {}: {}",
                    self.describe(&args),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        let packages = parse_package_list(&String::from_utf8_lossy(&output.stdout));
        debug!(%category, count = packages.len(), "Listed packages");
        Ok(packages)
    }

    async fn last_update_marker(&self) -> DateTime<Utc> {
        let Some(repo) = self.repository().await else {
            debug!("Could not locate brew repository");
            return DateTime::<Utc>::UNIX_EPOCH;
        };

        let fetch_head = repo.join(".git").join("FETCH_HEAD");
        match tokio::fs::metadata(&fetch_head)
            .await
            .and_then(|meta| meta.modified())
        {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(e) => {
                debug!(path = %fetch_head.display(), error = %e, "No brew update marker");
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }
}
