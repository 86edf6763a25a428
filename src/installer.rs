//! Package installation
//!
//! Runs `brew install <name>` in the foreground with inherited stdio so
//! brew's own progress output reaches the user unchanged.

use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use crate::ui::{self, UiContext};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Result of an install request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// brew finished successfully
    Installed,
    /// Dry run: nothing was executed
    DryRun,
}

/// Runs the package manager's install command
#[derive(Debug, Clone)]
pub struct Installer {
    program: String,
}

impl Installer {
    /// Create an installer using `brew` from PATH
    pub fn new() -> Self {
        Self::with_program("brew")
    }

    /// Create an installer using a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Install a package, or only report the intent in dry-run mode
    pub async fn install(
        &self,
        ctx: &UiContext,
        package: &str,
        dry_run: bool,
    ) -> BrewFuzzyResult<InstallOutcome> {
        if dry_run {
            ui::step_info(ctx, &format!("Would install: {}", package));
            return Ok(InstallOutcome::DryRun);
        }

        ui::step_info(ctx, &format!("Installing {}...", package));
        debug!("Executing interactively: {} install {}", self.program, package);

        let status = Command::new(&self.program)
            .args(["install", package])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                BrewFuzzyError::command_failed(format!("{} install {}", self.program, package), e)
            })?;

        match status.code() {
            Some(0) => {
                info!(package, "Installed package");
                ui::step_ok(ctx, &format!("Installed {}", package));
                Ok(InstallOutcome::Installed)
            }
            Some(code) => Err(BrewFuzzyError::InstallFailed {
                package: package.to_string(),
                code,
            }),
            None => Err(BrewFuzzyError::ProcessSignaled),
        }
    }
}

impl Default for Installer {
    fn default() -> Self {
        Self::new()
    }
}
