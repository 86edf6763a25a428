//! Terminal output helpers
//!
//! Uses `cliclack` spinners and step lines when attached to a terminal,
//! with plain bracketed output in CI or when piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use brew_fuzzy::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Building package cache...");
//! // ... do work ...
//! spinner.stop("Cached 7421 packages");
//!
//! ui::step_info(&ctx, "Would install: wget");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{step_info, step_ok};
pub use progress::TaskSpinner;
pub use theme::{init_theme, BrewTheme};
