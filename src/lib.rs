//! brew-fuzzy - fuzzy search and install for Homebrew
//!
//! Caches the list of installable formulae and casks, hands it to fzf
//! with a live `brew info` preview, and installs the chosen package.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod selector;
pub mod source;
pub mod ui;

#[cfg(all(test, unix))]
mod test_support;

pub use error::{BrewFuzzyError, BrewFuzzyResult};
