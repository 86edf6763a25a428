//! CLI argument definitions using clap derive

use crate::config::DEFAULT_MAX_AGE_HOURS;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const CONTROLS: &str = "\
Controls:
  Type:    Search packages (fuzzy matching)
  ↑/↓:     Navigate results
  Tab:     Toggle preview pane
  Enter:   Install selected package
  Escape:  Cancel and exit

Default cache location: ~/.cache/brew-fuzzy/ (override with --cache-dir)";

/// Brew Fuzzy Install - fuzzy search and install Homebrew packages
///
/// Lists every formula and cask, hands them to fzf with a live
/// `brew info` preview, and installs whatever you pick.
#[derive(Parser, Debug)]
#[command(name = "brew-fuzzy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = CONTROLS)]
pub struct Cli {
    /// Refresh the package cache and exit
    #[arg(long)]
    pub refresh: bool,

    /// Test mode: show what would be installed without installing
    #[arg(long)]
    pub dry_run: bool,

    /// Colorize the preview pane and selector
    #[arg(long)]
    pub preview_colors: bool,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Cache directory (defaults to ~/.cache/brew-fuzzy)
    #[arg(long, env = "BREW_FUZZY_CACHE_DIR", value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Rebuild the package cache once it is this many hours old
    #[arg(
        long,
        env = "BREW_FUZZY_MAX_AGE_HOURS",
        value_name = "HOURS",
        default_value_t = DEFAULT_MAX_AGE_HOURS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_age_hours: u64,
}

/// What a single invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rebuild the cache and exit
    Refresh,
    /// Pick a package and install it
    Pick(PickArgs),
}

/// Options for the pick-and-install flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickArgs {
    pub dry_run: bool,
    pub preview_colors: bool,
}

impl Cli {
    /// Resolve the invocation mode; `--refresh` wins over everything else
    pub fn mode(&self) -> Mode {
        if self.refresh {
            Mode::Refresh
        } else {
            Mode::Pick(PickArgs {
                dry_run: self.dry_run,
                preview_colors: self.preview_colors,
            })
        }
    }
}
