//! cliclack theme for the cache spinner and step log lines
//!
//! Only the spinner and `log::*` output are ever rendered, so the theme
//! covers the side bar color and the spinner frames. Everything else keeps
//! cliclack's defaults.

use cliclack::ThemeState;
use console::Style;

/// Spinner frames, one char per tick
const SPINNER_FRAMES: &str = "⣾⣽⣻⢿⡿⣟⣯⣷";

/// Amber accent matching Homebrew branding
#[derive(Debug, Clone, Default)]
pub struct BrewTheme;

impl cliclack::Theme for BrewTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().yellow(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel | ThemeState::Submit => Style::new().dim(),
        }
    }

    fn spinner_chars(&self) -> String {
        SPINNER_FRAMES.to_string()
    }
}

/// Install the theme for all cliclack output
pub fn init_theme() {
    cliclack::set_theme(BrewTheme);
}
