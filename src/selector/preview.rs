//! Preview helper script for the fzf preview pane
//!
//! fzf runs the script with the highlighted package name. The script
//! serves `brew info` output from a per-package side cache younger than
//! an hour, querying brew and refilling the cache otherwise.
//!
//! Rendering is a pure string step so the highlighting rules can be
//! checked without touching disk or spawning anything.

use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Side-cache entries younger than this are served as-is
pub const INFO_CACHE_TTL_SECS: u64 = 3600;

/// A single `sed -E` substitution applied to `brew info` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRule {
    pub name: &'static str,
    pub expression: &'static str,
}

/// Highlighting applied in color mode, in pipeline order
///
/// `${ESC}` expands to the escape byte inside the generated script.
pub const HIGHLIGHT_RULES: [HighlightRule; 8] = [
    HighlightRule {
        name: "section markers",
        expression: r"s/^(==>.*)/${ESC}[1;36m\1${ESC}[0m/",
    },
    HighlightRule {
        name: "hyperlinks",
        expression: r"s/(https?:\/\/[^ ]+)/${ESC}[4;34m\1${ESC}[0m/g",
    },
    HighlightRule {
        name: "installed",
        expression: r"s/^(Installed)$/${ESC}[1;32m\1${ESC}[0m/",
    },
    HighlightRule {
        name: "not installed",
        expression: r"s/^(Not installed)$/${ESC}[1;31m\1${ESC}[0m/",
    },
    HighlightRule {
        name: "dependency labels",
        expression: r"s/^(Required:|Optional:|Build:|Test:|Recommended:)/${ESC}[1;33m\1${ESC}[0m/",
    },
    HighlightRule {
        name: "origin labels",
        expression: r"s/^(From:|License:)/${ESC}[1;37m\1${ESC}[0m/",
    },
    HighlightRule {
        name: "check bullets",
        expression: r"s/( \*)/${ESC}[1;32m\1${ESC}[0m/g",
    },
    HighlightRule {
        name: "key/value lines",
        expression: r"s/^([^:=\/]+): (.*)$/${ESC}[1;37m\1:${ESC}[0m \2/",
    },
];

/// Preview helper generator
#[derive(Debug, Clone)]
pub struct PreviewScript<'a> {
    info_cache_dir: &'a Path,
    brew_program: &'a str,
    colors: bool,
}

impl<'a> PreviewScript<'a> {
    /// Create a generator writing side-cache entries to `info_cache_dir`
    pub fn new(info_cache_dir: &'a Path, colors: bool) -> Self {
        Self {
            info_cache_dir,
            brew_program: "brew",
            colors,
        }
    }

    /// Use a different executable for `info` queries
    pub fn with_brew_program(mut self, program: &'a str) -> Self {
        self.brew_program = program;
        self
    }

    /// Render the script text
    pub fn render(&self) -> String {
        let mut script = String::from("#!/bin/bash\n");
        script.push_str("PACKAGE=\"$1\"\n");
        script.push_str(&format!(
            "CACHE_DIR={}\n",
            shell_quote(&self.info_cache_dir.to_string_lossy())
        ));
        script.push_str(&format!("BREW={}\n", shell_quote(self.brew_program)));
        script.push_str("CACHE_FILE=\"$CACHE_DIR/$(printf '%s' \"$PACKAGE\" | tr '/' '_').txt\"\n");
        script.push('\n');

        script.push_str("file_mtime() {\n");
        script.push_str("    stat -c %Y \"$1\" 2>/dev/null || stat -f %m \"$1\" 2>/dev/null || echo 0\n");
        script.push_str("}\n\n");

        if self.colors {
            script.push_str("ESC=$'\\033'\n\n");
            script.push_str("render() {\n    sed -E");
            for rule in &HIGHLIGHT_RULES {
                script.push_str(&format!(" \\\n        -e \"{}\"", rule.expression));
            }
            script.push_str("\n}\n\n");
            script.push_str("unavailable() {\n");
            script.push_str("    printf '%s[1;31mPackage info not available%s[0m\\n' \"$ESC\" \"$ESC\"\n");
            script.push_str("}\n\n");
        } else {
            script.push_str("render() {\n    cat\n}\n\n");
            script.push_str("unavailable() {\n    echo \"Package info not available\"\n}\n\n");
        }

        script.push_str(&format!(
            "if [ -f \"$CACHE_FILE\" ] && [ $(( $(date +%s) - $(file_mtime \"$CACHE_FILE\") )) -lt {} ]; then\n",
            INFO_CACHE_TTL_SECS
        ));
        script.push_str("    render < \"$CACHE_FILE\"\n");
        script.push_str("    exit 0\n");
        script.push_str("fi\n\n");

        script.push_str("mkdir -p \"$CACHE_DIR\" 2>/dev/null\n");
        script.push_str("TMP_FILE=\"$CACHE_FILE.$$.tmp\"\n");
        script.push_str(
            "if NO_COLOR=1 TERM=dumb \"$BREW\" info \"$PACKAGE\" > \"$TMP_FILE\" 2>/dev/null; then\n",
        );
        script.push_str("    mv -f \"$TMP_FILE\" \"$CACHE_FILE\" 2>/dev/null || CACHE_FILE=\"$TMP_FILE\"\n");
        script.push_str("    render < \"$CACHE_FILE\"\n");
        script.push_str("    rm -f \"$TMP_FILE\"\n");
        script.push_str("else\n");
        script.push_str("    rm -f \"$TMP_FILE\"\n");
        script.push_str("    unavailable\n");
        script.push_str("fi\n");

        script
    }

    /// Write the script to `path` and mark it executable
    pub async fn write_to(&self, path: &Path) -> BrewFuzzyResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BrewFuzzyError::io("creating preview script directory", e))?;
        }

        fs::write(path, self.render()).await.map_err(|e| {
            BrewFuzzyError::io(format!("writing preview script {}", path.display()), e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o755);
            fs::set_permissions(path, perms)
                .await
                .map_err(|e| BrewFuzzyError::io("setting preview script permissions", e))?;
        }

        debug!(path = %path.display(), colors = self.colors, "Wrote preview script");
        Ok(())
    }
}

/// Quote a string for POSIX shells
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
