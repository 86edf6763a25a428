//! Interactive package selection through fzf
//!
//! The package list goes to fzf on stdin, one name per line. fzf draws on
//! the terminal itself and prints the chosen line on stdout.

pub mod preview;

pub use preview::{shell_quote, HighlightRule, PreviewScript, HIGHLIGHT_RULES};

use crate::config::Config;
use crate::error::{BrewFuzzyError, BrewFuzzyResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code fzf uses when the user aborts with ESC or CTRL-C
pub const FZF_INTERRUPTED: i32 = 130;

const PROMPT: &str = "🍺 Search packages: ";
const HEADER: &str = "Press ENTER to install, ESC to cancel, TAB to toggle preview";

/// Catppuccin-style palette used with `--preview-colors`
const COLOR_PALETTE: [&str; 3] = [
    "bg+:#313244,bg:#1e1e2e,spinner:#f5e0dc,hl:#f38ba8",
    "fg:#cdd6f4,header:#f38ba8,info:#cba6ac,pointer:#f5e0dc",
    "marker:#f5e0dc,fg+:#cdd6f4,prompt:#cba6ac,hl+:#f38ba8",
];

/// Outcome of an interactive selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user picked a package
    Picked(String),
    /// The user backed out without choosing
    Cancelled,
}

/// Bridge to the external fzf process
#[derive(Debug, Clone)]
pub struct FzfSelector {
    program: String,
    brew_program: String,
    preview_script: PathBuf,
    info_cache_dir: PathBuf,
}

impl FzfSelector {
    /// Create a selector using the configured cache paths
    pub fn new(config: &Config) -> Self {
        Self {
            program: "fzf".to_string(),
            brew_program: "brew".to_string(),
            preview_script: config.preview_script(),
            info_cache_dir: config.info_cache_dir.clone(),
        }
    }

    /// Use a different selector executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different executable for preview `info` queries
    pub fn with_brew_program(mut self, program: impl Into<String>) -> Self {
        self.brew_program = program.into();
        self
    }

    /// Let the user pick one package
    ///
    /// Regenerates the preview script, runs fzf in the foreground, and maps
    /// its exit status onto a `Selection`.
    pub async fn select(&self, packages: &[String], colors: bool) -> BrewFuzzyResult<Selection> {
        PreviewScript::new(&self.info_cache_dir, colors)
            .with_brew_program(&self.brew_program)
            .write_to(&self.preview_script)
            .await?;

        let args = fzf_args(&self.preview_script, colors);
        debug!("Executing: {} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BrewFuzzyError::command_failed(self.program.as_str(), e))?;

        let input = packages.join("\n");
        let feeder = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    // fzf may exit before reading everything
                    debug!(error = %e, "Stopped feeding fzf");
                }
            })
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| BrewFuzzyError::io("waiting for fzf", e))?;

        if let Some(feeder) = feeder {
            if let Err(e) = feeder.await {
                warn!(error = %e, "fzf input task failed");
            }
        }

        interpret_output(output.status.code(), &output.stdout, &output.stderr)
    }
}

/// Build the fzf argument list
pub fn fzf_args(preview_script: &Path, colors: bool) -> Vec<String> {
    let mut args = vec![
        "--height=80%".to_string(),
        "--layout=reverse".to_string(),
        "--info=inline".to_string(),
        "--border=rounded".to_string(),
        format!(
            "--preview={} {{}}",
            shell_quote(&preview_script.to_string_lossy())
        ),
        "--preview-window=right:60%:wrap:border-left".to_string(),
        format!("--prompt={}", PROMPT),
        format!("--header={}", HEADER),
        "--bind=tab:toggle-preview".to_string(),
    ];

    if colors {
        args.extend(COLOR_PALETTE.iter().map(|c| format!("--color={}", c)));
        args.push("--ansi".to_string());
    }

    args
}

/// Map fzf's exit status and output onto a selection
///
/// `None` means the process was killed by a signal.
pub fn interpret_output(
    code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> BrewFuzzyResult<Selection> {
    match code {
        Some(0) => {
            let picked = String::from_utf8_lossy(stdout).trim().to_string();
            if picked.is_empty() {
                Ok(Selection::Cancelled)
            } else {
                Ok(Selection::Picked(picked))
            }
        }
        Some(FZF_INTERRUPTED) => Ok(Selection::Cancelled),
        Some(code) => {
            let stderr = String::from_utf8_lossy(stderr);
            let detail = stderr.trim();
            Err(BrewFuzzyError::Selector(if detail.is_empty() {
                format!("exit code {}", code)
            } else {
                format!("exit code {}: {}", code, detail)
            }))
        }
        None => Err(BrewFuzzyError::Selector(
            "terminated by signal".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn plain_args() {
        let args = fzf_args(Path::new("/home/ada/.cache/brew-fuzzy/preview.sh"), false);

        assert_eq!(args[0], "--height=80%");
        assert!(args.contains(&"--layout=reverse".to_string()));
        assert!(args.contains(&"--border=rounded".to_string()));
        assert!(args.contains(&"--preview='/home/ada/.cache/brew-fuzzy/preview.sh' {}".to_string()));
        assert!(args.contains(&"--prompt=🍺 Search packages: ".to_string()));
        assert!(args.contains(&format!("--header={}", HEADER)));
        assert!(args.contains(&"--bind=tab:toggle-preview".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--color")));
        assert!(!args.contains(&"--ansi".to_string()));
    }

    #[test]
    fn color_args_add_palette_and_ansi() {
        let plain = fzf_args(Path::new("/tmp/preview.sh"), false);
        let colored = fzf_args(Path::new("/tmp/preview.sh"), true);

        assert_eq!(colored.len(), plain.len() + 4);
        assert_eq!(&colored[..plain.len()], &plain[..]);
        assert_eq!(
            colored.iter().filter(|a| a.starts_with("--color=")).count(),
            3
        );
        assert_eq!(colored.last().map(String::as_str), Some("--ansi"));
    }

    #[test]
    fn preview_path_with_spaces_is_quoted() {
        let args = fzf_args(Path::new("/Users/Ada Lovelace/.cache/preview.sh"), false);
        assert!(args.contains(&"--preview='/Users/Ada Lovelace/.cache/preview.sh' {}".to_string()));
    }

    #[test]
    fn zero_exit_picks_trimmed_line() {
        let selection = interpret_output(Some(0), b"  wget\n", b"").unwrap();
        assert_eq!(selection, Selection::Picked("wget".to_string()));
    }

    #[test]
    fn zero_exit_with_empty_output_is_cancelled() {
        assert_eq!(
            interpret_output(Some(0), b" \n", b"").unwrap(),
            Selection::Cancelled
        );
    }

    #[test]
    fn interrupted_is_cancelled() {
        assert_eq!(
            interpret_output(Some(130), b"", b"").unwrap(),
            Selection::Cancelled
        );
    }

    #[test]
    fn other_exit_codes_are_errors() {
        let err = interpret_output(Some(2), b"", b"unknown option: --bogus\n").unwrap_err();
        assert_eq!(err.to_string(), "fzf failed: exit code 2: unknown option: --bogus");

        let err = interpret_output(Some(1), b"", b"").unwrap_err();
        assert!(matches!(err, BrewFuzzyError::Selector(_)));

        let err = interpret_output(None, b"", b"").unwrap_err();
        assert!(err.to_string().contains("signal"));
    }

    fn selector_in(temp: &TempDir) -> FzfSelector {
        let config = Config::new(temp.path().join("cache"), Duration::hours(24));
        FzfSelector::new(&config)
    }

    #[tokio::test]
    async fn missing_fzf_is_cli_not_found() {
        let temp = TempDir::new().unwrap();
        let selector = selector_in(&temp).with_program("brew-fuzzy-no-such-fzf");

        let err = selector.select(&["wget".to_string()], false).await.unwrap_err();

        assert!(matches!(err, BrewFuzzyError::CliNotFound { .. }));
        assert!(temp.path().join("cache").join("preview.sh").exists());
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use crate::test_support::write_script;
        use serial_test::serial;

        #[tokio::test]
        #[serial]
        async fn picks_line_chosen_by_selector() {
            let temp = TempDir::new().unwrap();
            let fzf = write_script(temp.path(), "fzf", "sed -n 2p\n");
            let selector = selector_in(&temp).with_program(fzf.to_string_lossy());
            let packages = vec!["wget".to_string(), "curl".to_string(), "firefox".to_string()];

            let selection = selector.select(&packages, true).await.unwrap();

            assert_eq!(selection, Selection::Picked("curl".to_string()));
        }

        #[tokio::test]
        #[serial]
        async fn interrupted_selector_is_cancelled() {
            let temp = TempDir::new().unwrap();
            let fzf = write_script(temp.path(), "fzf", "cat > /dev/null\nexit 130\n");
            let selector = selector_in(&temp).with_program(fzf.to_string_lossy());

            let selection = selector.select(&["wget".to_string()], false).await.unwrap();

            assert_eq!(selection, Selection::Cancelled);
        }

        #[tokio::test]
        #[serial]
        async fn failing_selector_reports_stderr() {
            let temp = TempDir::new().unwrap();
            let fzf = write_script(temp.path(), "fzf", "echo 'no tty' >&2\nexit 2\n");
            let selector = selector_in(&temp).with_program(fzf.to_string_lossy());

            let err = selector.select(&["wget".to_string()], false).await.unwrap_err();

            assert!(err.to_string().contains("no tty"));
        }

        #[tokio::test]
        #[serial]
        async fn empty_list_feeds_empty_input_and_cancels() {
            let temp = TempDir::new().unwrap();
            let fzf = write_script(temp.path(), "fzf", "head -n 1\n");
            let selector = selector_in(&temp).with_program(fzf.to_string_lossy());

            let selection = selector.select(&[], false).await.unwrap();

            assert_eq!(selection, Selection::Cancelled);
        }

        #[tokio::test]
        #[serial]
        async fn receives_fixed_arguments() {
            let temp = TempDir::new().unwrap();
            let log = temp.path().join("args.txt");
            let fzf = write_script(
                temp.path(),
                "fzf",
                &format!(
                    "printf '%s\\n' \"$@\" > '{}'\ncat > /dev/null\nexit 130\n",
                    log.display()
                ),
            );
            let selector = selector_in(&temp).with_program(fzf.to_string_lossy());

            selector.select(&["wget".to_string()], false).await.unwrap();

            let logged = std::fs::read_to_string(&log).unwrap();
            let expected = fzf_args(&temp.path().join("cache").join("preview.sh"), false);
            assert_eq!(logged.lines().collect::<Vec<_>>(), expected);
        }
    }
}
