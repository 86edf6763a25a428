//! Integration tests for brew-fuzzy

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn brew_fuzzy() -> Command {
        cargo_bin_cmd!("brew-fuzzy")
    }

    #[test]
    fn help_displays() {
        brew_fuzzy()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--refresh"))
            .stdout(predicate::str::contains("--dry-run"))
            .stdout(predicate::str::contains("--preview-colors"))
            .stdout(predicate::str::contains("Controls:"));
    }

    #[test]
    fn short_help_displays() {
        brew_fuzzy()
            .arg("-h")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn version_displays() {
        brew_fuzzy()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("brew-fuzzy"));
    }

    #[test]
    fn unknown_flag_fails() {
        brew_fuzzy().arg("--bogus").assert().failure();
    }
}

#[cfg(unix)]
mod flow_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FAKE_BREW: &str = r#"#!/bin/sh
case "$1" in
  search)
    case "$2" in
      --formula) printf 'wget\ncurl\n' ;;
      --cask) printf 'firefox\n' ;;
    esac
    ;;
  --repository) exit 1 ;;
  install) echo "fake install $2" ;;
esac
"#;

    const FAILING_BREW: &str = "#!/bin/sh\necho 'brew is broken' >&2\nexit 1\n";

    /// Temp HOME with fake `brew` and `fzf` on PATH
    struct Sandbox {
        home: TempDir,
        bin: PathBuf,
    }

    impl Sandbox {
        fn new(brew: &str, fzf: &str) -> Self {
            let home = TempDir::new().unwrap();
            let bin = home.path().join("bin");
            std::fs::create_dir_all(&bin).unwrap();
            write_executable(&bin.join("brew"), brew);
            write_executable(&bin.join("fzf"), fzf);
            Self { home, bin }
        }

        fn cache_file(&self) -> PathBuf {
            self.home
                .path()
                .join(".cache")
                .join("brew-fuzzy")
                .join("cache.json")
        }

        fn command(&self) -> Command {
            let path = format!(
                "{}:{}",
                self.bin.display(),
                std::env::var("PATH").unwrap_or_default()
            );
            let mut cmd = cargo_bin_cmd!("brew-fuzzy");
            cmd.env("HOME", self.home.path())
                .env("PATH", path)
                .env_remove("BREW_FUZZY_CACHE_DIR")
                .env_remove("BREW_FUZZY_MAX_AGE_HOURS");
            cmd
        }
    }

    fn write_executable(path: &Path, body: &str) {
        std::fs::write(path, body).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    #[serial]
    fn refresh_builds_cache() {
        let sandbox = Sandbox::new(FAKE_BREW, "#!/bin/sh\nexit 130\n");

        sandbox
            .command()
            .arg("--refresh")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache refreshed successfully"));

        let cache: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(sandbox.cache_file()).unwrap()).unwrap();
        assert_eq!(
            cache["packages"],
            serde_json::json!(["wget", "curl", "firefox"])
        );
        assert!(cache["last_updated"].is_string());
        assert!(cache["brew_update"].is_string());
    }

    #[test]
    #[serial]
    fn refresh_failure_exits_non_zero() {
        let sandbox = Sandbox::new(FAILING_BREW, "#!/bin/sh\nexit 130\n");

        sandbox
            .command()
            .arg("--refresh")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to list formula packages").or(
                predicate::str::contains("Failed to list cask packages"),
            ));

        assert!(!sandbox.cache_file().exists());
    }

    #[test]
    #[serial]
    fn dry_run_reports_selected_package() {
        let sandbox = Sandbox::new(FAKE_BREW, "#!/bin/sh\nsed -n 3p\n");

        sandbox
            .command()
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("Would install: firefox"))
            .stdout(predicate::str::contains("fake install").not());

        assert!(sandbox.home.path().join(".cache/brew-fuzzy/preview.sh").exists());
    }

    #[test]
    #[serial]
    fn install_runs_brew() {
        let sandbox = Sandbox::new(FAKE_BREW, "#!/bin/sh\nhead -n 1\n");

        sandbox
            .command()
            .assert()
            .success()
            .stdout(predicate::str::contains("fake install wget"));
    }

    #[test]
    #[serial]
    fn cancelled_selection_exits_zero() {
        let sandbox = Sandbox::new(FAKE_BREW, "#!/bin/sh\ncat > /dev/null\nexit 130\n");

        sandbox
            .command()
            .assert()
            .success()
            .stdout(predicate::str::contains("fake install").not());
    }

    #[test]
    #[serial]
    fn selector_failure_exits_non_zero() {
        let sandbox = Sandbox::new(FAKE_BREW, "#!/bin/sh\necho 'bad flag' >&2\nexit 2\n");

        sandbox
            .command()
            .assert()
            .failure()
            .stderr(predicate::str::contains("fzf failed"));
    }

    #[test]
    #[serial]
    fn fresh_cache_is_served_without_brew_search() {
        let sandbox = Sandbox::new(FAILING_BREW, "#!/bin/sh\nhead -n 1\n");
        let cache_file = sandbox.cache_file();
        std::fs::create_dir_all(cache_file.parent().unwrap()).unwrap();
        let snapshot = serde_json::json!({
            "packages": ["cached-pkg"],
            "last_updated": chrono::Utc::now().to_rfc3339(),
            "brew_update": "1970-01-01T00:00:00Z",
        });
        std::fs::write(&cache_file, snapshot.to_string()).unwrap();

        sandbox
            .command()
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("Would install: cached-pkg"));
    }
}
