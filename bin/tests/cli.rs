//! nin end-to-end tests
//!
//! Drives the built binary against a temporary store

use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// nin CLI invocation wrapper
struct NinCli {
    home: TempDir,
    output_format: Option<String>,
}

struct CliResult {
    success: bool,
    stdout: String,
    stderr: String,
}

impl NinCli {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            output_format: None,
        }
    }

    fn with_output_format(mut self, format: &str) -> Self {
        self.output_format = Some(format.to_string());
        self
    }

    fn store(&self) -> PathBuf {
        self.home.path().join("todos.toml")
    }

    fn run(&self, args: &[&str]) -> CliResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_nin"));
        cmd.env("HOME", self.home.path())
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("NIN_CONFIG")
            .env_remove("NIN_STORE")
            .arg("-s")
            .arg(self.store());
        if let Some(format) = &self.output_format {
            cmd.arg("--output").arg(format);
        }
        cmd.args(args);

        let output = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .unwrap();

        CliResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[test]
fn test_unknown_command_prints_usage_and_succeeds() {
    let cli = NinCli::new();

    let result = cli.run(&["zzz"]);

    assert!(result.success);
    assert!(result.stdout.contains("Usage"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_reads_config_from_home() {
    let cli = NinCli::new().with_output_format("minimal");
    let config_dir = cli.home.path().join(".config").join("nin");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.yaml"), "list:\n  archived: true\n").unwrap();
    cli.run(&["a", "hidden"]);
    cli.run(&["ar", "1"]);

    let result = cli.run(&["l"]);

    assert_eq!(result.stdout, "1 hidden\n");
}

#[test]
fn test_add_then_list() {
    let cli = NinCli::new().with_output_format("minimal");

    assert!(cli.run(&["a", "buy", "milk"]).success);
    assert!(cli.run(&["a", "walk", "dog", "--date", "none"]).success);

    let result = cli.run(&["l"]);
    assert!(result.success);
    assert_eq!(result.stdout, "2 walk dog\n1 buy milk\n");
    assert!(cli.store().exists());
}

#[test]
fn test_update_and_delete() {
    let cli = NinCli::new().with_output_format("json");
    cli.run(&["a", "first"]);
    cli.run(&["a", "second"]);

    assert!(cli.run(&["u", "2", "second", "edited"]).success);
    assert!(cli.run(&["d", "1"]).success);

    let listed: serde_json::Value = serde_json::from_str(&cli.run(&["l"]).stdout).unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[0]["desc"], "second edited");
}

#[test]
fn test_missing_item_fails_with_message() {
    let cli = NinCli::new();

    let result = cli.run(&["d", "50"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Item not found: 50"));
}

#[test]
fn test_store_is_toml_grouped_by_date() {
    let cli = NinCli::new();
    cli.run(&["a", "dated", "--date", "2024-05-10"]);
    cli.run(&["a", "undated", "--date", "none"]);

    let content = std::fs::read_to_string(cli.store()).unwrap();

    assert!(content.contains("2024-05-10"));
    assert!(content.contains("undated"));
    assert!(content.contains("desc = \"dated\""));
}
