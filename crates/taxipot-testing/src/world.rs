//! Isolated environment for running the `taxipot` binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{Context, Result};
use assert_cmd::Command;
use tempfile::TempDir;

/// Temp data directory plus the flags and env every CLI run should get.
///
/// # Example
/// ```no_run
/// use taxipot_testing::TestWorld;
///
/// let world = TestWorld::new().unwrap();
/// let result = world.run(&["landmarks"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    base_url: Option<String>,
    format: &'static str,
    env_vars: HashMap<String, String>,
}

impl TestWorld {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let data_dir = temp_dir.path().join(".taxipot");
        std::fs::create_dir_all(&data_dir).context("Failed to create data dir")?;

        Ok(Self {
            temp_dir,
            data_dir,
            base_url: None,
            format: "plain",
            env_vars: HashMap::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Point every run at a specific server (usually a [`crate::FakeBackend`]).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// `--format` passed to every run (`plain` unless changed).
    pub fn with_format(mut self, format: &'static str) -> Self {
        self.format = format;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Store `token` as the persisted credential, as `login --token` would.
    pub fn with_credential(self, token: &str) -> Result<Self> {
        std::fs::write(self.data_dir.join("credential"), token)?;
        Ok(self)
    }

    pub fn write_config(&self, toml: &str) -> Result<()> {
        std::fs::write(self.data_dir.join("config.toml"), toml)?;
        Ok(())
    }

    pub fn credential(&self) -> Option<String> {
        std::fs::read_to_string(self.data_dir.join("credential")).ok()
    }

    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--format")
            .arg(self.format);
        if let Some(base_url) = &self.base_url {
            cmd.arg("--base-url").arg(base_url);
        }

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("TAXIPOT_PATH");
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run the `taxipot` binary with `args`.
    ///
    /// Requires `CARGO_BIN_EXE_taxipot`, which cargo sets for the binary's
    /// own integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("taxipot")
            .map_err(|e| anyhow::anyhow!("Failed to find taxipot binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not JSON:\n{}", self.stdout))
    }
}
