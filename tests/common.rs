use aiupdate::types::Tool;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

// Each test binary includes this module but uses only part of it.
#[allow(dead_code)]
pub struct TestContext {
    pub temp_dir: TempDir,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_aiupdate"));

        Self { temp_dir, bin_path }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        // Isolate the registry's home-relative paths
        cmd.env("HOME", self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("CLICOLOR_FORCE");
        cmd
    }

    /// Like `cmd`, but with `PATH` pointing at an empty directory so every
    /// registry command fails to spawn.
    pub fn cmd_without_tools(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("PATH", self.temp_dir.path());
        cmd
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "Command unexpectedly succeeded\nstdout: {}",
            self.stdout
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Stderr did not contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// A tool whose update command is a shell snippet.
#[allow(dead_code)]
pub fn sh_tool(name: &str, script: &str) -> Tool {
    Tool::new(name, &["sh", "-c", script])
}

/// Report text with terminal styling removed.
#[allow(dead_code)]
pub fn plain(bytes: &[u8]) -> String {
    console::strip_ansi_codes(&String::from_utf8_lossy(bytes)).to_string()
}
