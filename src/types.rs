use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version pattern used when a tool does not provide its own.
pub const DEFAULT_VERSION_PATTERN: &str = r"(\d+\.\d+\.\d+)";

/// One update target. Defined at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub command: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub version_command: Option<Vec<String>>,
    pub version_pattern: String,
}

impl Tool {
    pub fn new(name: &str, command: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
            cwd: None,
            version_command: None,
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_version_command(mut self, command: &[&str]) -> Self {
        self.version_command = Some(command.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_version_pattern(mut self, pattern: &str) -> Self {
        self.version_pattern = pattern.to_string();
        self
    }
}

/// Outcome of one tool's update, amended with versions after the final probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
    #[serde(serialize_with = "serialize_tool_name")]
    pub tool: Tool,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub old_version: Option<String>,
    pub new_version: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl UpdateResult {
    /// Combined output for failure panels: stdout then stderr, blank streams skipped.
    pub fn combined_output(&self) -> String {
        let mut output = String::new();
        if !self.stdout.trim().is_empty() {
            output.push_str(&self.stdout);
        }
        if !self.stderr.trim().is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&self.stderr);
        }
        output
    }
}

fn serialize_tool_name<S: serde::Serializer>(tool: &Tool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&tool.name)
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Exit code and raw output streams of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// Row status shown by the live display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Updating,
    Done,
    Failed,
}

impl ToolStatus {
    pub fn of(result: Option<&UpdateResult>) -> Self {
        match result {
            None => ToolStatus::Updating,
            Some(r) if r.success => ToolStatus::Done,
            Some(_) => ToolStatus::Failed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolStatus::Updating => "updating...",
            ToolStatus::Done => "done",
            ToolStatus::Failed => "failed",
        }
    }
}
