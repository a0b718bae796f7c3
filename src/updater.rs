use crate::process::run_command;
use crate::progress::ProgressMap;
use crate::types::{Tool, UpdateResult};
use std::time::Instant;

/// Runs the tool's update command to completion and records the outcome.
///
/// Spawn errors become a failed result with exit code 1 and the error text
/// in `stderr`; nothing here aborts sibling updates.
pub async fn update_tool(tool: &Tool, progress: &ProgressMap) -> UpdateResult {
    tracing::info!("Updating {}...", tool.name);
    let started = Instant::now();

    let result = match run_command(&tool.command, tool.cwd.as_deref(), None).await {
        Ok(output) => UpdateResult {
            tool: tool.clone(),
            success: output.success(),
            stdout: output.stdout_lossy(),
            stderr: output.stderr_lossy(),
            exit_code: output.code,
            old_version: None,
            new_version: None,
            duration: started.elapsed(),
        },
        Err(e) => UpdateResult {
            tool: tool.clone(),
            success: false,
            stdout: String::new(),
            stderr: e.to_string(),
            exit_code: 1,
            old_version: None,
            new_version: None,
            duration: started.elapsed(),
        },
    };

    if result.success {
        tracing::info!("{} updated in {:?}", tool.name, result.duration);
    } else {
        tracing::info!("{} failed with exit code {}", tool.name, result.exit_code);
    }

    if let Err(e) = progress.record(result.clone()) {
        tracing::error!("Could not record result for {}: {}", tool.name, e);
    }

    result
}
