//! Version probing. A probe that cannot produce a version yields `None`;
//! it is never an error for the run.

use crate::process::run_command;
use crate::types::Tool;
use futures_util::future::join_all;
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;

/// Returns the first capture group of `pattern` in `text`, or the whole
/// match when the pattern has no groups.
pub fn extract_version(pattern: &str, text: &str) -> Option<String> {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Invalid version pattern {:?}: {}", pattern, e);
            return None;
        }
    };

    let caps = re.captures(text)?;
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str().to_string())
}

pub async fn probe_version(tool: &Tool, timeout: Duration) -> Option<String> {
    let command = tool.version_command.as_ref()?;

    let output = match run_command(command, None, Some(timeout)).await {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("Version check for {} failed: {}", tool.name, e);
            return None;
        }
    };

    if !output.success() {
        tracing::debug!(
            "Version check for {} exited with code {}",
            tool.name,
            output.code
        );
        return None;
    }

    let version = extract_version(&tool.version_pattern, &output.stdout_lossy());
    if version.is_none() {
        tracing::debug!("No version found in output of {:?}", command);
    }
    version
}

/// Probes every tool concurrently and waits for all of them.
pub async fn probe_all(tools: &[Tool], timeout: Duration) -> HashMap<String, Option<String>> {
    let probes = tools.iter().map(|tool| async move {
        let version = probe_version(tool, timeout).await;
        tracing::info!(
            "{}: version {}",
            tool.name,
            version.as_deref().unwrap_or("unknown")
        );
        (tool.name.clone(), version)
    });

    join_all(probes).await.into_iter().collect()
}
