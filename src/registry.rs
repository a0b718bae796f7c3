//! Compiled-in list of tools to update.

use crate::types::Tool;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate tool name '{0}' in registry")]
    DuplicateName(String),
    #[error("unknown tool '{name}' (available: {available})")]
    UnknownTool { name: String, available: String },
}

fn home_path(relative: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(relative)
}

pub fn default_tools() -> Vec<Tool> {
    vec![
        Tool::new("codex", &["npm", "update", "-g", "@openai/codex"])
            .with_version_command(&["codex", "--version"]),
        Tool::new("gemini", &["npm", "update", "-g", "@google/gemini-cli"])
            .with_version_command(&["gemini", "--version"]),
        Tool::new("crush", &["brew", "upgrade", "crush"])
            .with_version_command(&["crush", "--version"]),
        Tool::new("claude", &["npm", "update"])
            .with_cwd(home_path(".claude/local"))
            .with_version_command(&["claude", "--version"]),
    ]
}

/// Rejects registries where two tools share a name, since results are keyed by it.
pub fn validate(tools: &[Tool]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for tool in tools {
        if !seen.insert(tool.name.as_str()) {
            return Err(RegistryError::DuplicateName(tool.name.clone()));
        }
    }
    Ok(())
}

/// Restricts the registry to the requested names, keeping registry order.
/// An empty selection keeps every tool.
pub fn select(tools: Vec<Tool>, names: &[String]) -> Result<Vec<Tool>, RegistryError> {
    if names.is_empty() {
        return Ok(tools);
    }

    for name in names {
        if !tools.iter().any(|t| &t.name == name) {
            let available = tools
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RegistryError::UnknownTool {
                name: name.clone(),
                available,
            });
        }
    }

    Ok(tools
        .into_iter()
        .filter(|t| names.contains(&t.name))
        .collect())
}
