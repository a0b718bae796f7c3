//! Before/after version comparison shown in the final table.

use console::{style, StyledObject};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionDelta {
    Unknown,
    Appeared(String),
    Vanished(String),
    Unchanged(String),
    Changed { old: String, new: String },
}

impl VersionDelta {
    pub fn new(old: Option<&str>, new: Option<&str>) -> Self {
        match (old, new) {
            (None, None) => VersionDelta::Unknown,
            (None, Some(new)) => VersionDelta::Appeared(new.to_string()),
            (Some(old), None) => VersionDelta::Vanished(old.to_string()),
            (Some(old), Some(new)) if old == new => VersionDelta::Unchanged(old.to_string()),
            (Some(old), Some(new)) => VersionDelta::Changed {
                old: old.to_string(),
                new: new.to_string(),
            },
        }
    }

    /// Semver ordering of a change, when both sides parse.
    pub fn direction(&self) -> Option<Ordering> {
        match self {
            VersionDelta::Changed { old, new } => {
                let old = parse_semver(old)?;
                let new = parse_semver(new)?;
                Some(new.cmp(&old))
            }
            _ => None,
        }
    }

    /// Display text with terminal styling: upgrades green, downgrades red,
    /// other changes cyan, missing data dimmed.
    pub fn styled(&self) -> StyledObject<String> {
        let text = self.to_string();
        match self {
            VersionDelta::Unknown => style(text).dim(),
            VersionDelta::Appeared(_) | VersionDelta::Vanished(_) => style(text).yellow(),
            VersionDelta::Unchanged(_) => style(text),
            VersionDelta::Changed { .. } => match self.direction() {
                Some(Ordering::Less) => style(text).red().bold(),
                Some(_) => style(text).green().bold(),
                None => style(text).cyan().bold(),
            },
        }
    }
}

impl fmt::Display for VersionDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionDelta::Unknown => write!(f, "unknown"),
            VersionDelta::Appeared(new) => write!(f, "? -> {}", new),
            VersionDelta::Vanished(old) => write!(f, "{} -> ?", old),
            VersionDelta::Unchanged(version) => write!(f, "{}", version),
            VersionDelta::Changed { old, new } => write!(f, "{} -> {}", old, new),
        }
    }
}

fn parse_semver(version: &str) -> Option<Version> {
    Version::parse(version.trim_start_matches('v')).ok()
}

/// Plain-text rendering of an old/new version pair.
pub fn format_version_delta(old: Option<&str>, new: Option<&str>) -> String {
    VersionDelta::new(old, new).to_string()
}
