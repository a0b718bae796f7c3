use crate::types::{Tool, UpdateResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("result for '{0}' was already recorded")]
    AlreadyRecorded(String),
    #[error("'{0}' is not tracked by this run")]
    UnknownTool(String),
}

#[derive(Debug, Default)]
struct Entries {
    order: Vec<String>,
    results: HashMap<String, Option<UpdateResult>>,
}

/// Shared per-tool progress: every entry starts absent and is filled exactly once.
///
/// Clones share the same underlying map. Locks are held only for the
/// duration of a single read or write, never across an await.
#[derive(Debug, Clone, Default)]
pub struct ProgressMap {
    inner: Arc<Mutex<Entries>>,
}

impl ProgressMap {
    pub fn new(tools: &[Tool]) -> Self {
        let entries = Entries {
            order: tools.iter().map(|t| t.name.clone()).collect(),
            results: tools.iter().map(|t| (t.name.clone(), None)).collect(),
        };
        Self {
            inner: Arc::new(Mutex::new(entries)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Writers never panic while holding the lock, so a poisoned map is still consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn record(&self, result: UpdateResult) -> Result<(), ProgressError> {
        let mut entries = self.lock();
        let name = result.tool.name.clone();
        match entries.results.get_mut(&name) {
            None => Err(ProgressError::UnknownTool(name)),
            Some(Some(_)) => Err(ProgressError::AlreadyRecorded(name)),
            Some(slot) => {
                *slot = Some(result);
                Ok(())
            }
        }
    }

    /// Consistent copy of every entry, in registry order.
    pub fn snapshot(&self) -> Vec<(String, Option<UpdateResult>)> {
        let entries = self.lock();
        entries
            .order
            .iter()
            .map(|name| (name.clone(), entries.results.get(name).cloned().flatten()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<UpdateResult> {
        self.lock().results.get(name).cloned().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.lock().results.values().all(Option::is_some)
    }
}
