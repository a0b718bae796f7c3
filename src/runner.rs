//! Three-phase run: probe versions, update with live display, probe again.

use crate::config::RunSettings;
use crate::display::{display_loop, StatusRenderer};
use crate::probe::probe_all;
use crate::progress::ProgressMap;
use crate::report::reconcile;
use crate::types::{Tool, UpdateResult};
use crate::updater::update_tool;
use crate::version::format_version_delta;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::time::Duration;

/// Updates every tool concurrently while the display loop polls `progress`.
/// Returns once all updates have finished and the last frame is drawn.
pub async fn run_updates<R: StatusRenderer + ?Sized>(
    tools: &[Tool],
    progress: &ProgressMap,
    renderer: &mut R,
    refresh_interval: Duration,
) -> Vec<UpdateResult> {
    let updates = join_all(tools.iter().map(|tool| update_tool(tool, progress)));
    let display = display_loop(progress, renderer, refresh_interval);

    let (results, displayed) = tokio::join!(updates, display);
    if let Err(e) = displayed {
        tracing::warn!("Live display stopped: {}", e);
    }
    results
}

async fn probe_phase(
    tools: &[Tool],
    settings: &RunSettings,
    phase: &str,
) -> HashMap<String, Option<String>> {
    if !settings.check_versions {
        return HashMap::new();
    }
    tracing::info!("Checking versions ({})...", phase);
    probe_all(tools, settings.probe_timeout).await
}

pub async fn run<R: StatusRenderer + ?Sized>(
    tools: &[Tool],
    settings: &RunSettings,
    renderer: &mut R,
) -> Vec<UpdateResult> {
    let before = probe_phase(tools, settings, "before update").await;

    let progress = ProgressMap::new(tools);
    let mut results = run_updates(tools, &progress, renderer, settings.refresh_interval).await;

    let after = probe_phase(tools, settings, "after update").await;
    reconcile(&mut results, &before, &after);
    for result in &results {
        tracing::info!(
            "{}: {}",
            result.tool.name,
            format_version_delta(result.old_version.as_deref(), result.new_version.as_deref())
        );
    }
    results
}
