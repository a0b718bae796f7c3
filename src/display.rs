//! Live status table driven by polling the shared progress map.

use crate::progress::ProgressMap;
use crate::types::{ToolStatus, UpdateResult};
use crate::version::VersionDelta;
use console::{pad_str, style, Alignment};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub name: String,
    pub status: ToolStatus,
    pub version: Option<VersionDelta>,
}

impl StatusRow {
    pub fn from_result(name: &str, result: Option<&UpdateResult>) -> Self {
        Self {
            name: name.to_string(),
            status: ToolStatus::of(result),
            version: None,
        }
    }

    /// Final-table row including the before/after versions.
    pub fn with_versions(result: &UpdateResult) -> Self {
        Self {
            name: result.tool.name.clone(),
            status: ToolStatus::of(Some(result)),
            version: Some(VersionDelta::new(
                result.old_version.as_deref(),
                result.new_version.as_deref(),
            )),
        }
    }
}

pub fn status_rows(snapshot: &[(String, Option<UpdateResult>)]) -> Vec<StatusRow> {
    snapshot
        .iter()
        .map(|(name, result)| StatusRow::from_result(name, result.as_ref()))
        .collect()
}

pub fn name_width(rows: &[StatusRow]) -> usize {
    rows.iter()
        .map(|r| console::measure_text_width(&r.name))
        .max()
        .unwrap_or(0)
}

/// One table line: bold name column, colored status, optional version delta.
pub fn format_row(row: &StatusRow, width: usize) -> String {
    let name = style(pad_str(&row.name, width, Alignment::Left, None).to_string()).bold();
    let label = match row.version {
        Some(_) => pad_str(row.status.label(), 11, Alignment::Left, None).to_string(),
        None => row.status.label().to_string(),
    };
    let status = match row.status {
        ToolStatus::Updating => style(label).yellow(),
        ToolStatus::Done => style(label).green(),
        ToolStatus::Failed => style(label).red(),
    };

    match &row.version {
        Some(delta) => format!("{} {} {}", name, status, delta.styled()),
        None => format!("{} {}", name, status),
    }
}

/// Terminal side of the live display.
pub trait StatusRenderer {
    /// Draws the table; `live` is false for the last frame of the run.
    fn render(&mut self, rows: &[StatusRow], live: bool) -> io::Result<()>;
}

/// Draws one `indicatif` line per tool, spinning while the tool is updating.
pub struct TerminalRenderer {
    multi: MultiProgress,
    bars: HashMap<String, ProgressBar>,
}

fn template(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl TerminalRenderer {
    pub fn stderr() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    pub fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: HashMap::new(),
        }
    }

    fn bar_for(&mut self, name: &str) -> ProgressBar {
        if let Some(bar) = self.bars.get(name) {
            return bar.clone();
        }
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(template("{spinner:.yellow} {msg}"));
        self.bars.insert(name.to_string(), bar.clone());
        bar
    }
}

impl StatusRenderer for TerminalRenderer {
    fn render(&mut self, rows: &[StatusRow], live: bool) -> io::Result<()> {
        // The final table is printed with versions by the report
        if !live {
            for bar in self.bars.values() {
                bar.finish_and_clear();
            }
            return self.multi.clear();
        }

        let width = name_width(rows);
        for row in rows {
            let bar = self.bar_for(&row.name);
            if bar.is_finished() {
                continue;
            }
            let line = format_row(row, width);
            if row.status == ToolStatus::Updating {
                bar.set_message(line);
                bar.tick();
            } else {
                bar.set_style(template("  {msg}"));
                bar.finish_with_message(line);
            }
        }
        Ok(())
    }
}

/// A rendered frame, as captured by [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub struct Frame {
    pub at: Instant,
    pub rows: Vec<StatusRow>,
    pub live: bool,
}

/// Keeps every frame in memory instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
}

impl StatusRenderer for RecordingRenderer {
    fn render(&mut self, rows: &[StatusRow], live: bool) -> io::Result<()> {
        self.frames.push(Frame {
            at: Instant::now(),
            rows: rows.to_vec(),
            live,
        });
        Ok(())
    }
}

/// Re-renders the table every `interval` until no tool is pending, then
/// draws a final non-live frame and returns.
pub async fn display_loop<R: StatusRenderer + ?Sized>(
    progress: &ProgressMap,
    renderer: &mut R,
    interval: Duration,
) -> io::Result<()> {
    loop {
        let rows = status_rows(&progress.snapshot());
        let complete = rows.iter().all(|r| r.status != ToolStatus::Updating);
        renderer.render(&rows, !complete)?;
        if complete {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }
}
