//! Post-run reconciliation and reporting.

use crate::display::{format_row, name_width, StatusRow};
use crate::types::UpdateResult;
use console::{measure_text_width, style};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(results: &[UpdateResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_succeeded() {
            write!(f, "All {} tools updated successfully.", self.succeeded)
        } else {
            write!(f, "{} succeeded, {} failed.", self.succeeded, self.failed)
        }
    }
}

/// Copies the probed versions into each result.
pub fn reconcile(
    results: &mut [UpdateResult],
    before: &HashMap<String, Option<String>>,
    after: &HashMap<String, Option<String>>,
) {
    for result in results.iter_mut() {
        result.old_version = before.get(&result.tool.name).cloned().flatten();
        result.new_version = after.get(&result.tool.name).cloned().flatten();
    }
}

pub fn write_table<W: Write>(out: &mut W, results: &[UpdateResult]) -> io::Result<()> {
    let rows: Vec<StatusRow> = results.iter().map(StatusRow::with_versions).collect();
    let width = name_width(&rows);
    for row in &rows {
        writeln!(out, "  {}", format_row(row, width))?;
    }
    Ok(())
}

const TAB_WIDTH: usize = 8;

/// What a terminal would leave visible for one output line: text after the
/// last carriage return, with tabs expanded to 8-column stops.
fn visible_line(line: &str) -> String {
    let line = line.trim_end_matches('\r');
    let line = line.rsplit('\r').next().unwrap_or(line);

    let mut visible = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            visible.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            visible.push(ch);
            column += measure_text_width(ch.encode_utf8(&mut [0; 4]));
        }
    }
    visible
}

/// Boxed detail panel for a failed tool.
pub fn failure_panel(result: &UpdateResult) -> String {
    let combined = result.combined_output();
    let body = if combined.is_empty() {
        format!("Exit code: {}", result.exit_code)
    } else {
        combined
    };

    let title = format!(" {} failed ", result.tool.name);
    let lines: Vec<String> = body
        .trim_end_matches('\n')
        .lines()
        .map(visible_line)
        .collect();
    let inner = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        .max(measure_text_width(&title) + 2);

    let border = |s: String| style(s).red().to_string();
    let mut panel = String::new();
    panel.push_str(&border(format!(
        "╭─{}{}╮",
        title,
        "─".repeat(inner + 1 - measure_text_width(&title))
    )));
    panel.push('\n');
    for line in lines {
        let pad = inner - measure_text_width(&line);
        panel.push_str(&format!(
            "{} {}{} {}\n",
            border("│".to_string()),
            line,
            " ".repeat(pad),
            border("│".to_string())
        ));
    }
    panel.push_str(&border(format!("╰{}╯", "─".repeat(inner + 2))));
    panel.push('\n');
    panel
}

/// Final table, summary line, and one panel per failure.
pub fn write_report<W: Write>(out: &mut W, results: &[UpdateResult]) -> io::Result<Summary> {
    let summary = Summary::of(results);

    write_table(out, results)?;
    writeln!(out)?;
    if summary.all_succeeded() {
        writeln!(out, "{}", style(summary).green())?;
        return Ok(summary);
    }

    writeln!(out, "{}", style(summary).yellow())?;
    writeln!(out)?;
    for result in results.iter().filter(|r| !r.success) {
        write!(out, "{}", failure_panel(result))?;
    }
    Ok(summary)
}

pub fn write_json<W: Write>(out: &mut W, results: &[UpdateResult]) -> io::Result<Summary> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(Summary::of(results))
}
