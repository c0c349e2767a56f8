mod json;
mod summary;
mod table;

pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;

use crate::history::Batch;
use crate::plan::RenamePlan;
use crate::undo::undo_preview;
use serde::Serialize;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// What a preview is showing, so renderers can title it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Rename,
    Undo,
}

/// One line of a preview: a file name and what it becomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub from: String,
    pub to: String,
}

/// Rows for a plan: original name -> new name
pub fn plan_rows(plan: &RenamePlan) -> Vec<PreviewRow> {
    plan.entries
        .iter()
        .map(|entry| PreviewRow {
            from: entry.original_name().to_string(),
            to: entry.new_name().to_string(),
        })
        .collect()
}

/// Rows for undoing a batch: current name -> original name
pub fn undo_rows(batch: &Batch) -> Vec<PreviewRow> {
    undo_preview(batch)
        .into_iter()
        .map(|(from, to)| PreviewRow { from, to })
        .collect()
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

fn render_rows(kind: PreviewKind, rows: &[PreviewRow], format: Preview, use_color: bool) -> String {
    match format {
        Preview::Table => render_table(kind, rows, use_color),
        Preview::Summary => render_summary(kind, rows, use_color),
        Preview::Json => render_json(kind, rows),
    }
}

/// Render the renames a plan proposes
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);
    render_rows(PreviewKind::Rename, &plan_rows(plan), format, use_color)
}

/// Render the reversals an undo of `batch` would perform
pub fn render_undo(batch: &Batch, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);
    render_rows(PreviewKind::Undo, &undo_rows(batch), format, use_color)
}
