use crate::apply::{CommitResult, RenameFailure};
use crate::history::History;
use crate::undo::UndoResult;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::Path;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn write_failures(output: &mut String, failures: &[RenameFailure]) {
    for failure in failures {
        writeln!(
            output,
            "  ✗ {} -> {}: {}",
            display_name(&failure.from),
            display_name(&failure.to),
            failure.reason
        )
        .unwrap();
    }
}

impl OutputFormatter for CommitResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failures.is_empty(),
            "operation": "commit",
            "batch_id": self.batch_id,
            "summary": {
                "renamed": self.succeeded_count(),
                "failed": self.failed_count(),
            },
            "renamed": self.succeeded,
            "failures": self.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.succeeded_count() > 0 {
            writeln!(output, "✓ Renamed {} files", self.succeeded_count()).unwrap();
        } else {
            output.push_str("No files were renamed\n");
        }

        if self.failed_count() > 0 {
            writeln!(output, "⚠️  {} renames failed", self.failed_count()).unwrap();
            write_failures(&mut output, &self.failures);
        }

        if let Some(id) = self.batch_id {
            writeln!(output, "Recorded as batch #{}. Enter 'u' to undo it.", id).unwrap();
        }

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failures.is_empty(),
            "operation": "undo",
            "batch_id": self.batch_id,
            "label": self.label,
            "summary": {
                "restored": self.reversed_count,
                "failed": self.failed_count(),
            },
            "failures": self.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Undid batch #{} ({})\n", self.batch_id, self.label);
        writeln!(output, "✓ Restored {} files", self.reversed_count).unwrap();

        if self.failed_count() > 0 {
            writeln!(
                output,
                "⚠️  {} files could not be restored and will not be retried",
                self.failed_count()
            )
            .unwrap();
            write_failures(&mut output, &self.failures);
        }

        output
    }
}

impl OutputFormatter for History {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({ "batches": self.list(None) })).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.is_empty() {
            return "No batches to undo\n".to_string();
        }

        let mut output = String::new();
        for batch in self.list(None) {
            let date = batch.created_at.split('.').next().unwrap_or(&batch.created_at);
            writeln!(
                output,
                "#{} {} ({} files) {}",
                batch.id,
                batch.label,
                batch.len(),
                date
            )
            .unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
