use crate::apply::{rename_path, RenameFailure};
use crate::history::{Batch, History};
use crate::log::OperationLog;
use serde::{Deserialize, Serialize};

/// Outcome of undoing one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoResult {
    /// History id of the batch that was undone
    pub batch_id: usize,
    pub label: String,
    pub reversed_count: usize,
    pub failures: Vec<RenameFailure>,
}

impl UndoResult {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Pairs of (current name, original name) an undo of `batch` would perform
pub fn undo_preview(batch: &Batch) -> Vec<(String, String)> {
    batch
        .entries
        .iter()
        .map(|entry| (entry.current_name(), entry.original_name().to_string()))
        .collect()
}

/// Pop the most recent batch and rename each entry back to its original name.
///
/// Every reversal is attempted even if earlier ones fail. The batch is gone
/// from `history` afterwards regardless of failures; a later call moves on to
/// the next batch down. Returns `None` when there is nothing to undo.
pub fn undo_last(history: &mut History, log: &mut OperationLog) -> Option<UndoResult> {
    let mut batch = history.pop()?;
    log.log(&format!(
        "Undoing batch #{} {} ({} entries)",
        batch.id,
        batch.label,
        batch.entries.len()
    ));

    let mut reversed_count = 0;
    let mut failures = Vec::new();

    for entry in &mut batch.entries {
        let from = entry.current_path().to_path_buf();
        let to = entry.original_path();

        match rename_path(&from, &to) {
            Ok(()) => {
                log.log(&format!("Restored {} -> {}", from.display(), to.display()));
                entry.set_current_path(to);
                reversed_count += 1;
            },
            Err(e) => {
                log.log(&format!(
                    "Failed to restore {} -> {}: {}",
                    from.display(),
                    to.display(),
                    e
                ));
                failures.push(RenameFailure {
                    from,
                    to,
                    reason: e.to_string(),
                });
            },
        }
    }

    log.log(&format!(
        "Undo finished: {} restored, {} failed",
        reversed_count,
        failures.len()
    ));

    Some(UndoResult {
        batch_id: batch.id,
        label: batch.label,
        reversed_count,
        failures,
    })
}
