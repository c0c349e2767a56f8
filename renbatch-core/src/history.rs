use crate::plan::RenameEntry;
use serde::{Deserialize, Serialize};

/// Renames that succeeded together in one commit, undone as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Sequence number within the session, starting at 1
    pub id: usize,
    /// Timestamp when the batch was committed
    pub created_at: String,
    /// Rule and replacement the batch was built from
    pub label: String,
    pub entries: Vec<RenameEntry>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory stack of committed batches, newest last
#[derive(Debug, Default)]
pub struct History {
    batches: Vec<Batch>,
    max_batches: Option<usize>,
    next_id: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that drops its oldest batch once it holds more than `max_batches`
    pub fn with_limit(max_batches: Option<usize>) -> Self {
        Self {
            max_batches,
            ..Self::default()
        }
    }

    /// Record a committed batch. Empty batches are never recorded.
    pub fn push(
        &mut self,
        label: impl Into<String>,
        entries: Vec<RenameEntry>,
    ) -> Option<&Batch> {
        if entries.is_empty() {
            return None;
        }

        self.next_id += 1;
        self.batches.push(Batch {
            id: self.next_id,
            created_at: chrono::Local::now().to_rfc3339(),
            label: label.into(),
            entries,
        });
        self.prune();
        self.batches.last()
    }

    /// The most recent batch, left on the stack
    pub fn peek(&self) -> Option<&Batch> {
        self.batches.last()
    }

    /// Remove and return the most recent batch
    pub fn pop(&mut self) -> Option<Batch> {
        self.batches.pop()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn max_batches(&self) -> Option<usize> {
        self.max_batches
    }

    /// Batches newest first, optionally limited to the most recent N
    pub fn list(&self, limit: Option<usize>) -> Vec<&Batch> {
        let batches = self.batches.iter().rev();
        match limit {
            Some(limit) => batches.take(limit).collect(),
            None => batches.collect(),
        }
    }

    fn prune(&mut self) {
        if let Some(max) = self.max_batches {
            if self.batches.len() > max {
                let to_remove = self.batches.len() - max;
                self.batches.drain(0..to_remove);
            }
        }
    }
}
