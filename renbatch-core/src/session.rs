use crate::apply::{commit_plan, CommitResult};
use crate::exclude::Exclusions;
use crate::history::{Batch, History};
use crate::listing::list_directory;
use crate::log::OperationLog;
use crate::plan::{build_plan, RenamePlan};
use crate::rule::RuleSelector;
use crate::undo::{undo_last, UndoResult};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Settings a shell hands to a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub exclusions: Exclusions,
    /// Keep at most this many batches for undo
    pub max_batches: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// Rename engine state for one interactive session.
///
/// Owns the undo history; it lives in memory only and is gone when the
/// session is dropped.
#[derive(Debug)]
pub struct Session {
    history: History,
    exclusions: Exclusions,
    log: OperationLog,
}

impl Session {
    pub fn new(options: SessionOptions) -> Result<Self> {
        let log = match &options.log_file {
            Some(path) => OperationLog::open(path)?,
            None => OperationLog::disabled(),
        };

        Ok(Self {
            history: History::with_limit(options.max_batches),
            exclusions: options.exclusions,
            log,
        })
    }

    /// Plan renames over an already listed set of files.
    /// `None` means nothing would change.
    pub fn build_plan<P: AsRef<Path>>(
        &mut self,
        files: &[P],
        rule: &RuleSelector,
        replacement: &str,
    ) -> Option<RenamePlan> {
        let plan = build_plan(files, rule, replacement, &self.exclusions);
        match &plan {
            Some(plan) => self.log.log(&format!(
                "Planned {} renames with {} ({} scanned, {} excluded, {} without match, {} unchanged)",
                plan.len(),
                plan.label(),
                plan.stats.files_scanned,
                plan.stats.excluded,
                plan.stats.no_match,
                plan.stats.unchanged
            )),
            None => self
                .log
                .log(&format!("No files matched {} over {} entries", rule, files.len())),
        }
        plan
    }

    /// List `dir` and plan renames over its regular files
    pub fn plan_directory(
        &mut self,
        dir: &Path,
        rule: &RuleSelector,
        replacement: &str,
    ) -> Result<Option<RenamePlan>> {
        let files = list_directory(dir)?;
        Ok(self.build_plan(&files, rule, replacement))
    }

    pub fn commit(&mut self, plan: RenamePlan) -> CommitResult {
        commit_plan(plan, &mut self.history, &mut self.log)
    }

    /// The batch the next undo would reverse
    pub fn peek_last_batch(&self) -> Option<&Batch> {
        self.history.peek()
    }

    pub fn undo(&mut self) -> Option<UndoResult> {
        let result = undo_last(&mut self.history, &mut self.log);
        if result.is_none() {
            self.log.log("Undo requested with empty history");
        }
        result
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
