use crate::history::History;
use crate::log::OperationLog;
use crate::plan::{RenameEntry, RenamePlan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single rename that the filesystem refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub from: PathBuf,
    pub to: PathBuf,
    pub reason: String,
}

/// Outcome of committing a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitResult {
    /// Entries renamed on disk, with `current_path` pointing at the new name
    pub succeeded: Vec<RenameEntry>,
    pub failures: Vec<RenameFailure>,
    /// History id of the recorded batch, if anything succeeded
    pub batch_id: Option<usize>,
}

impl CommitResult {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Apply every entry of `plan` in order.
///
/// A failed rename is recorded and skipped; it never aborts the rest of the
/// batch. The successful subset is pushed onto `history` as one batch.
pub fn commit_plan(
    plan: RenamePlan,
    history: &mut History,
    log: &mut OperationLog,
) -> CommitResult {
    let label = plan.label();
    log.log(&format!(
        "Committing plan {} ({} entries)",
        label,
        plan.entries.len()
    ));

    let mut result = CommitResult::default();

    for mut entry in plan.entries {
        let from = entry.current_path().to_path_buf();
        let to = entry.target_path();

        match rename_path(&from, &to) {
            Ok(()) => {
                log.log(&format!("Renamed {} -> {}", from.display(), to.display()));
                entry.set_current_path(to);
                result.succeeded.push(entry);
            },
            Err(e) => {
                log.log(&format!(
                    "Failed to rename {} -> {}: {}",
                    from.display(),
                    to.display(),
                    e
                ));
                result.failures.push(RenameFailure {
                    from,
                    to,
                    reason: e.to_string(),
                });
            },
        }
    }

    result.batch_id = history
        .push(label, result.succeeded.clone())
        .map(|batch| batch.id);

    log.log(&format!(
        "Commit finished: {} renamed, {} failed",
        result.succeeded_count(),
        result.failed_count()
    ));

    result
}

/// Rename `from` to `to` without ever replacing an existing file.
///
/// Case-only renames go through a temporary name so they also work on
/// case-insensitive filesystems.
pub(crate) fn rename_path(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }

    let case_only = is_case_only_change(from, to);
    if destination_taken(to, case_only)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }

    if case_only {
        let temp = from.with_file_name(format!(
            ".{}.{}.renbatch.tmp",
            from.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned()),
            std::process::id()
        ));
        fs::rename(from, &temp)?;
        if let Err(e) = fs::rename(&temp, to) {
            // Put the file back where it was before reporting
            let _ = fs::rename(&temp, from);
            return Err(e);
        }
        return Ok(());
    }

    fs::rename(from, to)
}

fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from.parent() == to.parent()
        && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

/// Whether some other file already occupies `to`.
///
/// For case-only changes `to` may resolve to the source itself on a
/// case-insensitive filesystem, so the directory listing is checked for the
/// exact name instead.
fn destination_taken(to: &Path, case_only: bool) -> io::Result<bool> {
    if !case_only {
        return Ok(to.symlink_metadata().is_ok());
    }

    let (Some(parent), Some(name)) = (to.parent(), to.file_name()) else {
        return Ok(false);
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    for entry in fs::read_dir(parent)? {
        if entry?.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::Exclusions;
    use crate::plan::build_plan;
    use crate::rule::RuleSelector;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_commit_renames_and_records_batch() {
        let dir = TempDir::new().unwrap();
        let file = touch(&dir, "report2021final.txt");

        let plan = build_plan(&[file.clone()], &RuleSelector::YearPrefix, "", &Exclusions::default())
            .unwrap();
        let mut history = History::new();
        let result = commit_plan(plan, &mut history, &mut OperationLog::disabled());

        assert_eq!(result.succeeded_count(), 1);
        assert_eq!(result.failed_count(), 0);
        assert_eq!(result.batch_id, Some(1));

        let renamed = dir.path().join("[2021]report2021final.txt");
        assert!(renamed.exists());
        assert!(!file.exists());
        assert_eq!(result.succeeded[0].current_path(), renamed.as_path());
        assert_eq!(history.peek().unwrap().entries, result.succeeded);
    }

    #[test]
    fn test_collision_is_counted_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let source = touch(&dir, "a_1.txt");
        let existing = touch(&dir, "b_1.txt");
        let other = touch(&dir, "c_2.txt");

        let rule = RuleSelector::BeforeMarker {
            marker: "_".to_string(),
        };
        let plan = build_plan(&[source.clone(), other], &rule, "b", &Exclusions::default()).unwrap();

        let mut history = History::new();
        let result = commit_plan(plan, &mut history, &mut OperationLog::disabled());

        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.succeeded_count(), 1);
        assert_eq!(result.failures[0].from, source);
        // The colliding file keeps its content and the source stays put
        assert_eq!(fs::read_to_string(&existing).unwrap(), "b_1.txt");
        assert!(source.exists());
        assert!(dir.path().join("b_2.txt").exists());
        assert_eq!(history.peek().unwrap().len(), 1);
    }

    #[test]
    fn test_all_failures_record_nothing() {
        let dir = TempDir::new().unwrap();
        let file = touch(&dir, "photo_1.jpg");

        let rule = RuleSelector::AfterMarker {
            marker: "_".to_string(),
        };
        let plan = build_plan(&[file.clone()], &rule, "2.jpg", &Exclusions::default()).unwrap();
        // The file disappears between preview and commit
        fs::remove_file(&file).unwrap();

        let mut history = History::new();
        let result = commit_plan(plan, &mut history, &mut OperationLog::disabled());

        assert_eq!(result.succeeded_count(), 0);
        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.batch_id, None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_case_only_rename() {
        let dir = TempDir::new().unwrap();
        let from = touch(&dir, "photo.JPG");
        let to = dir.path().join("photo.jpg");

        rename_path(&from, &to).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn test_rename_refuses_existing_destination() {
        let dir = TempDir::new().unwrap();
        let from = touch(&dir, "one.txt");
        let to = touch(&dir, "two.txt");

        let err = rename_path(&from, &to).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(from.exists());
    }

    #[test]
    fn test_commit_writes_log() {
        let dir = TempDir::new().unwrap();
        let file = touch(&dir, "scan1999.png");
        let log_path = dir.path().join("logs").join("ops.log");

        let plan = build_plan(&[file], &RuleSelector::YearPrefix, "", &Exclusions::default()).unwrap();
        let mut log = OperationLog::open(&log_path).unwrap();
        commit_plan(plan, &mut History::new(), &mut log);

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Committing plan year (1 entries)"));
        assert!(content.contains("[1999]scan1999.png"));
        assert!(content.contains("Commit finished: 1 renamed, 0 failed"));
    }
}
