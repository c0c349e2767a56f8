use crate::exclude::Exclusions;
use crate::extract::extract;
use crate::rule::RuleSelector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One file's transition through a rename.
///
/// `current_path` tracks the file's live location: it only changes after a
/// rename call on it has actually succeeded. `original_dir` never changes, so
/// an undo always restores into the directory the file was planned in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    original_name: String,
    original_dir: PathBuf,
    current_path: PathBuf,
    new_name: String,
}

impl RenameEntry {
    pub fn new(
        path: impl Into<PathBuf>,
        original_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        let current_path: PathBuf = path.into();
        Self {
            original_name: original_name.into(),
            original_dir: current_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            current_path,
            new_name: new_name.into(),
        }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Directory the file lived in when the plan was built
    pub fn original_dir(&self) -> &Path {
        &self.original_dir
    }

    /// File name at the entry's live location
    pub fn current_name(&self) -> String {
        self.current_path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }

    /// Where the entry lands when renamed to `new_name`
    pub fn target_path(&self) -> PathBuf {
        self.original_dir.join(&self.new_name)
    }

    /// Where the entry lands when restored to `original_name`
    pub fn original_path(&self) -> PathBuf {
        self.original_dir.join(&self.original_name)
    }

    pub(crate) fn set_current_path(&mut self, path: PathBuf) {
        self.current_path = path;
    }
}

/// Whether `name` names a single entry inside its parent directory
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}

/// Counters for files that did not make it into a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Regular files considered
    pub files_scanned: usize,
    /// Files skipped by the exclusion set
    pub excluded: usize,
    /// Files the rule found nothing in
    pub no_match: usize,
    /// Files whose computed name equals the current one
    pub unchanged: usize,
}

/// Ordered renames proposed for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub rule: RuleSelector,
    pub replacement: String,
    pub entries: Vec<RenameEntry>,
    pub stats: PlanStats,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Short description of the rule and replacement, used as a batch label
    pub fn label(&self) -> String {
        if self.rule.kind().takes_replacement() {
            format!("{} -> {:?}", self.rule, self.replacement)
        } else {
            self.rule.to_string()
        }
    }
}

/// Compute the new name for `original` given the substring the rule matched.
///
/// Returns `None` when the rename would be a no-op, or when the result is not
/// a plain file name (empty, `.`/`..`, or containing a path separator), since
/// that would move the file out of its directory.
pub fn compute_new_name(
    original: &str,
    matched: &str,
    rule: &RuleSelector,
    replacement: &str,
) -> Option<String> {
    if matched.is_empty() {
        return None;
    }

    let new_name = match rule {
        RuleSelector::YearPrefix => {
            let prefix = format!("[{}]", matched);
            if original.starts_with(&prefix) {
                return None;
            }
            format!("{}{}", prefix, original)
        },
        _ => original.replacen(matched, replacement, 1),
    };

    (new_name != original && is_plain_file_name(&new_name)).then_some(new_name)
}

/// Build a rename plan from a flat directory listing.
///
/// Entries that are not regular files are skipped, as are excluded names,
/// names the rule finds nothing in, and renames that would not change the
/// name. Plan order follows `files`. Returns `None` if nothing would be renamed.
pub fn build_plan<P: AsRef<Path>>(
    files: &[P],
    rule: &RuleSelector,
    replacement: &str,
    exclusions: &Exclusions,
) -> Option<RenamePlan> {
    let mut entries = Vec::new();
    let mut stats = PlanStats::default();

    for path in files {
        let path = path.as_ref();
        if !path.is_file() {
            continue;
        }
        stats.files_scanned += 1;

        let Some(original) = path.file_name().and_then(|name| name.to_str()) else {
            stats.no_match += 1;
            continue;
        };

        if exclusions.is_excluded(original) {
            stats.excluded += 1;
            continue;
        }

        let matched = match extract(original, rule) {
            Some(matched) if !matched.is_empty() => matched,
            _ => {
                stats.no_match += 1;
                continue;
            },
        };

        match compute_new_name(original, matched, rule, replacement) {
            Some(new_name) => entries.push(RenameEntry::new(path, original, new_name)),
            None => stats.unchanged += 1,
        }
    }

    if entries.is_empty() {
        return None;
    }

    Some(RenamePlan {
        rule: rule.clone(),
        replacement: replacement.to_string(),
        entries,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_year_prefix_new_name() {
        assert_eq!(
            compute_new_name("report2021final.txt", "2021", &RuleSelector::YearPrefix, ""),
            Some("[2021]report2021final.txt".to_string())
        );
        assert_eq!(
            compute_new_name("[2021]report2021final.txt", "2021", &RuleSelector::YearPrefix, ""),
            None
        );
        // The first year found is the bracketed one, so nothing changes
        assert_eq!(
            compute_new_name("[1999]trip2021.txt", "1999", &RuleSelector::YearPrefix, ""),
            None
        );
        assert_eq!(
            compute_new_name("(2021)trip.txt", "2021", &RuleSelector::YearPrefix, ""),
            Some("[2021](2021)trip.txt".to_string())
        );
    }

    #[test]
    fn test_replacement_only_touches_first_occurrence() {
        let rule = RuleSelector::PrefixChars { count: 2 };
        assert_eq!(
            compute_new_name("abab.txt", "ab", &rule, "X"),
            Some("Xab.txt".to_string())
        );
        assert_eq!(compute_new_name("ab", "ab", &rule, "X"), Some("X".to_string()));
    }

    #[test]
    fn test_after_marker_deletion() {
        let rule = RuleSelector::AfterMarker {
            marker: "_".to_string(),
        };
        assert_eq!(
            compute_new_name("photo_vacation.jpg", "vacation.jpg", &rule, ""),
            Some("photo_".to_string())
        );
    }

    #[test]
    fn test_identity_replacement_is_no_op() {
        let rule = RuleSelector::PrefixChars { count: 3 };
        assert_eq!(compute_new_name("abc.txt", "abc", &rule, "abc"), None);
        assert_eq!(compute_new_name("abc.txt", "", &rule, "zzz"), None);
    }

    #[test]
    fn test_names_leaving_the_directory_are_no_ops() {
        let rule = RuleSelector::BeforeMarker {
            marker: "_".to_string(),
        };
        assert_eq!(compute_new_name("a_b.txt", "a", &rule, "sub/new"), None);

        let prefix = RuleSelector::PrefixChars { count: 5 };
        assert_eq!(compute_new_name("ab", "ab", &prefix, ""), None);
        assert_eq!(compute_new_name("ab", "ab", &prefix, "."), None);
        assert_eq!(compute_new_name("ab", "ab", &prefix, ".."), None);
    }

    #[test]
    fn test_build_plan_counts_unusable_names_as_unchanged() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let short = touch(&dir, "ab");
        let long = touch(&dir, "abcdefg.txt");

        let plan = build_plan(
            &[short, long.clone()],
            &RuleSelector::PrefixChars { count: 5 },
            "",
            &Exclusions::default(),
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries[0].new_name(), "fg.txt");
        assert_eq!(plan.stats.unchanged, 1);

        let rule = RuleSelector::BeforeMarker {
            marker: "_".to_string(),
        };
        let file = touch(&dir, "a_b.txt");
        assert!(build_plan(&[file], &rule, "sub/new", &Exclusions::default()).is_none());
        assert!(!dir.path().join("sub").join("new_b.txt").exists());
    }

    #[test]
    fn test_build_plan_skips_directories_and_exclusions() {
        let dir = TempDir::new().unwrap();
        let report = touch(&dir, "report2021.txt");
        let tool = touch(&dir, "tool2021.exe");
        let notes = touch(&dir, "notes.txt");
        let subdir = dir.path().join("archive2020");
        fs::create_dir(&subdir).unwrap();

        let exclusions = Exclusions::new().with_suffix(".exe");
        let plan = build_plan(
            &[report.clone(), tool, notes, subdir],
            &RuleSelector::YearPrefix,
            "",
            &exclusions,
        )
        .unwrap();

        assert_eq!(plan.len(), 1);
        let entry = &plan.entries[0];
        assert_eq!(entry.original_name(), "report2021.txt");
        assert_eq!(entry.new_name(), "[2021]report2021.txt");
        assert_eq!(entry.current_path(), report.as_path());
        assert_eq!(plan.stats, PlanStats {
            files_scanned: 3,
            excluded: 1,
            no_match: 1,
            unchanged: 0,
        });
    }

    #[test]
    fn test_build_plan_preserves_listing_order() {
        let dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = ["c_1.txt", "a_2.txt", "b_3.txt"]
            .iter()
            .map(|name| touch(&dir, name))
            .collect();

        let rule = RuleSelector::BeforeMarker {
            marker: "_".to_string(),
        };
        let plan = build_plan(&files, &rule, "x", &Exclusions::default()).unwrap();
        let names: Vec<&str> = plan.entries.iter().map(RenameEntry::new_name).collect();
        assert_eq!(names, vec!["x_1.txt", "x_2.txt", "x_3.txt"]);
        assert_eq!(plan.label(), "before(\"_\") -> \"x\"");
    }

    #[test]
    fn test_build_plan_empty_listing() {
        let files: Vec<PathBuf> = Vec::new();
        assert!(build_plan(&files, &RuleSelector::YearPrefix, "", &Exclusions::default()).is_none());
    }

    #[test]
    fn test_build_plan_all_no_ops_is_empty() {
        let dir = TempDir::new().unwrap();
        let prefixed = touch(&dir, "[2020]trip2020.jpg");
        let zero = touch(&dir, "abc.txt");

        assert!(build_plan(
            &[prefixed],
            &RuleSelector::YearPrefix,
            "",
            &Exclusions::default()
        )
        .is_none());
        assert!(build_plan(
            &[zero],
            &RuleSelector::PrefixChars { count: 0 },
            "X",
            &Exclusions::default()
        )
        .is_none());
    }

    #[test]
    fn test_entry_paths() {
        let entry = RenameEntry::new("/tmp/dir/old.txt", "old.txt", "new.txt");
        assert_eq!(entry.current_name(), "old.txt");
        assert_eq!(entry.target_path(), PathBuf::from("/tmp/dir/new.txt"));
        assert_eq!(entry.original_path(), PathBuf::from("/tmp/dir/old.txt"));
        assert_eq!(entry.original_dir(), Path::new("/tmp/dir"));
    }

    #[test]
    fn test_original_path_ignores_later_moves() {
        let mut entry = RenameEntry::new("/tmp/dir/old.txt", "old.txt", "new.txt");
        entry.set_current_path(PathBuf::from("/tmp/elsewhere/new.txt"));
        assert_eq!(entry.original_path(), PathBuf::from("/tmp/dir/old.txt"));
        assert_eq!(entry.target_path(), PathBuf::from("/tmp/dir/new.txt"));
    }
}
