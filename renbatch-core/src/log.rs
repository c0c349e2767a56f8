use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append-only, timestamped log of rename activity.
///
/// A write failure disables the log after one warning on stderr; it never
/// fails the rename that was being logged.
#[derive(Debug, Default)]
pub struct OperationLog {
    file: Option<File>,
}

impl OperationLog {
    /// A log that discards everything
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Open (or create) the log file at `path` for appending
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        Ok(Self { file: Some(file) })
    }

    pub fn log(&mut self, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let written = writeln!(
            file,
            "[{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        )
        .and_then(|()| file.flush());

        if let Err(e) = written {
            eprintln!("Warning: disabling operation log after write failure: {}", e);
            self.file = None;
        }
    }
}
