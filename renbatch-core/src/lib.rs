#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod exclude;
pub mod extract;
pub mod history;
pub mod listing;
pub mod log;
pub mod output;
pub mod plan;
pub mod preview;
pub mod rule;
pub mod session;
pub mod undo;

pub use apply::{commit_plan, CommitResult, RenameFailure};
pub use exclude::Exclusions;
pub use extract::extract;
pub use history::{Batch, History};
pub use listing::list_directory;
pub use log::OperationLog;
pub use output::{OutputFormat, OutputFormatter, VersionResult};
pub use plan::{build_plan, compute_new_name, PlanStats, RenameEntry, RenamePlan};
pub use preview::{render_plan, render_undo, Preview};
pub use rule::{parse_integer, RuleError, RuleKind, RuleParams, RuleSelector};
pub use session::{Session, SessionOptions};
pub use undo::{undo_last, undo_preview, UndoResult};
