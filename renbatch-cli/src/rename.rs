use anyhow::{anyhow, Result};
use renbatch_core::{
    render_plan, CommitResult, OutputFormatter, Preview, RuleKind, RuleParams, RuleSelector,
    Session,
};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::OutputFormat;

/// Plan one rule over `dir`, show the preview, confirm and commit
#[allow(clippy::too_many_arguments)]
pub fn handle_rename<R: BufRead>(
    session: &mut Session,
    dir: &Path,
    kind: RuleKind,
    params: RuleParams,
    replacement: &str,
    preview: Preview,
    use_color: Option<bool>,
    dry_run: bool,
    yes: bool,
    output: OutputFormat,
    confirm_input: &mut R,
) -> Result<()> {
    let rule = RuleSelector::build(kind, params)?;
    let replacement = if kind.takes_replacement() {
        replacement
    } else {
        ""
    };

    let Some(plan) = session.plan_directory(dir, &rule, replacement)? else {
        match output {
            OutputFormat::Json => println!("{}", CommitResult::default().format_json()),
            OutputFormat::Summary => println!("No file names match {}", rule),
        }
        return Ok(());
    };

    // JSON output only carries a preview when nothing will be renamed
    match output {
        OutputFormat::Summary => print!("{}", render_plan(&plan, preview, use_color)),
        OutputFormat::Json if dry_run => print!("{}", render_plan(&plan, Preview::Json, None)),
        OutputFormat::Json => {},
    }

    if dry_run {
        return Ok(());
    }

    if !yes {
        eprint!("Apply these renames? [y/N]: ");
        io::stderr().flush()?;

        let mut response = String::new();
        confirm_input.read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            eprintln!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = session.commit(plan);
    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    if result.failed_count() > 0 {
        return Err(anyhow!(
            "{} of {} renames failed",
            result.failed_count(),
            result.failed_count() + result.succeeded_count()
        ));
    }
    Ok(())
}
