use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use renbatch_core::{OutputFormatter, Preview, RuleParams, Session, SessionOptions, VersionResult};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

mod cli;
mod config;
mod rename;
mod shell;

use cli::{Cli, Commands, OutputFormat};
use config::Config;
use shell::{resolve_working_dir, Shell, ShellOptions};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };
    let preview = cli.preview.map_or_else(
        || Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table),
        Into::into,
    );

    match cli.command {
        Some(Commands::Version { output }) => handle_version(output),

        Some(Commands::Completions { shell, out_dir }) => {
            let mut cmd = Cli::command();
            match out_dir {
                Some(dir) => generate_completions(shell, &mut cmd, "renbatch", &dir),
                None => {
                    clap_complete::generate(shell, &mut cmd, "renbatch", &mut io::stdout());
                    Ok(())
                },
            }
        },

        Some(Commands::Rename {
            rule,
            count,
            pos,
            marker,
            replacement,
            dry_run,
            output,
            path,
        }) => {
            let dir = working_dir(path.or(cli.path).as_deref())?;
            let mut session = Session::new(session_options(&config))?;
            rename::handle_rename(
                &mut session,
                &dir,
                rule.into(),
                RuleParams { marker, count, pos },
                &replacement,
                preview,
                use_color,
                dry_run,
                cli.yes,
                output,
                &mut io::stdin().lock(),
            )
        },

        None => {
            let dir = match cli.path.as_deref() {
                Some(path) => working_dir(Some(path)).unwrap_or_else(|e| {
                    eprintln!("Warning: {e:#}; using the current directory");
                    current_dir_or_dot()
                }),
                None => current_dir_or_dot(),
            };

            let session = Session::new(session_options(&config))?;
            let options = ShellOptions {
                preview,
                use_color,
                assume_yes: cli.yes,
            };
            let stdin = io::stdin();
            let mut shell = Shell::new(stdin.lock(), io::stdout(), session, dir, options);
            shell.run()
        },
    }
}

/// Session settings from the config, with this executable itself excluded
fn session_options(config: &Config) -> SessionOptions {
    let mut options = config.session_options();
    if let Some(name) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|name| name.to_string_lossy().into_owned()))
    {
        options.exclusions.add_name(name);
    }
    options
}

fn working_dir(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => resolve_working_dir(path)
            .ok_or_else(|| anyhow!("Path does not exist: {}", path.display())),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

fn current_dir_or_dot() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renbatch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;
    use tempfile::TempDir;

    #[test]
    fn test_generate_completions_bash() {
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = Cli::command();

        let result = generate_completions(Shell::Bash, &mut cmd, "renbatch", temp_dir.path());

        assert!(result.is_ok());

        let completion_file = temp_dir.path().join("renbatch.bash");
        assert!(completion_file.exists());

        let content = std::fs::read_to_string(completion_file).unwrap();
        assert!(content.contains("complete"));
        assert!(content.contains("renbatch"));
    }

    #[test]
    fn test_generate_completions_zsh() {
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = Cli::command();

        let result = generate_completions(Shell::Zsh, &mut cmd, "renbatch", temp_dir.path());

        assert!(result.is_ok());

        let completion_file = temp_dir.path().join("_renbatch");
        assert!(completion_file.exists());

        let content = std::fs::read_to_string(completion_file).unwrap();
        assert!(content.contains("#compdef"));
        assert!(content.contains("renbatch"));
    }

    #[test]
    fn test_generate_completions_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir");
        let mut cmd = Cli::command();

        assert!(!nested_path.exists());

        let result = generate_completions(Shell::Bash, &mut cmd, "renbatch", &nested_path);

        assert!(result.is_ok());
        assert!(nested_path.join("renbatch.bash").exists());
    }

    #[test]
    fn test_working_dir_resolves_files_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        std::fs::write(&file, "").unwrap();

        assert_eq!(working_dir(Some(file.as_path())).unwrap(), temp_dir.path());
        let err = working_dir(Some(temp_dir.path().join("missing").as_path())).unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }

    #[test]
    fn test_session_options_exclude_own_executable() {
        let options = session_options(&Config::default());
        let exe = std::env::current_exe().unwrap();
        let name = exe.file_name().unwrap().to_string_lossy();
        assert!(options.exclusions.is_excluded(&name));
        assert!(options.exclusions.is_excluded("installer.exe"));
        assert_eq!(options.max_batches, Some(50));
    }
}
