use anyhow::Result;
use renbatch_core::{
    parse_integer, render_plan, render_undo, OutputFormatter, Preview, RuleKind, RuleParams,
    RuleSelector, Session,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const RULE_SEPARATOR: &str = "========================================";
const SECTION_SEPARATOR: &str = "----------------------------------------";

/// How the shell shows previews and asks for confirmation
#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub preview: Preview,
    pub use_color: Option<bool>,
    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    Quit,
    Undo,
    History,
    ChangeDir,
    Rule(RuleKind),
    OutOfRange,
    Invalid,
}

fn parse_command(input: &str) -> MenuCommand {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "q" | "quit" | "exit" => MenuCommand::Quit,
        "u" | "undo" => MenuCommand::Undo,
        "h" | "history" => MenuCommand::History,
        _ => match input.parse::<i64>() {
            Ok(0) => MenuCommand::ChangeDir,
            Ok(choice) => u8::try_from(choice)
                .ok()
                .and_then(RuleKind::from_menu_choice)
                .map_or(MenuCommand::OutOfRange, MenuCommand::Rule),
            Err(_) => MenuCommand::Invalid,
        },
    }
}

/// Strip surrounding whitespace and the quotes file managers add to dragged paths
pub fn normalize_path(input: &str) -> &str {
    let trimmed = input.trim();
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(trimmed);
    unquoted.trim()
}

/// Directory to work in for `path`: a directory is used as is, a file means
/// its parent. `None` if the path does not exist.
pub fn resolve_working_dir(path: &Path) -> Option<PathBuf> {
    let dir = if path.is_dir() {
        path.to_path_buf()
    } else if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        return None;
    };
    Some(std::path::absolute(&dir).unwrap_or(dir))
}

/// Interactive menu loop over one working directory
pub struct Shell<R, W> {
    input: R,
    output: W,
    session: Session,
    dir: PathBuf,
    options: ShellOptions,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        input: R,
        output: W,
        session: Session,
        dir: PathBuf,
        options: ShellOptions,
    ) -> Self {
        Self {
            input,
            output,
            session,
            dir,
            options,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            match parse_command(&line) {
                MenuCommand::Quit => break,
                MenuCommand::Undo => self.undo()?,
                MenuCommand::History => {
                    write!(self.output, "{}", self.session.history().format_summary())?;
                },
                MenuCommand::ChangeDir => self.change_dir()?,
                MenuCommand::Rule(kind) => self.rename(kind)?,
                MenuCommand::OutOfRange => {
                    writeln!(self.output, "Please enter a number between 0 and 8.")?;
                },
                MenuCommand::Invalid => writeln!(self.output, "Invalid input.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", RULE_SEPARATOR)?;
        writeln!(self.output, "  renbatch - working directory: {}", self.dir.display())?;
        writeln!(self.output, "{}", RULE_SEPARATOR)?;
        writeln!(self.output, "0. Change working directory")?;
        for kind in RuleKind::ALL {
            writeln!(self.output, "{}. {}", kind.menu_choice(), kind.description())?;
        }
        writeln!(self.output, "{}", SECTION_SEPARATOR)?;
        writeln!(self.output, "u. Undo the last batch")?;
        writeln!(self.output, "h. Show batches that can be undone")?;
        writeln!(self.output, "q. Quit")?;
        write!(self.output, "Select a mode: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Next input line without its line ending, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.options.assume_yes {
            writeln!(self.output, "{}y", question)?;
            return Ok(true);
        }
        Ok(self
            .prompt(question)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    fn read_integer(&mut self, label: &str, param: &'static str) -> Result<Option<i64>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match parse_integer(param, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                writeln!(self.output, "Invalid parameter: {}", e)?;
                Ok(None)
            },
        }
    }

    /// Ask for the parameters `kind` needs. `None` if input was cancelled or invalid.
    fn read_rule(&mut self, kind: RuleKind) -> Result<Option<RuleSelector>> {
        let mut params = RuleParams::default();

        if kind.needs_marker() {
            let Some(marker) = self.prompt("Marker X: ")? else {
                return Ok(None);
            };
            params.marker = Some(marker);
        }
        if kind.needs_count() {
            let Some(count) = self.read_integer("Count N: ", "count")? else {
                return Ok(None);
            };
            params.count = Some(count);
        }
        if kind.needs_pos() {
            let Some(pos) = self.read_integer("Start position P: ", "position")? else {
                return Ok(None);
            };
            params.pos = Some(pos);
        }

        match RuleSelector::build(kind, params) {
            Ok(rule) => Ok(Some(rule)),
            Err(e) => {
                writeln!(self.output, "Invalid parameter: {}", e)?;
                Ok(None)
            },
        }
    }

    fn rename(&mut self, kind: RuleKind) -> Result<()> {
        let Some(rule) = self.read_rule(kind)? else {
            return Ok(());
        };

        let replacement = if kind.takes_replacement() {
            match self.prompt("Replace the matched text with (empty to delete): ")? {
                Some(replacement) => replacement,
                None => return Ok(()),
            }
        } else {
            String::new()
        };

        let plan = match self.session.plan_directory(&self.dir, &rule, &replacement) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                writeln!(self.output, "No file names match this rule.")?;
                return Ok(());
            },
            Err(e) => {
                writeln!(self.output, "Error: {e:#}")?;
                return Ok(());
            },
        };

        let preview = render_plan(&plan, self.options.preview, self.options.use_color);
        write!(self.output, "{}", preview)?;

        if !self.confirm("Apply these renames? (y/n): ")? {
            writeln!(self.output, "Operation cancelled.")?;
            return Ok(());
        }

        let result = self.session.commit(plan);
        write!(self.output, "{}", result.format_summary())?;
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        let Some(batch) = self.session.peek_last_batch() else {
            writeln!(self.output, "Nothing to undo.")?;
            return Ok(());
        };
        let preview = render_undo(batch, self.options.preview, self.options.use_color);
        write!(self.output, "{}", preview)?;

        if !self.confirm("Undo these renames? (y/n): ")? {
            writeln!(self.output, "Undo cancelled.")?;
            return Ok(());
        }

        if let Some(result) = self.session.undo() {
            write!(self.output, "{}", result.format_summary())?;
        }
        Ok(())
    }

    fn change_dir(&mut self) -> Result<()> {
        let input = self
            .prompt("Directory or file path (drag and drop works): ")?
            .unwrap_or_default();
        let path = normalize_path(&input);
        if path.is_empty() {
            writeln!(self.output, "Operation cancelled.")?;
            return Ok(());
        }

        match resolve_working_dir(Path::new(path)) {
            Some(dir) => {
                writeln!(self.output, "Switched to {}", dir.display())?;
                self.dir = dir;
            },
            None => writeln!(self.output, "Path does not exist: {}", path)?,
        }
        Ok(())
    }
}
