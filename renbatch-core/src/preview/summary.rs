use super::{PreviewKind, PreviewRow};
use nu_ansi_term::Color as AnsiColor;
use std::fmt::Write;

/// Render preview rows as plain `from  ->  to` lines
pub fn render_summary(kind: PreviewKind, rows: &[PreviewRow], use_color: bool) -> String {
    let mut output = String::new();

    let title = match kind {
        PreviewKind::Rename => "[RENAME PREVIEW]",
        PreviewKind::Undo => "[UNDO PREVIEW]",
    };
    if use_color {
        writeln!(output, "{}", AnsiColor::Cyan.bold().paint(title)).unwrap();
    } else {
        writeln!(output, "{}", title).unwrap();
    }

    for row in rows {
        if use_color {
            writeln!(
                output,
                "{}  {}  {}",
                AnsiColor::Red.paint(row.from.as_str()),
                AnsiColor::DarkGray.paint("->"),
                AnsiColor::Green.paint(row.to.as_str())
            )
            .unwrap();
        } else {
            writeln!(output, "{}  ->  {}", row.from, row.to).unwrap();
        }
    }

    writeln!(output, "Files: {}", rows.len()).unwrap();
    output
}
