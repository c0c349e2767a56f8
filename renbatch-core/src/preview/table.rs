use super::{PreviewKind, PreviewRow};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render preview rows as a table
pub fn render_table(kind: PreviewKind, rows: &[PreviewRow], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
    }

    let (from_header, to_header) = match kind {
        PreviewKind::Rename => ("Current name", "New name"),
        PreviewKind::Undo => ("Current name", "Restored name"),
    };

    if use_color {
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new(from_header).fg(Color::Cyan),
            Cell::new(to_header).fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", from_header, to_header]);
    }

    for (i, row) in rows.iter().enumerate() {
        let index = (i + 1).to_string();
        if use_color {
            table.add_row(vec![
                Cell::new(index).fg(Color::DarkGrey),
                Cell::new(&row.from),
                Cell::new(format!("→ {}", row.to)).fg(Color::Green),
            ]);
        } else {
            table.add_row(vec![index, row.from.clone(), format!("→ {}", row.to)]);
        }
    }

    let total = format!("{} files", rows.len());
    if use_color {
        table.add_row(vec![
            Cell::new("─").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("").fg(Color::Cyan),
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(total).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["─", "─────────", "─────────"]);
        table.add_row(vec!["", "TOTALS", total.as_str()]);
    }

    format!("{}\n", table)
}
