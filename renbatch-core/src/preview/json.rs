use super::{PreviewKind, PreviewRow};
use serde_json::json;

/// Render preview rows as JSON, newline terminated like the other formats
pub fn render_json(kind: PreviewKind, rows: &[PreviewRow]) -> String {
    let mut output = serde_json::to_string_pretty(&json!({
        "operation": kind,
        "entries": rows,
    }))
    .unwrap_or_else(|_| "null".to_string());
    output.push('\n');
    output
}
