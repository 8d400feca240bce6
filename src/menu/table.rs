// Two-column info table. Shares the menus' column-alignment concern but is
// purely a formatting utility: no input handling, no state.

use std::io::{self, Write};

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

/// One row of the table: a field label and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

impl InfoRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Render `rows` as an aligned table with a header and separator row.
///
/// The label column is padded to the widest label by display width; values
/// are printed as-is (they may carry color escapes, and the value column is
/// last so alignment does not depend on their width).
pub fn info_table(rows: &[InfoRow], out: &mut impl Write) -> Result<()> {
    let label_width = rows
        .iter()
        .map(|r| r.label.width())
        .chain(["Field".width()])
        .max()
        .unwrap_or(0);

    writeln!(out)?;
    writeln!(out, "{}  Value", pad("Field", label_width))?;
    writeln!(out, "{}  {}", "-".repeat(label_width), "-".repeat(13))?;
    for row in rows {
        writeln!(out, "{}  {}", pad(&row.label, label_width), row.value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Convenience form writing to standard output.
pub fn display_info_table(rows: &[InfoRow]) -> Result<()> {
    let stdout = io::stdout();
    info_table(rows, &mut stdout.lock())
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
