//! Table formatting for CLI output.
//!
//! Attached to a terminal the table is laid out with aligned columns and a
//! header row. Piped output is one tab-separated line per row with no header,
//! so scripts can `cut -f` it.

use comfy_table::{Cell, ContentArrangement, Table as ComfyTable};

use crate::iostreams::IOStreams;

/// Placeholder shown for an absent or zero-valued cell.
pub const EMPTY_CELL: &str = " - ";

/// Table printer that adapts output based on TTY/non-TTY mode.
#[derive(Debug)]
pub struct TablePrinter {
    is_tty: bool,
    width: usize,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Create a new table printer.
    pub fn new(ios: &IOStreams) -> Self {
        Self {
            is_tty: ios.is_stdout_tty(),
            width: ios.terminal_width(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set table headers. Headers only appear in TTY output.
    #[must_use]
    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|h| h.to_uppercase()).collect();
        self
    }

    /// Add a row of values.
    pub fn add_row(&mut self, fields: Vec<String>) {
        self.rows.push(fields);
    }

    /// Render the table to a string.
    pub fn render(&self) -> String {
        if self.is_tty {
            self.render_tty()
        } else {
            self.render_plain()
        }
    }

    fn render_tty(&self) -> String {
        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(u16::try_from(self.width).unwrap_or(u16::MAX));

        if !self.headers.is_empty() {
            table.set_header(self.headers.iter().map(Cell::new));
        }
        for row in &self.rows {
            table.add_row(row.iter().map(Cell::new));
        }

        table.to_string()
    }

    fn render_plain(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Return `value`, or [`EMPTY_CELL`] when it is empty.
pub fn or_empty(value: &str) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_render_plain_tab_separated_without_headers() {
        let (ios, _) = IOStreams::test_with_output();
        let mut tp = TablePrinter::new(&ios).with_headers(&["Number", "Title"]);
        tp.add_row(vec!["1".into(), "Roadmap".into()]);
        tp.add_row(vec!["2".into(), "Backlog".into()]);

        assert_eq!(tp.render(), "1\tRoadmap\n2\tBacklog");
    }

    #[test]
    fn test_should_render_tty_with_uppercased_headers() {
        let (mut ios, _) = IOStreams::test_with_output();
        ios.set_stdout_tty(true);
        let mut tp = TablePrinter::new(&ios).with_headers(&["Name", "Data type", "ID"]);
        tp.add_row(vec!["Status".into(), "ProjectV2SingleSelectField".into(), "F_1".into()]);

        let output = tp.render();
        assert!(output.contains("NAME"));
        assert!(output.contains("DATA TYPE"));
        assert!(output.contains("ProjectV2SingleSelectField"));
        assert!(!output.contains('\t'));
    }

    #[test]
    fn test_should_track_row_count() {
        let (ios, _) = IOStreams::test_with_output();
        let mut tp = TablePrinter::new(&ios);
        assert!(tp.is_empty());
        tp.add_row(vec!["a".into()]);
        assert_eq!(tp.len(), 1);
        assert!(tp.render_plain() == "a");
    }

    #[test]
    fn test_should_substitute_placeholder_for_empty_values() {
        assert_eq!(or_empty(""), " - ");
        assert_eq!(or_empty("cli/cli"), "cli/cli");
    }
}
