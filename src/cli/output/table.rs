//! Table output formatting for CLI commands
//!
//! Suggested fixes, loop iterations and Render owners, rendered with comfy-table.

use crate::domain::models::{FixKind, IterationRecord, SuggestedFix};
use crate::domain::ports::Owner;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format suggested fixes, one row per file
    pub fn format_fixes(&self, fixes: &[SuggestedFix]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["File", "Change", "Description", "Lines"]));

        for fix in fixes {
            let kind = if self.use_colors {
                Cell::new(fix.kind.to_string()).fg(kind_color(fix.kind))
            } else {
                Cell::new(fix.kind.to_string())
            };
            table.add_row(vec![
                Cell::new(&fix.file_name),
                kind,
                Cell::new(&fix.description),
                Cell::new(fix.suggested_code.lines().count()),
            ]);
        }

        table.to_string()
    }

    /// Format the per-iteration loop history
    pub fn format_iterations(&self, iterations: &[IterationRecord]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "Files sent", "Prompt bytes", "Omitted", "Fixes", "Changed"]));

        for record in iterations {
            let changed = record.files_changed.len();
            let changed = if self.use_colors && changed > 0 {
                Cell::new(changed).fg(Color::Cyan)
            } else {
                Cell::new(changed)
            };
            table.add_row(vec![
                Cell::new(record.iteration + 1),
                Cell::new(record.files_sent),
                Cell::new(record.prompt_size),
                Cell::new(record.files_omitted),
                Cell::new(record.fixes_proposed),
                changed,
            ]);
        }

        table.to_string()
    }

    /// Format Render owners (users and teams)
    pub fn format_owners(&self, owners: &[Owner]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Name", "Type", "Email"]));

        for owner in owners {
            table.add_row(vec![
                Cell::new(&owner.id),
                Cell::new(&owner.name),
                Cell::new(owner.kind.as_deref().unwrap_or("-")),
                Cell::new(owner.email.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

const fn kind_color(kind: FixKind) -> Color {
    match kind {
        FixKind::Added => Color::Green,
        FixKind::Modified => Color::Yellow,
    }
}
