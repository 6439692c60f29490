//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use owo_colors::{OwoColorize, Stream};

/// Check results for a single template file.
pub struct FileReport {
    /// Path of the template.
    pub file: String,
    /// Number of control blocks found.
    pub blocks: usize,
    /// Disambiguation passes needed (the deepest nesting level).
    pub passes: usize,
    /// Parse error, if the template failed to check.
    pub error: Option<String>,
}

/// Format check results as an ASCII table.
pub fn format_check_table(reports: &[FileReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Blocks", "Depth", "Status"]);

    for report in reports {
        let status = match &report.error {
            None => "ok"
                .if_supports_color(Stream::Stdout, |s| s.green())
                .to_string(),
            Some(_) => "error"
                .if_supports_color(Stream::Stdout, |s| s.red())
                .to_string(),
        };
        table.add_row(vec![
            report.file.clone(),
            report.blocks.to_string(),
            report.passes.to_string(),
            status,
        ]);
    }

    table
}
