//! Output formatting utilities

use crate::application::Stats;
use crate::domain::Value;
use std::path::Path;

/// Format database statistics for display.
pub fn format_stats(stats: &Stats, database: &Path) -> String {
    let mut output = String::new();

    output.push_str("DATABASE\n\n");
    output.push_str(&format!("  Path: {}\n\n", database.display()));

    output.push_str("COUNTS\n\n");
    output.push_str(&format!("  Tags:     {}\n", stats.tags));
    output.push_str(&format!("  Values:   {}\n", stats.values));
    output.push_str(&format!("  Files:    {}\n", stats.files));
    output.push_str(&format!("  Taggings: {}\n\n", stats.taggings));

    output.push_str("AVERAGES\n\n");
    output.push_str(&format!("  Tags per file: {:.2}\n", stats.tags_per_file));
    output.push_str(&format!("  Files per tag: {:.2}\n", stats.files_per_tag));

    if let Some(usage) = &stats.usage {
        output.push_str("\nTAG USAGE\n\n");
        if usage.is_empty() {
            output.push_str("  No tags found\n");
        }
        let width = usage.iter().map(|u| u.name.chars().count()).max().unwrap_or(0);
        for entry in usage {
            output.push_str(&format!(
                "  {:<width$}  {}\n",
                entry.name,
                entry.file_count,
                width = width
            ));
        }
    }

    output
}

/// Format a list of values for display
pub fn format_value_list(values: &[Value]) -> String {
    if values.is_empty() {
        return "No values found".to_string();
    }

    let mut output = String::new();
    for value in values {
        output.push_str(&value.name);
        output.push('\n');
    }
    output
}
