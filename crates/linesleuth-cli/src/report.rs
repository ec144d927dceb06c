//! Report rendering — the per-language breakdown as a text table.
//!
//! Pure string building: everything here takes the immutable
//! [`ScanResult`] and returns a `String`, so it is trivially testable.

use linesleuth_core::model::count::format_count;
use linesleuth_core::model::ScanResult;
use std::time::Duration;

/// Width of the share bar, in characters, for the largest share.
const BAR_WIDTH: usize = 24;

/// Render the final breakdown: one row per language sorted by line
/// count descending (ties alphabetical), then a totals line.
pub fn render_text(result: &ScanResult, duration: Duration, error_count: u64) -> String {
    let mut rows: Vec<(&str, u64)> = result
        .language_lines
        .iter()
        .map(|(name, lines)| (name.as_str(), *lines))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let name_width = rows
        .iter()
        .map(|(name, _)| name.len())
        .chain(std::iter::once("Language".len()))
        .max()
        .unwrap_or(8);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>6}  {}\n",
        "Language", "Lines", "Share", "Distribution"
    ));

    for (name, lines) in &rows {
        let share = if result.total_lines > 0 {
            *lines as f64 / result.total_lines as f64 * 100.0
        } else {
            0.0
        };
        let bar = "█".repeat((share / 100.0 * BAR_WIDTH as f64).round() as usize);
        out.push_str(&format!(
            "{name:<name_width$}  {:>12}  {share:>5.1}%  {bar}\n",
            format_count(*lines)
        ));
    }

    out.push_str(&format!(
        "\n{} lines across {} files in {:.2?}",
        format_count(result.total_lines),
        format_count(result.file_count),
        duration
    ));
    if error_count > 0 {
        out.push_str(&format!(" ({error_count} unreadable entries skipped)"));
    }
    out.push('\n');
    out
}
