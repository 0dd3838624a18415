use std::io::Write;

use owo_colors::OwoColorize;

use bildex_core::RunStats;
use bildex_reporting::RunSummary;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the per-document result line after one PDF was processed.
pub fn print_document_result(
    w: &mut dyn Write,
    name: &str,
    stats: &RunStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(
        w,
        "{}: {} article(s) from {} page(s)",
        name, stats.emitted, stats.pages_total
    )?;

    let suppressed = stats.suppressed_short_abstract + stats.suppressed_duplicate_title;
    if suppressed > 0 || stats.page_failures > 0 {
        let detail = format!(
            "(suppressed: {} short-abstract, {} duplicate-title; {} unreadable page(s))",
            stats.suppressed_short_abstract, stats.suppressed_duplicate_title, stats.page_failures
        );
        if color.enabled() {
            writeln!(w, "{}", detail.dimmed())?;
        } else {
            writeln!(w, "{}", detail)?;
        }
    }
    Ok(())
}

/// Print a document that could not be opened; the batch moves on.
pub fn print_document_error(
    w: &mut dyn Write,
    name: &str,
    error: &dyn std::fmt::Display,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("SKIPPED {}: {}", name, error);
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Print the run summary table.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &RunSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Summary".bold())?;
    } else {
        writeln!(w, "Summary")?;
    }
    writeln!(w, "{}", summary)
}
