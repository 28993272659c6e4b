//! User-facing summary of a minification run.

use std::fmt::Write;

use fontslim_core::{GenerationOutcome, MinifyReport};

fn outcome_line(outcome: &GenerationOutcome) -> String {
    match &outcome.result {
        Ok(font) => format!(
            "  ✓ {:<5} {} ({:.1} KB)",
            outcome.format,
            outcome.path.display(),
            font.bytes as f64 / 1024.0
        ),
        Err(e) => format!("  ✗ {:<5} {} ({e:#})", outcome.format, outcome.path.display()),
    }
}

/// Renders the per-format indicators followed by the stylesheet rule.
pub fn render(report: &MinifyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subset: {}", report.subset.description());
    for outcome in &report.batch.outcomes {
        let _ = writeln!(out, "{}", outcome_line(outcome));
    }
    let _ = writeln!(
        out,
        "{} of {} format(s) written to {}",
        report.batch.succeeded(),
        report.batch.outcomes.len(),
        report.batch.output_dir.display()
    );
    out.push('\n');
    out.push_str(&report.css);
    out.push('\n');
    out
}
