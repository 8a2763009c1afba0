use std::fmt::Write;

use crate::models::{Aspect, NormalizedResult};
use crate::severity::summarize_latest;
use crate::trend::compare_latest;

/// Markdown summary of one subject's newest-first history.
pub fn build_report(subject: Option<&str>, results: &[NormalizedResult]) -> String {
    let mut output = String::new();
    let subject_label = subject
        .map(str::to_string)
        .or_else(|| {
            results
                .first()
                .map(|latest| format!("{} ({})", latest.nama, latest.nim))
        })
        .unwrap_or_else(|| "all subjects".to_string());

    let _ = writeln!(output, "# DASS-21 Test History");
    let _ = writeln!(
        output,
        "Generated for {} ({} tests recorded)",
        subject_label,
        results.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Latest Result");

    match results.first() {
        None => {
            let _ = writeln!(output, "No tests recorded.");
        }
        Some(latest) => {
            let _ = writeln!(
                output,
                "Test #{} on {} (total score {})",
                latest.test_number, latest.tanggal_tes, latest.total
            );
            for summary in summarize_latest(results) {
                let _ = writeln!(
                    output,
                    "- {}: {} ({}, {})",
                    summary.aspect.label(),
                    summary.score,
                    summary.severity.level,
                    summary.severity.color
                );
            }
            if let Some(kesimpulan) = latest.kesimpulan.as_deref() {
                let _ = writeln!(output, "- Kesimpulan: {kesimpulan}");
            }
            if let Some(saran) = latest.saran.as_deref() {
                let _ = writeln!(output, "- Saran: {saran}");
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Trend");

    match compare_latest(results) {
        None => {
            let _ = writeln!(output, "Not enough tests to compare.");
        }
        Some(comparison) => {
            let _ = writeln!(output, "Overall: {}", comparison.overall_trend);
            for aspect in Aspect::ALL {
                if let Some(change) = comparison.change(aspect) {
                    let _ = writeln!(
                        output,
                        "- {}: {} -> {} ({:+}, {:+}%)",
                        aspect.label(),
                        change.previous,
                        change.current,
                        change.change,
                        change.percentage
                    );
                }
            }
            for note in comparison.improvements.iter() {
                let _ = writeln!(output, "- Membaik: {note}");
            }
            for note in comparison.concerns.iter() {
                let _ = writeln!(output, "- Perhatian: {note}");
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Timeline");

    if results.is_empty() {
        let _ = writeln!(output, "No tests recorded.");
    } else {
        for result in results.iter() {
            let _ = writeln!(
                output,
                "- #{} {}: D {} / A {} / S {} (total {})",
                result.test_number,
                result.tanggal_tes,
                result.depression,
                result.anxiety,
                result.stress,
                result.total
            );
        }
    }

    output
}
