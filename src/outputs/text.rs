//! Plain-text table for terminal use.

use super::Report;
use crate::models::{EarthquakeRecord, Outcome};
use crate::utils::TIMESTAMP_FORMAT;

const HEADERS: [&str; 4] = ["Derinlik", "Büyüklük", "Lokasyon", "Zaman"];

fn columns(record: &EarthquakeRecord) -> [&str; 4] {
    [
        record.depth.as_str(),
        record.magnitude.as_str(),
        record.location.as_str(),
        record.occurred_at.as_str(),
    ]
}

/// Render the report as an aligned text table, or the outcome's message.
///
/// Rows at or above the highlight threshold are marked with `*`.
pub fn render(report: &Report<'_>) -> String {
    let records = match report.outcome {
        Outcome::Records(records) => records,
        other => return format!("{}\n", other.message().unwrap_or_default()),
    };

    let mut widths = HEADERS.map(|h| h.chars().count());
    for record in records {
        for (width, cell) in widths.iter_mut().zip(columns(record)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4], mark: char| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("{} {}", mark, padded.join("  ").trim_end())
    };

    let mut out = format!(
        "Son Depremler (son 24 saat) | Kaynak: KOERI - {}\n\n",
        report.generated_at.format(TIMESTAMP_FORMAT)
    );
    out.push_str(&line(HEADERS, ' '));
    out.push('\n');
    for record in records {
        let mark = if record.is_high_magnitude(report.highlight_threshold) {
            '*'
        } else {
            ' '
        };
        out.push_str(&line(columns(record), mark));
        out.push('\n');
    }
    out.push_str(&format!(
        "\n* {:.1} ve üzeri büyüklükteki depremler\n",
        report.highlight_threshold
    ));
    out
}
