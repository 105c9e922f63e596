//! HTML widget output.
//!
//! Produces a self-contained fragment (markup plus `<style>`) suitable for
//! embedding in a page. Record text comes from the feed and is escaped.

use super::Report;
use crate::models::Outcome;
use crate::utils::TIMESTAMP_FORMAT;
use quick_xml::escape::escape;

const STYLE: &str = r#"<style>
    .kandilli-quakes { width: 100%; padding: 0 10px; box-sizing: border-box; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; }
    .kandilli-quakes h3 { text-align: center; margin: 15px 0 10px; font-size: 1.3em; }
    .kandilli-quakes .widget-subtitle { text-align: center; font-size: 0.9em; color: #666; margin-bottom: 15px; }
    .kandilli-quakes .table-wrapper { width: 100%; overflow-x: auto; }
    .kandilli-quakes .earthquake-table { width: 100%; border-collapse: collapse; font-size: 16px; }
    .kandilli-quakes .earthquake-table th { background-color: #2c3e50; color: #fff; padding: 12px 8px; border: 1px solid #ddd; font-weight: 500; font-size: 0.9em; }
    .kandilli-quakes .earthquake-table td { padding: 10px 8px; border: 1px solid #eee; text-align: center; font-size: 0.9em; word-break: break-word; }
    .kandilli-quakes .earthquake-table td:nth-child(2) { font-weight: bold; }
    .kandilli-quakes .earthquake-table tr.high-magnitude { background-color: #ffe0b2; font-weight: 500; }
    .kandilli-quakes .widget-footnote { text-align: center; font-size: 0.8em; color: #999; margin-top: 15px; }
    @media screen and (max-width: 480px) {
        .kandilli-quakes { padding: 0 5px; }
        .kandilli-quakes .earthquake-table { font-size: 14px; }
        .kandilli-quakes .earthquake-table th, .kandilli-quakes .earthquake-table td { padding: 8px 5px; font-size: 0.85em; }
    }
</style>"#;

/// Render the report as an HTML fragment.
pub fn render(report: &Report<'_>) -> String {
    match report.outcome {
        Outcome::Records(records) => {
            let mut rows = String::new();
            for record in records {
                let class = if record.is_high_magnitude(report.highlight_threshold) {
                    "high-magnitude"
                } else {
                    ""
                };
                rows.push_str(&format!(
                    "                <tr class=\"{}\">\n                    <td>{}</td>\n                    <td>{}</td>\n                    <td>{}</td>\n                    <td>{}</td>\n                </tr>\n",
                    class,
                    escape(record.depth.as_str()),
                    escape(record.magnitude.as_str()),
                    escape(record.location.as_str()),
                    escape(record.occurred_at.as_str()),
                ));
            }

            format!(
                r#"<div class="kandilli-quakes">
    <h3>Son Depremler</h3>
    <p class="widget-subtitle">Son 24 saat | Kaynak: KOERI - {generated}</p>
    <div class="table-wrapper">
        <table class="earthquake-table">
            <thead>
                <tr>
                    <th>Derinlik</th>
                    <th>Büyüklük</th>
                    <th>Lokasyon</th>
                    <th>Zaman</th>
                </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
    </div>
    <p class="widget-footnote"><em>{threshold:.1} ve üzeri büyüklükteki depremler turuncu renkle işaretlenmiştir.</em></p>
</div>
{style}
"#,
                generated = report.generated_at.format(TIMESTAMP_FORMAT),
                rows = rows,
                threshold = report.highlight_threshold,
                style = STYLE,
            )
        }
        other => {
            let color = if other.is_failure() { "color:red; " } else { "" };
            format!(
                "<p style=\"{}text-align:center; padding:15px 10px;\">{}</p>\n",
                color,
                escape(other.message().unwrap_or_default()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::test_support::{generated_at, records};
    use crate::outputs::DEFAULT_HIGHLIGHT_THRESHOLD;

    fn report(outcome: &Outcome) -> Report<'_> {
        Report {
            outcome,
            generated_at: generated_at(),
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
        }
    }

    #[test]
    fn test_render_records_table() {
        let outcome = records();
        let html = render(&report(&outcome));
        assert!(html.contains("<h3>Son Depremler</h3>"));
        assert!(html.contains("Kaynak: KOERI - 18.10.2024 09:15"));
        assert!(html.contains("<td>Gulf of Izmir</td>"));
        assert!(html.contains("<td>7.1 km</td>"));
        assert!(html.contains("3.0 ve üzeri"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn test_render_highlights_only_strong_quakes() {
        let outcome = records();
        let html = render(&report(&outcome));
        assert_eq!(html.matches("class=\"high-magnitude\"").count(), 1);
        assert_eq!(html.matches("<tr class=\"\">").count(), 1);
    }

    #[test]
    fn test_render_escapes_feed_text() {
        let outcome = records();
        let html = render(&report(&outcome));
        assert!(html.contains("MARMARA &lt;DENIZI&gt; &amp; co"));
        assert!(!html.contains("<DENIZI>"));
    }

    #[test]
    fn test_render_messages() {
        let html = render(&report(&Outcome::FetchFailure));
        assert!(html.contains("color:red"));
        assert!(html.contains("ulaşılamıyor"));

        let html = render(&report(&Outcome::ParseFailure));
        assert!(html.contains("color:red"));
        assert!(html.contains("(XML) işlenemedi"));

        let html = render(&report(&Outcome::Empty));
        assert!(!html.contains("color:red"));
        assert!(html.contains("herhangi bir deprem kaydedilmedi"));
    }
}
