//! HTML encoding
//!
//! Wraps a bootstrap-styled table between a fixed head and foot. The
//! stylesheet and script references are plain strings; nothing is fetched.

use crate::output::traits::{Exporter, OutputResult};
use crate::output::Dataset;
use html_escape::encode_text;
use std::fmt::Write;

/// Placeholder shown for unknown cells; the table script sorts it last
pub const HTML_UNKNOWN: &str = "N/A";

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.0.0/dist/css/bootstrap.min.css" integrity="sha384-Gn5384xqQ1aoWXA+058RXPxPg6fy4IWvTNh0E263XmFcJlSAwiGgFAW/dAiS6JXm" crossorigin="anonymous">
    <link rel="stylesheet" href="table_data/styles.css">
    <script src="table_data/main.js" defer></script>
"#;

const HTML_FOOT: &str = r#"
</body>
</html>"#;

/// Static page exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExporter;

impl HtmlExporter {
    /// Renders only the `<table>` fragment
    pub fn table_fragment(dataset: &Dataset) -> String {
        let mut html = String::new();

        html.push_str("<table class=\"table\">\n<thead class=\"thead-dark\">\n<tr>");
        for header in dataset.headers() {
            let _ = write!(html, "<th scope=\"col\">{}</th>", encode_text(header));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for record in dataset.records() {
            html.push_str("<tr>");
            for cell in record.cells() {
                let _ = write!(html, "<td>{}</td>", encode_text(&cell.render(HTML_UNKNOWN)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>");
        html
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, dataset: &Dataset) -> OutputResult<Vec<u8>> {
        let mut html = String::from(HTML_HEAD);
        let _ = writeln!(html, "    <title>{}</title>", encode_text(dataset.title()));
        html.push_str("</head>\n<body>\n");

        html.push_str(&Self::table_fragment(dataset));

        if let Some(date) = dataset.collected_on() {
            let _ = write!(
                html,
                "\n<p class=\"text-muted\">Collected on {}</p>",
                date.format("%Y-%m-%d")
            );
        }

        html.push_str(HTML_FOOT);
        Ok(html.into_bytes())
    }
}
