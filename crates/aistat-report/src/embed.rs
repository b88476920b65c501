//! Export stage: the CSV mirror and text summary of each view converted
//! into embeddable HTML fragments (no page wrapper).

use std::path::PathBuf;

use tracing::{info, warn};

use aistat_ingest::{CsvTable, ensure_dir, read_csv_table, read_text, write_text};
use aistat_model::DataPaths;

use crate::error::{ReportError, Result};
use crate::html;

/// View keys with the caption used for both the table and the summary.
const VIEWS: [(&str, &str); 3] = [
    ("view1", "View 1 - Top 15 countries (latest year)"),
    ("view2", "View 2 - AI adoption trend (focus countries)"),
    ("view3", "View 3 - Annual adoption ranking (bump chart)"),
];

#[derive(Debug)]
pub struct EmbedReport {
    pub written: Vec<PathBuf>,
    /// Inputs that were absent; their fragments were skipped.
    pub skipped: Vec<PathBuf>,
}

pub fn run(paths: &DataPaths) -> Result<EmbedReport> {
    let charts = paths.charts_dir();
    if !charts.exists() {
        return Err(ReportError::ChartsMissing { path: charts });
    }
    ensure_dir(&paths.embed_dir())?;

    let mut written = Vec::new();
    let mut skipped = Vec::new();
    for (key, caption) in VIEWS {
        let table_in = charts.join(format!("{key}_table.csv"));
        if table_in.exists() {
            let table = read_csv_table(&table_in)?;
            let out = paths.embed_dir().join(format!("{key}_table.html"));
            write_text(&out, &table_fragment(&table, caption))?;
            info!(path = %out.display(), "table fragment written");
            written.push(out);
        } else {
            warn!(path = %table_in.display(), "view table missing, fragment skipped");
            skipped.push(table_in);
        }

        let summary_in = charts.join(format!("{key}_summary.txt"));
        if summary_in.exists() {
            let text = read_text(&summary_in)?;
            let out = paths.embed_dir().join(format!("{key}_summary.html"));
            write_text(&out, &summary_fragment(&text, caption))?;
            info!(path = %out.display(), "summary fragment written");
            written.push(out);
        } else {
            warn!(path = %summary_in.display(), "view summary missing, fragment skipped");
            skipped.push(summary_in);
        }
    }
    Ok(EmbedReport { written, skipped })
}

/// An accessible `<table>` fragment: caption, scoped header cells, body.
pub(crate) fn table_fragment(table: &CsvTable, caption: &str) -> String {
    let mut parts = vec![String::from("<table class=\"data-table\">")];
    parts.push(format!("<caption>{}</caption>", html::escape(caption)));
    parts.push(String::from("<thead><tr>"));
    for header in &table.headers {
        parts.push(format!("<th scope=\"col\">{}</th>", html::escape(header)));
    }
    parts.push(String::from("</tr></thead>"));
    parts.push(String::from("<tbody>"));
    for row in &table.rows {
        parts.push(String::from("<tr>"));
        for cell in row {
            parts.push(format!("<td>{}</td>", html::escape(cell)));
        }
        parts.push(String::from("</tr>"));
    }
    parts.push(String::from("</tbody></table>"));
    parts.join("\n")
}

/// A titled summary block: paragraphs plus one bullet list.
pub(crate) fn summary_fragment(text: &str, title: &str) -> String {
    if text.trim().is_empty() {
        return String::from("<p>No summary available.</p>");
    }
    format!(
        "<p><strong>{}</strong></p>\n{}",
        html::escape(title),
        html::summary_body(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_fragment_escapes_cells() {
        let table = CsvTable {
            headers: vec!["geo".to_string(), "note".to_string()],
            rows: vec![vec!["ES".to_string(), "a<b & \"c\"".to_string()]],
        };
        let fragment = table_fragment(&table, "Caption & co");
        assert_eq!(
            fragment,
            "<table class=\"data-table\">\n\
             <caption>Caption &amp; co</caption>\n\
             <thead><tr>\n\
             <th scope=\"col\">geo</th>\n\
             <th scope=\"col\">note</th>\n\
             </tr></thead>\n\
             <tbody>\n\
             <tr>\n\
             <td>ES</td>\n\
             <td>a&lt;b &amp; &quot;c&quot;</td>\n\
             </tr>\n\
             </tbody></table>"
        );
    }

    #[test]
    fn empty_summary_gets_a_placeholder() {
        assert_eq!(
            summary_fragment("  \n \n", "View 1"),
            "<p>No summary available.</p>"
        );
    }

    #[test]
    fn summary_fragment_leads_with_the_caption() {
        let fragment = summary_fragment("Headline\n- one\n- two\n", "View 2");
        assert_eq!(
            fragment,
            "<p><strong>View 2</strong></p>\n<p>Headline</p>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
        );
    }
}
