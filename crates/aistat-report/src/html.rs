//! HTML assembly: chart pages and the escaping shared with the fragments.

use serde_json::Value;

use crate::error::Result;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a plain-text summary as paragraphs plus one bullet list.
///
/// Lines starting with `-` collect into a single `<ul>` after the
/// paragraphs, mirroring the shape of the summary files.
pub(crate) fn summary_body(text: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut bullets = Vec::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with('-') {
            bullets.push(line.trim_start_matches('-').trim().to_string());
        } else {
            paragraphs.push(line.to_string());
        }
    }

    let mut parts: Vec<String> = paragraphs
        .iter()
        .map(|paragraph| format!("<p>{}</p>", escape(paragraph)))
        .collect();
    if !bullets.is_empty() {
        parts.push(String::from("<ul>"));
        for bullet in &bullets {
            parts.push(format!("<li>{}</li>", escape(bullet)));
        }
        parts.push(String::from("</ul>"));
    }
    parts.join("\n")
}

/// Everything one interactive page needs.
pub(crate) struct ChartPage<'a> {
    pub title: &'a str,
    pub intro: &'a str,
    pub figure: &'a Value,
    /// Relative link target of the CSV mirror, placed next to the page.
    pub csv_href: &'a str,
    pub summary: &'a str,
}

/// A full standalone page: Plotly from the CDN, the figure, and the text
/// fallback (summary plus a link to the CSV mirror) below the chart.
pub(crate) fn render_chart_page(page: &ChartPage<'_>) -> Result<String> {
    let figure_json = serde_json::to_string(page.figure)?;
    let title = escape(page.title);
    let intro = escape(page.intro);
    let csv_href = escape(page.csv_href);
    let summary = summary_body(page.summary);
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="{PLOTLY_CDN}" charset="utf-8"></script>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 64rem; margin: 1.5rem auto; padding: 0 1rem; }}
#chart {{ width: 100%; height: 620px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>{intro}</p>
<div id="chart"></div>
<script>
var figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout, {{"responsive": true}});
</script>
<h2>Summary</h2>
{summary}
<p><a href="{csv_href}">Plotted data as CSV</a></p>
</body>
</html>
"#
    ))
}
