//! Cell-level coercion of locale-formatted numbers and time values.

fn is_missing_sentinel(value: &str) -> bool {
    value.is_empty() || value == ":" || value.eq_ignore_ascii_case("nan")
}

/// Parse a numeric cell. Sentinels (`:`, empty, `nan`) and unparseable
/// text yield `None`; comma decimal separators are normalized first.
pub fn coerce_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_missing_sentinel(trimmed) {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Format a value the way the cleaned CSV stores it, without trailing
/// zeros. Coercing the result parses back to the same number.
pub fn format_value(value: f64) -> String {
    let rendered = format!("{value}");
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}

/// First run of four consecutive ASCII digits, parsed as a year.
pub fn extract_year(raw: &str) -> Option<i32> {
    let text = raw.trim();
    let mut run = 0usize;
    for (idx, byte) in text.bytes().enumerate() {
        if byte.is_ascii_digit() {
            run += 1;
            if run == 4 {
                let start = idx + 1 - 4;
                return text[start..=idx].parse::<i32>().ok();
            }
        } else {
            run = 0;
        }
    }
    None
}
