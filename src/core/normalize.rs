use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s{2,}").expect("WHITESPACE_RUN regex is valid");
}

const MERCHANT_WORDS: usize = 5;

/// Collapse runs of whitespace and trim the ends.
pub fn normalize_description(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Parse an export amount such as `"-1,234.50"` or `"$12"`.
///
/// Blank cells and the literal markers `nan`/`none` yield `None`, as does
/// anything that is not a number once commas and dollar signs are removed.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
    {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '$').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// First few words of a description, for a readable merchant column.
pub fn merchant_hint(description: &str) -> String {
    description
        .split_whitespace()
        .take(MERCHANT_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortest round-trip text for an amount, always with a fractional part.
pub fn format_amount(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}
