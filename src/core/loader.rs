//! Reading bank CSV exports.
//!
//! Exports open with a summary block (beginning balance, totals) and a header
//! before the real rows. Rows start with an `MM/DD/YYYY` date in the first
//! column, so everything before the first such line is skipped.

use crate::domain::model::RawTransaction;
use crate::utils::error::Result;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_START: Regex =
        Regex::new(r"^\s*\d{2}/\d{2}/\d{4}\s*,").expect("DATE_START regex is valid");
    static ref LINE_BREAK: Regex =
        Regex::new(r"\r\n|\r|\n").expect("LINE_BREAK regex is valid");
}

/// Lines with the byte offset each one starts at. `\r\n`, `\r` and `\n` all end a line.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut start = 0;
    LINE_BREAK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())))
        .map(move |(end, next)| {
            let line = (start, &text[start..end]);
            start = next;
            line
        })
}

/// Index of the first line that starts with a transaction date, or 0 if none does.
pub fn first_transaction_row(text: &str) -> usize {
    lines_with_offsets(text)
        .position(|(_, line)| DATE_START.is_match(line))
        .unwrap_or(0)
}

/// Decode as UTF-8, silently dropping invalid byte sequences.
fn decode_lossy(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    text.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect()
}

/// Byte offset at which line `index` begins.
fn line_offset(text: &str, index: usize) -> usize {
    lines_with_offsets(text)
        .nth(index)
        .map_or(0, |(offset, _)| offset)
}

pub fn parse_transactions(bytes: &[u8]) -> Result<Vec<RawTransaction>> {
    let text = decode_lossy(bytes);
    let start = first_transaction_row(&text);
    tracing::debug!("First transaction row at line {}", start);

    let body = &text[line_offset(&text, start)..];
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        // Anything past the third column (running balance) is ignored.
        rows.push(RawTransaction {
            date: field(0),
            description: field(1),
            amount: field(2),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Description,,Summary Amt.
Beginning balance as of 08/01/2025,,\"1,000.00\"
Total credits,,\"2,500.00\"

Date,Description,Amount,Running Bal.
08/01/2025,Beginning balance as of 08/01/2025,,\"1,000.00\"
08/04/2025,\"STARBUCKS STORE 1234  SEATTLE WA\",-5.25,994.75
08/05/2025,PAYROLL DEPOSIT,\"2,500.00\",\"3,494.75\"
";

    #[test]
    fn test_first_transaction_row_skips_summary() {
        assert_eq!(first_transaction_row(EXPORT), 5);
    }

    #[test]
    fn test_first_transaction_row_defaults_to_top() {
        assert_eq!(first_transaction_row("Date,Description,Amount\nfoo,bar,1\n"), 0);
        assert_eq!(first_transaction_row(""), 0);
    }

    #[test]
    fn test_first_transaction_row_allows_leading_whitespace() {
        assert_eq!(first_transaction_row("header\n  08/04/2025 ,x,1\n"), 1);
        assert_eq!(first_transaction_row("8/4/2025,x,1\n"), 0);
    }

    #[test]
    fn test_parse_keeps_first_three_columns() {
        let rows = parse_transactions(EXPORT.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount, "");
        assert_eq!(rows[1].date, "08/04/2025");
        assert_eq!(rows[1].description, "STARBUCKS STORE 1234  SEATTLE WA");
        assert_eq!(rows[1].amount, "-5.25");
        assert_eq!(rows[2].amount, "2,500.00");
    }

    #[test]
    fn test_parse_handles_carriage_return_line_endings() {
        let export = "Description,,Summary Amt.\r\
Beginning balance as of 08/01/2025,,\"1,000.00\"\r\r\
Date,Description,Amount,Running Bal.\r\
08/04/2025,STARBUCKS,-5.25,994.75\r";

        assert_eq!(first_transaction_row(export), 4);

        let rows = parse_transactions(export.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "08/04/2025");
        assert_eq!(rows[0].description, "STARBUCKS");
        assert_eq!(rows[0].amount, "-5.25");
    }

    #[test]
    fn test_parse_handles_crlf_line_endings() {
        let export = EXPORT.replace('\n', "\r\n");

        assert_eq!(first_transaction_row(&export), 5);
        let rows = parse_transactions(export.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].description, "PAYROLL DEPOSIT");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let rows = parse_transactions(b"08/04/2025,ONLY TWO\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "ONLY TWO");
        assert_eq!(rows[0].amount, "");
    }

    #[test]
    fn test_parse_ignores_invalid_utf8() {
        let mut bytes = b"08/04/2025,CAF".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"E,-3.00\n");

        let rows = parse_transactions(&bytes).unwrap();
        assert_eq!(rows[0].description, "CAFE");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_transactions(b"").unwrap().is_empty());
    }
}
