use crate::domain::model::Transaction;

const COLUMNS: [&str; 4] = ["Date", "Merchant", "Amount", "Subcategory"];
const DISPLAY_PRECISION: usize = 6;

/// One amount cell: six decimals with trailing zeros trimmed to at least one,
/// and a blank sign slot for non-negative values.
fn preview_amount(value: f64) -> String {
    let fixed = format!("{:.*}", DISPLAY_PRECISION, value);
    let trimmed = match fixed.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            format!("{}.{}", whole, if frac.is_empty() { "0" } else { frac })
        }
        None => fixed,
    };
    if value.is_sign_negative() {
        trimmed
    } else {
        format!(" {}", trimmed)
    }
}

/// Text report of the transactions in one top-level category.
///
/// Starts with a blank line. Each amount is formatted on its own and every
/// column is right-aligned to its widest cell.
pub fn render_preview(transactions: &[Transaction], category: &str) -> String {
    let subset: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.category == category)
        .collect();

    if subset.is_empty() {
        return format!("\n(No {} transactions found.)", category);
    }

    let mut rows: Vec<[String; 4]> = vec![COLUMNS.map(str::to_string)];
    rows.extend(subset.iter().map(|t| {
        [
            t.date.clone(),
            t.merchant.clone(),
            preview_amount(t.amount),
            t.subcategory.clone(),
        ]
    }));

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("\n=== {} TRANSACTIONS ===", category.to_uppercase());
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect();
        out.push('\n');
        out.push_str(&line.join("  "));
    }
    out
}
