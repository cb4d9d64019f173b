use crate::domain::model::{CategorySummary, Transaction};
use chrono::NaiveDate;

const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Count, total and date span per (category, subcategory), in first-seen order.
pub fn summarize(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut summaries: Vec<(CategorySummary, Option<(NaiveDate, NaiveDate)>)> = Vec::new();

    for txn in transactions {
        let index = match summaries.iter().position(|(s, _)| {
            s.category == txn.category && s.subcategory == txn.subcategory
        }) {
            Some(index) => index,
            None => {
                summaries.push((
                    CategorySummary {
                        category: txn.category.clone(),
                        subcategory: txn.subcategory.clone(),
                        count: 0,
                        total: 0.0,
                        first_date: None,
                        last_date: None,
                    },
                    None,
                ));
                summaries.len() - 1
            }
        };

        let (summary, span) = &mut summaries[index];
        summary.count += 1;
        summary.total += txn.amount;

        if let Ok(date) = NaiveDate::parse_from_str(txn.date.trim(), EXPORT_DATE_FORMAT) {
            *span = Some(match *span {
                Some((first, last)) => (first.min(date), last.max(date)),
                None => (date, date),
            });
        }
    }

    summaries
        .into_iter()
        .map(|(mut summary, span)| {
            summary.total = (summary.total * 100.0).round() / 100.0;
            if let Some((first, last)) = span {
                summary.first_date = Some(first.format(EXPORT_DATE_FORMAT).to_string());
                summary.last_date = Some(last.format(EXPORT_DATE_FORMAT).to_string());
            }
            summary
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: &str, amount: f64, category: &str, subcategory: &str) -> Transaction {
        Transaction {
            date: date.to_string(),
            description: String::new(),
            merchant: String::new(),
            amount,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        }
    }

    #[test]
    fn test_summarize_groups_in_first_seen_order() {
        let summaries = summarize(&[
            txn("08/05/2025", -4.10, "Food", "Coffee"),
            txn("08/01/2025", -60.0, "Food", "Groceries"),
            txn("08/02/2025", -5.25, "Food", "Coffee"),
            txn("not a date", -1.0, "Food", "Coffee"),
        ]);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].subcategory, "Coffee");
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].total, -10.35);
        assert_eq!(summaries[0].first_date.as_deref(), Some("08/02/2025"));
        assert_eq!(summaries[0].last_date.as_deref(), Some("08/05/2025"));
        assert_eq!(summaries[1].subcategory, "Groceries");
    }

    #[test]
    fn test_summarize_without_dates() {
        let summaries = summarize(&[txn("", 10.0, "Income", "Salary")]);
        assert_eq!(summaries[0].first_date, None);
        assert_eq!(summaries[0].total, 10.0);
    }
}
