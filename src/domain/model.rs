use serde::{Deserialize, Serialize};

/// First three columns of a bank export row, as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub merchant: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: String,
    pub subcategory: String,
}

impl Default for Categorization {
    fn default() -> Self {
        Self {
            category: "Uncategorized".to_string(),
            subcategory: "Other".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub subcategory: String,
    pub count: usize,
    pub total: f64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategorizedBatch {
    pub transactions: Vec<Transaction>,
    /// Rows discarded because their amount did not parse (summary and balance lines).
    pub dropped_rows: usize,
}
