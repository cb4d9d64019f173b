use crate::core::loader::parse_transactions;
use crate::core::normalize::{format_amount, merchant_hint, normalize_description, parse_amount};
use crate::core::rules::RuleSet;
use crate::core::summary::summarize;
use crate::core::{
    CategorizedBatch, ConfigProvider, LoadOutcome, Pipeline, RawTransaction, Storage, Transaction,
};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use tokio::sync::OnceCell;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const OUTPUT_HEADER: [&str; 6] = [
    "Date",
    "Description",
    "Merchant",
    "Amount",
    "Category",
    "Subcategory",
];

pub struct CategorizePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    rules: OnceCell<RuleSet>,
}

impl<S: Storage, C: ConfigProvider> CategorizePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            rules: OnceCell::new(),
        }
    }

    /// Use an already compiled rule set instead of reading `rules_path`.
    pub fn with_rules(storage: S, config: C, rules: RuleSet) -> Self {
        Self {
            storage,
            config,
            rules: OnceCell::new_with(Some(rules)),
        }
    }

    pub async fn rules(&self) -> Result<&RuleSet> {
        self.rules
            .get_or_try_init(|| RuleSet::load(&self.storage, self.config.rules_path()))
            .await
    }
}

pub fn to_csv(transactions: &[Transaction]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADER)?;
    for txn in transactions {
        writer.write_record([
            txn.date.as_str(),
            txn.description.as_str(),
            txn.merchant.as_str(),
            format_amount(txn.amount).as_str(),
            txn.category.as_str(),
            txn.subcategory.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// `out/categorized.csv` -> `out/categorized.zip`
pub fn archive_path_for(output_path: &str) -> String {
    Path::new(output_path)
        .with_extension("zip")
        .to_string_lossy()
        .into_owned()
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CategorizePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawTransaction>> {
        // Rules first so a bad rules file fails before the export is read.
        self.rules().await?;

        let path = self.config.transactions_path();
        tracing::info!("📥 Reading transactions from {}", path);
        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        parse_transactions(&bytes)
    }

    async fn transform(&self, data: Vec<RawTransaction>) -> Result<CategorizedBatch> {
        let rules = self.rules().await?;
        let mut batch = CategorizedBatch::default();

        for raw in data {
            let description = normalize_description(&raw.description);
            let Some(amount) = parse_amount(&raw.amount) else {
                tracing::debug!("Dropping non-transaction row: {:?}", raw);
                batch.dropped_rows += 1;
                continue;
            };

            let categorization = rules.best_match(&description);
            batch.transactions.push(Transaction {
                date: raw.date,
                merchant: merchant_hint(&description),
                description,
                amount,
                category: categorization.category,
                subcategory: categorization.subcategory,
            });
        }

        let uncategorized = batch
            .transactions
            .iter()
            .filter(|t| t.category == "Uncategorized")
            .count();
        tracing::info!(
            "🏷️  Categorized {} transactions ({} uncategorized, {} rows dropped)",
            batch.transactions.len(),
            uncategorized,
            batch.dropped_rows
        );

        Ok(batch)
    }

    async fn load(&self, batch: &CategorizedBatch) -> Result<LoadOutcome> {
        let output_path = self.config.output_path().to_string();
        let csv_data = to_csv(&batch.transactions)?;

        tracing::debug!("Writing {} bytes of CSV to {}", csv_data.len(), output_path);
        self.storage.write_file(&output_path, &csv_data).await?;

        let archive_path = if self.config.archive_enabled() {
            let archive_path = archive_path_for(&output_path);
            let csv_name = Path::new(&output_path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "categorized_transactions.csv".to_string());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                zip.start_file(csv_name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(&csv_data)?;

                zip.start_file("summary.json", SimpleFileOptions::default())?;
                let summary = serde_json::to_string_pretty(&summarize(&batch.transactions))?;
                zip.write_all(summary.as_bytes())?;

                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing archive ({} bytes) to {}", zip_data.len(), archive_path);
            self.storage.write_file(&archive_path, &zip_data).await?;
            Some(archive_path)
        } else {
            None
        };

        Ok(LoadOutcome {
            output_path,
            archive_path,
        })
    }
}
