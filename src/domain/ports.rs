use crate::domain::model::{CategorizedBatch, RawTransaction};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn transactions_path(&self) -> &str;
    fn rules_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn preview_category(&self) -> &str;
    fn archive_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawTransaction>>;
    async fn transform(&self, data: Vec<RawTransaction>) -> Result<CategorizedBatch>;
    async fn load(&self, batch: &CategorizedBatch) -> Result<LoadOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub output_path: String,
    pub archive_path: Option<String>,
}
