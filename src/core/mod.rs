pub mod etl;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod rules;
pub mod summary;

pub use crate::domain::model::{
    CategorizedBatch, Categorization, CategorySummary, RawTransaction, Transaction,
};
pub use crate::domain::ports::{ConfigProvider, LoadOutcome, Pipeline, Storage};
pub use crate::utils::error::Result;
