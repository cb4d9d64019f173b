pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings, SettingsOverrides};

pub use crate::core::{
    etl::{EtlEngine, RunReport},
    pipeline::CategorizePipeline,
    preview::render_preview,
    rules::RuleSet,
};
pub use utils::error::{CategorizeError, Result};
