pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{CategorizeError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_required_field,
    Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_RULES_FILE: &str = "rules.json";
pub const DEFAULT_OUTPUT_FILE: &str = "categorized_transactions.csv";
pub const DEFAULT_PREVIEW_CATEGORY: &str = "Food";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, clap::Parser)]
#[command(name = "txn-categorize")]
#[command(
    about = "Categorize bank CSV transactions using simple string rules (no regex authoring)"
)]
pub struct CliConfig {
    /// Path to the bank CSV export
    #[arg(long, visible_alias = "transaction-file", alias = "transaction_file")]
    pub csv: Option<String>,

    /// Path to rules.json (plain strings only) [default: rules.json]
    #[arg(long)]
    pub rules: Option<String>,

    /// Output CSV path [default: categorized_transactions.csv]
    #[arg(long, visible_alias = "output-file-name", alias = "output_file_name")]
    pub out: Option<String>,

    /// Top-level category to preview on stdout [default: Food]
    #[arg(long)]
    pub preview: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write a zip with the CSV and a per-category summary
    #[arg(long)]
    pub archive: bool,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags merged over the optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub transactions: Option<String>,
    pub rules: Option<String>,
    pub output: Option<String>,
    pub preview: Option<String>,
    pub archive: bool,
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl From<&CliConfig> for SettingsOverrides {
    fn from(cli: &CliConfig) -> Self {
        Self {
            transactions: cli.csv.clone(),
            rules: cli.rules.clone(),
            output: cli.out.clone(),
            preview: cli.preview.clone(),
            archive: cli.archive,
            monitor: cli.monitor,
        }
    }
}

/// Resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub transactions_path: String,
    pub rules_path: String,
    pub output_path: String,
    pub preview_category: String,
    pub archive: bool,
    pub monitor: bool,
}

impl Settings {
    pub fn resolve(overrides: SettingsOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let transactions = overrides.transactions.or(file.input.transactions);
        let transactions = validate_required_field("csv", &transactions)?;

        let rules_path = match overrides.rules.or(file.rules.path) {
            Some(path) => expand_home(&path),
            None => locate_default_rules(&default_rules_candidates())?,
        };

        Ok(Self {
            transactions_path: expand_home(transactions),
            rules_path,
            output_path: expand_home(
                &overrides
                    .output
                    .or(file.output.path)
                    .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            ),
            preview_category: overrides
                .preview
                .or(file.output.preview)
                .unwrap_or_else(|| DEFAULT_PREVIEW_CATEGORY.to_string()),
            archive: overrides.archive || file.output.archive.unwrap_or(false),
            monitor: overrides.monitor || file.monitoring.enabled,
        })
    }
}

/// `~/x.csv` -> `$HOME/x.csv`; other paths are returned unchanged.
pub fn expand_home(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

/// The working directory's rules.json, then the one next to the executable.
fn default_rules_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_RULES_FILE)];
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(DEFAULT_RULES_FILE));
    }
    candidates
}

pub fn locate_default_rules(candidates: &[PathBuf]) -> Result<String> {
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        tracing::debug!("Using rules file {}", found.display());
        return Ok(found.to_string_lossy().into_owned());
    }

    let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    Err(CategorizeError::ConfigError {
        message: format!(
            "{} not found (looked in: {}). Pass --rules or put it next to the executable",
            DEFAULT_RULES_FILE,
            searched.join(", ")
        ),
    })
}

/// Input and output are CSV in practice but any path is accepted.
fn warn_unless_csv(field_name: &str, path: &str) {
    if let Err(e) = validate_file_extension(field_name, path, &["csv"]) {
        tracing::warn!("{}; continuing anyway", e);
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("csv", &self.transactions_path)?;
        warn_unless_csv("csv", &self.transactions_path);

        validate_path("rules", &self.rules_path)?;
        validate_file_extension("rules", &self.rules_path, &["json"])?;

        validate_path("out", &self.output_path)?;
        warn_unless_csv("out", &self.output_path);

        validate_non_empty_string("preview", &self.preview_category)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn transactions_path(&self) -> &str {
        &self.transactions_path
    }

    fn rules_path(&self) -> &str {
        &self.rules_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn preview_category(&self) -> &str {
        &self.preview_category
    }

    fn archive_enabled(&self) -> bool {
        self.archive
    }
}


#[cfg(all(test, feature = "cli"))]
mod cli_tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("txn-categorize").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.csv, None);
        assert_eq!(cli.config, None);
        assert!(!cli.verbose);
        assert_eq!(SettingsOverrides::from(&cli), SettingsOverrides::default());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = parse(&[
            "--csv", "stmt.csv", "--rules", "my-rules.json", "--out", "out.csv",
            "--preview", "Bills", "--archive", "--monitor", "-v", "-c", "settings.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("settings.toml"));
        assert_eq!(
            SettingsOverrides::from(&cli),
            SettingsOverrides {
                transactions: Some("stmt.csv".to_string()),
                rules: Some("my-rules.json".to_string()),
                output: Some("out.csv".to_string()),
                preview: Some("Bills".to_string()),
                archive: true,
                monitor: true,
            }
        );
    }

    #[test]
    fn test_cli_file_name_aliases() {
        for (input_flag, output_flag) in [
            ("--transaction-file", "--output-file-name"),
            ("--transaction_file", "--output_file_name"),
        ] {
            let cli = parse(&[input_flag, "stmt.csv", output_flag, "out.csv"]);
            let overrides = SettingsOverrides::from(&cli);

            assert_eq!(overrides.transactions.as_deref(), Some("stmt.csv"));
            assert_eq!(overrides.output.as_deref(), Some("out.csv"));
            assert_eq!(overrides.rules, None);
            assert!(!overrides.archive);
        }
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        let args = ["txn-categorize", "--input", "stmt.csv"];
        assert!(CliConfig::try_parse_from(args).is_err());
    }
}
