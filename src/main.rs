use anyhow::Context;
use clap::Parser;
use std::io::Write;
use txn_categorize::core::ConfigProvider;
use txn_categorize::utils::error::{CategorizeError, ErrorSeverity};
use txn_categorize::utils::{logger, validation::Validate};
use txn_categorize::{
    render_preview, CategorizePipeline, CliConfig, EtlEngine, LocalStorage, Settings,
    SettingsOverrides, TomlConfig,
};

fn exit_with(e: &CategorizeError) -> ! {
    tracing::error!(
        "❌ Categorize run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    let settings = match Settings::resolve(SettingsOverrides::from(&cli), file_config) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let preview_category = settings.preview_category().to_string();
    let monitor_enabled = settings.monitor;
    let pipeline = CategorizePipeline::new(LocalStorage::current_dir(), settings);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Wrote {}", report.output_path).context("failed to write to stdout")?;
    if let Some(archive) = &report.archive_path {
        writeln!(stdout, "Wrote {}", archive).context("failed to write to stdout")?;
    }
    writeln!(
        stdout,
        "{}",
        render_preview(&report.batch.transactions, &preview_category)
    )
    .context("failed to write preview")?;

    Ok(())
}
