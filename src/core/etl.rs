use crate::core::{CategorizedBatch, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub archive_path: Option<String>,
    pub batch: CategorizedBatch,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting categorize run");
        self.monitor.log_stats("Start");

        let raw = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", raw.len());
        self.monitor.log_stats("Extract");

        let batch = self.pipeline.transform(raw).await?;
        self.monitor.log_stats("Transform");

        let outcome = self.pipeline.load(&batch).await?;
        tracing::info!("Output saved to: {}", outcome.output_path);
        if let Some(archive) = &outcome.archive_path {
            tracing::info!("Archive saved to: {}", archive);
        }
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunReport {
            output_path: outcome.output_path,
            archive_path: outcome.archive_path,
            batch,
        })
    }
}
