use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

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

    /// Runs extract, transform and load in order. Nothing is written unless
    /// every record made it through transform.
    pub async fn run(&mut self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());
        self.monitor.log_stats("Extract", records.len());

        // Transform
        let rows = self.pipeline.transform(records).await?;
        tracing::info!("Transformed {} records", rows.len());
        self.monitor.log_stats("Transform", rows.len());

        // Load
        let row_count = rows.len();
        let output_path = self.pipeline.load(rows).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load", row_count);
        self.monitor.log_final_stats();

        Ok(output_path)
    }

    pub fn into_pipeline(self) -> P {
        self.pipeline
    }
}
