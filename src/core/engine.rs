use crate::core::filter::FilterCriteria;
use crate::core::session::DashboardSession;
use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one full interaction: load the dataset, recompute the filtered
/// view and its summary, hand both to the display collaborator, then export
/// the filtered rows. Returns the export path, or `None` when the export
/// was skipped.
pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
    criteria: FilterCriteria,
    monitor: SystemMonitor,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P, criteria: FilterCriteria) -> Self {
        Self::new_with_monitoring(pipeline, criteria, false)
    }

    pub fn new_with_monitoring(pipeline: P, criteria: FilterCriteria, monitor: bool) -> Self {
        Self {
            pipeline,
            criteria,
            monitor: SystemMonitor::new(monitor),
        }
    }

    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("Loading dataset...");
        let dataset = self.pipeline.extract().await?;
        self.monitor.log_stats("Load");

        let session = DashboardSession::new(dataset, self.criteria.clone());
        let frame = session.refresh();
        tracing::info!(
            "{} of {} rows match the current filters",
            frame.summary.total,
            session.dataset().len()
        );
        self.monitor.log_stats("Filter + Aggregate");

        self.pipeline.present(&frame)?;

        let exported = self.pipeline.export(&frame).await?;
        match &exported {
            Some(path) => tracing::info!("Filtered workbook written to {}", path),
            None => tracing::info!("Export skipped"),
        }
        self.monitor.log_final_stats();

        Ok(exported)
    }
}
