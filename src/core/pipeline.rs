use crate::adapters::console::ConsolePresenter;
use crate::adapters::xlsx;
use crate::core::session::DashboardFrame;
use crate::core::{ConfigProvider, Dataset, Pipeline, Storage};
use crate::utils::error::{DashboardError, Result};

/// The ticket dashboard pipeline: reads the workbook the configuration
/// points at, presents recomputed frames on the console and writes the
/// filtered subset back out as a downloadable workbook.
pub struct TicketPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    presenter: ConsolePresenter,
}

impl<S: Storage, C: ConfigProvider> TicketPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            presenter: ConsolePresenter::default(),
        }
    }

    pub fn with_presenter(storage: S, config: C, presenter: ConsolePresenter) -> Self {
        Self {
            storage,
            config,
            presenter,
        }
    }

    /// The explicitly selected file wins; otherwise fall back to the
    /// well-known default next to the working directory.
    async fn resolve_input(&self) -> Result<String> {
        if let Some(path) = self.config.data_file() {
            return Ok(path.to_string());
        }
        let fallback = self.config.fallback_file();
        if self.storage.exists(fallback).await {
            tracing::info!("No data file selected, using '{}'", fallback);
            return Ok(fallback.to_string());
        }
        Err(DashboardError::NoDataFile)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TicketPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let path = self.resolve_input().await?;
        tracing::debug!("Reading spreadsheet: {}", path);
        let bytes = self.storage.read_file(&path).await?;
        let dataset = xlsx::read_dataset(&bytes)?;
        tracing::info!(
            "Loaded {} rows, {} columns from {}",
            dataset.len(),
            dataset.columns().len(),
            path
        );
        Ok(dataset)
    }

    fn present(&self, frame: &DashboardFrame<'_>) -> Result<()> {
        self.presenter.render(frame)
    }

    async fn export(&self, frame: &DashboardFrame<'_>) -> Result<Option<String>> {
        if frame.view.is_empty() {
            // Nothing to download; an empty workbook would only mislead.
            tracing::warn!("All rows filtered out, skipping export");
            return Ok(None);
        }

        let bytes = xlsx::write_view(&frame.view)?;
        let target = format!(
            "{}/{}",
            self.config.output_path(),
            self.config.export_file_name()
        );
        tracing::debug!("Writing {} bytes to {}", bytes.len(), target);
        self.storage.write_file(&target, &bytes).await?;
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate;
    use crate::core::filter::{self, FilterCriteria};
    use crate::utils::error::DashboardError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: Vec<u8>) {
            self.files.lock().await.insert(path.to_string(), data);
        }

        async fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DashboardError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> bool {
            self.files.lock().await.contains_key(path)
        }
    }

    struct MockConfig {
        data_file: Option<String>,
    }

    impl ConfigProvider for MockConfig {
        fn data_file(&self) -> Option<&str> {
            self.data_file.as_deref()
        }

        fn fallback_file(&self) -> &str {
            "data.xlsx"
        }

        fn output_path(&self) -> &str {
            "output"
        }

        fn export_file_name(&self) -> &str {
            "filtered_tickets.xlsx"
        }
    }

    fn fixture_workbook() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        let rows = [
            ["Priority", "TicketType", "CreatedTime"],
            ["P1", "Bug", "2024-03-01 09:00:00"],
            ["P4", "Request", "2024-03-02 10:30:00"],
        ];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[tokio::test]
    async fn test_extract_prefers_selected_file() {
        let storage = MockStorage::new();
        storage.put("upload.xlsx", fixture_workbook()).await;
        let pipeline = TicketPipeline::new(
            storage,
            MockConfig {
                data_file: Some("upload.xlsx".to_string()),
            },
        );
        let dataset = pipeline.extract().await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_falls_back_to_default_file() {
        let storage = MockStorage::new();
        storage.put("data.xlsx", fixture_workbook()).await;
        let pipeline = TicketPipeline::new(storage, MockConfig { data_file: None });
        let dataset = pipeline.extract().await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_without_any_file_is_a_warning_case() {
        let pipeline = TicketPipeline::new(MockStorage::new(), MockConfig { data_file: None });
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, DashboardError::NoDataFile));
    }

    #[tokio::test]
    async fn test_export_writes_filtered_workbook() {
        let storage = MockStorage::new();
        storage.put("data.xlsx", fixture_workbook()).await;
        let pipeline = TicketPipeline::new(storage.clone(), MockConfig { data_file: None });

        let dataset = pipeline.extract().await.unwrap();
        let view = filter::apply(&dataset, &FilterCriteria::new());
        let frame = DashboardFrame {
            summary: aggregate::summarize(&view),
            view,
        };

        let path = pipeline.export(&frame).await.unwrap();
        assert_eq!(path.as_deref(), Some("output/filtered_tickets.xlsx"));

        let exported = storage.get("output/filtered_tickets.xlsx").await.unwrap();
        let round_trip = xlsx::read_dataset(&exported).unwrap();
        assert_eq!(round_trip.len(), 2);
    }

    #[tokio::test]
    async fn test_export_skipped_for_empty_view() {
        let storage = MockStorage::new();
        storage.put("data.xlsx", fixture_workbook()).await;
        let pipeline = TicketPipeline::new(storage.clone(), MockConfig { data_file: None });

        let dataset = pipeline.extract().await.unwrap();
        let criteria =
            FilterCriteria::new().select(crate::domain::model::columns::PRIORITY, ["P9"]);
        let view = filter::apply(&dataset, &criteria);
        let frame = DashboardFrame {
            summary: aggregate::summarize(&view),
            view,
        };

        let path = pipeline.export(&frame).await.unwrap();
        assert_eq!(path, None);
        assert!(storage.get("output/filtered_tickets.xlsx").await.is_none());
    }
}
