use crate::core::session::DashboardFrame;
use crate::domain::model::Dataset;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Explicitly selected data file, if any.
    fn data_file(&self) -> Option<&str>;
    /// Well-known file picked up when no explicit selection was made.
    fn fallback_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn export_file_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Load the dataset from whatever source the configuration points at.
    async fn extract(&self) -> Result<Dataset>;
    /// Hand the recomputed frame to the display collaborator.
    fn present(&self, frame: &DashboardFrame<'_>) -> Result<()>;
    /// Hand the filtered rows to the export collaborator. Returns the path of
    /// the written artifact, or `None` when there was nothing to export.
    async fn export(&self, frame: &DashboardFrame<'_>) -> Result<Option<String>>;
}
