use crate::config::{DEFAULT_DATA_FILE, DEFAULT_EXPORT_FILE};
use crate::core::filter::{DateSelection, FilterCriteria};
use crate::core::ConfigProvider;
use crate::domain::model::columns;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dashboard settings loaded from a TOML file, for users who prefer a
/// checked-in config (with saved filter presets) over CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardConfig,
    pub input: Option<InputConfig>,
    pub filters: Option<FiltersConfig>,
    pub export: ExportConfig,
    pub display: Option<DisplayConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub data_file: Option<String>,
    pub fallback_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub priority: Option<Vec<String>>,
    pub ticket_type: Option<Vec<String>>,
    pub resolution_status: Option<Vec<String>>,
    /// Dates as quoted "YYYY-MM-DD" strings.
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub table_rows: Option<usize>,
    pub summary_json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_file_extension("export.file_name", self.export_file_name(), &["xlsx"])?;
        if let Some(data_file) = self.data_file() {
            validation::validate_file_extension("input.data_file", data_file, &["xlsx"])?;
        }
        if let Some(table_rows) = self.display.as_ref().and_then(|d| d.table_rows) {
            validation::validate_positive_number("display.table_rows", table_rows, 1)?;
        }
        Ok(())
    }

    /// The filter presets stored in the config file.
    pub fn criteria(&self) -> FilterCriteria {
        let Some(filters) = &self.filters else {
            return FilterCriteria::new();
        };
        let created = match (filters.created_from, filters.created_to) {
            (Some(from), Some(to)) => DateSelection::Between(from, to),
            (Some(day), None) | (None, Some(day)) => DateSelection::Single(day),
            (None, None) => DateSelection::Unbounded,
        };
        FilterCriteria::new()
            .select(
                columns::PRIORITY,
                filters.priority.clone().unwrap_or_default(),
            )
            .select(
                columns::TICKET_TYPE,
                filters.ticket_type.clone().unwrap_or_default(),
            )
            .select(
                columns::RESOLUTION_STATUS,
                filters.resolution_status.clone().unwrap_or_default(),
            )
            .with_created(created)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn table_rows(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|d| d.table_rows)
            .unwrap_or(20)
    }

    pub fn summary_json(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|d| d.summary_json)
            .unwrap_or(false)
    }
}

/// Substitute `${VAR_NAME}` placeholders with environment values, leaving
/// unknown variables untouched.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> Option<&str> {
        self.input.as_ref().and_then(|i| i.data_file.as_deref())
    }

    fn fallback_file(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|i| i.fallback_file.as_deref())
            .unwrap_or(DEFAULT_DATA_FILE)
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_file_name(&self) -> &str {
        self.export
            .file_name
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_FILE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
