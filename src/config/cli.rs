use crate::config::{DEFAULT_DATA_FILE, DEFAULT_EXPORT_FILE};
use crate::core::filter::{DateSelection, FilterCriteria};
use crate::core::ConfigProvider;
use crate::domain::model::columns;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ticket-dash")]
#[command(about = "Filter a support-ticket spreadsheet and summarize the result")]
pub struct CliConfig {
    #[arg(long, help = "Ticket spreadsheet to load (.xlsx)")]
    pub data_file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    pub export_file: String,

    #[arg(long, value_delimiter = ',', help = "Keep only these Priority values")]
    pub priority: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Keep only these TicketType values")]
    pub ticket_type: Vec<String>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Keep only these ResolutionStatus values"
    )]
    pub resolution_status: Vec<String>,

    #[arg(long, help = "Start of the CreatedTime range (YYYY-MM-DD)")]
    pub created_from: Option<NaiveDate>,

    #[arg(long, help = "End of the CreatedTime range (YYYY-MM-DD)")]
    pub created_to: Option<NaiveDate>,

    #[arg(long, help = "Print the distinct filterable values and exit")]
    pub list_filters: bool,

    #[arg(long, default_value = "20", help = "Rows shown in the console table")]
    pub table_rows: usize,

    #[arg(long, help = "Print the KPI summary as JSON instead of text")]
    pub summary_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per pipeline phase")]
    pub monitor: bool,

    #[arg(long, help = "Load input/filter/export settings from a TOML file")]
    pub config: Option<String>,
}

impl CliConfig {
    /// The filter selections for this interaction. A single date bound
    /// degrades to a single-day selection.
    pub fn criteria(&self) -> FilterCriteria {
        let created = match (self.created_from, self.created_to) {
            (Some(from), Some(to)) => DateSelection::Between(from, to),
            (Some(day), None) | (None, Some(day)) => DateSelection::Single(day),
            (None, None) => DateSelection::Unbounded,
        };
        FilterCriteria::new()
            .select(columns::PRIORITY, self.priority.iter().cloned())
            .select(columns::TICKET_TYPE, self.ticket_type.iter().cloned())
            .select(
                columns::RESOLUTION_STATUS,
                self.resolution_status.iter().cloned(),
            )
            .with_created(created)
    }
}

impl ConfigProvider for CliConfig {
    fn data_file(&self) -> Option<&str> {
        self.data_file.as_deref()
    }

    fn fallback_file(&self) -> &str {
        DEFAULT_DATA_FILE
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_file_name(&self) -> &str {
        &self.export_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("export_file", &self.export_file)?;
        validation::validate_file_extension("export_file", &self.export_file, &["xlsx"])?;
        validation::validate_positive_number("table_rows", self.table_rows, 1)?;
        if let Some(data_file) = &self.data_file {
            validation::validate_file_extension("data_file", data_file, &["xlsx"])?;
        }
        Ok(())
    }
}
