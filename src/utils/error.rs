use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to read spreadsheet: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    #[error("Failed to write spreadsheet: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No data file found")]
    NoDataFile,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Awaiting user input; not a failure of the pipeline itself.
    Low,
    /// Bad configuration, fixable by the user.
    Medium,
    /// The pipeline ran into broken data or a broken environment.
    High,
}

impl DashboardError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashboardError::NoDataFile => ErrorSeverity::Low,
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorSeverity::Medium,
            DashboardError::SpreadsheetRead(_)
            | DashboardError::SpreadsheetWrite(_)
            | DashboardError::IoError(_)
            | DashboardError::SerializationError(_)
            | DashboardError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::NoDataFile => "No data file found. Either pass --data-file <path>, \
                 or place a 'data.xlsx' in the working directory so it can be picked up by default."
                .to_string(),
            DashboardError::SpreadsheetRead(cause) => {
                format!("Failed to read the uploaded file: {}", cause)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::NoDataFile => "Upload or point at a ticket spreadsheet and run again",
            DashboardError::SpreadsheetRead(_) => {
                "Check that the file is a valid .xlsx workbook and not corrupted"
            }
            DashboardError::SpreadsheetWrite(_) | DashboardError::IoError(_) => {
                "Check permissions and free space on the output path"
            }
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => {
                "Fix the flagged configuration value and run again"
            }
            DashboardError::SerializationError(_) | DashboardError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the log output"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
