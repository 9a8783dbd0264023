#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Default file picked up when the user selects nothing, mirroring the
/// "drop a data.xlsx next to the tool" convention.
pub const DEFAULT_DATA_FILE: &str = "data.xlsx";

/// Fixed name of the downloadable artifact.
pub const DEFAULT_EXPORT_FILE: &str = "filtered_tickets.xlsx";
