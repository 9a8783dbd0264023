pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::console::ConsolePresenter;
pub use adapters::storage::LocalStorage;
pub use crate::core::engine::DashboardEngine;
pub use crate::core::filter::{DateSelection, FilterCriteria};
pub use crate::core::pipeline::TicketPipeline;
pub use crate::core::session::DashboardSession;
pub use utils::error::{DashboardError, Result};
