pub mod aggregate;
pub mod date_range;
pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod session;

pub use crate::domain::model::{CellValue, Dataset, Ticket};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
