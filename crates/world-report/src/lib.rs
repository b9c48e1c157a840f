//! # world-report
//!
//! Demographic report generation over the MySQL `world` dataset.
//!
//! The library covers the report pipeline end to end:
//!
//! - **Query building** with bound filter parameters and deterministic
//!   population-descending ordering
//! - **Row mapping** from neutral SQL values into typed records
//! - **Report service** exposing the country and city read operations
//! - **Rendering** as fixed-width text tables with grouped populations
//!
//! ## Example
//!
//! ```rust,no_run
//! use world_report::{Config, MysqlStore, ReportService, render};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), world_report::ReportError> {
//!     let config = Config::load("config.yaml")?;
//!     let store = MysqlStore::connect(&config).await?;
//!     let service = ReportService::new(store);
//!     let countries = service.top_countries(10).await?;
//!     print!("{}", render::render_countries(&countries));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod query;
pub mod render;
pub mod service;
pub mod store;
pub mod value;

// Re-exports for convenient access
pub use config::{Config, ConnectConfig, DatabaseConfig, ReportDefaults};
pub use error::{ReportError, Result};
pub use model::{City, Country};
pub use query::{EntityKind, Filter, QueryDescriptor, ReportRequest};
pub use service::ReportService;
pub use store::{MysqlStore, ReportStore};
pub use value::SqlValue;
