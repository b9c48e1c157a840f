//! Data-access collaborators.
//!
//! The [`ReportStore`] trait is the seam between the report pipeline and
//! the store: it accepts a query descriptor and returns decoded rows.
//! Connection lifecycle, retry, and backoff belong to implementations,
//! not to the report logic.

mod mysql;

pub use mysql::MysqlStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::query::QueryDescriptor;
use crate::value::SqlValue;

/// Execute report queries against a store.
///
/// Implementations receive an already-built descriptor, bind its
/// parameters, and return one decoded row per result row, in store order.
/// An execution failure surfaces as a typed error; it is never converted
/// into an empty result.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Execute a query and return its decoded rows.
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Vec<Vec<SqlValue>>>;
}
