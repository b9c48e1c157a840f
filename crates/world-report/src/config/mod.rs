//! Configuration loading and validation.

mod types;

pub use types::*;

use crate::error::{ReportError, Result};
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.host.is_empty() {
            return Err(ReportError::Config("database.host must not be empty".into()));
        }
        if self.database.database.is_empty() {
            return Err(ReportError::Config(
                "database.database must not be empty".into(),
            ));
        }
        if self.connect.max_attempts == 0 {
            return Err(ReportError::Config(
                "connect.max_attempts must be at least 1".into(),
            ));
        }
        if self.report.top_n <= 0 {
            return Err(ReportError::Config("report.top_n must be positive".into()));
        }
        Ok(())
    }
}
