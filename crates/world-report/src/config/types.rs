//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// MySQL database connection settings.
    pub database: DatabaseConfig,

    /// Connection retry behavior.
    #[serde(default)]
    pub connect: ConnectConfig,

    /// Default parameters for the summary report run.
    #[serde(default)]
    pub report: ReportDefaults,
}

/// MySQL database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Database name (default: "world").
    #[serde(default = "default_world_db")]
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,
}

/// Bounded exponential backoff settings for establishing the connection.
///
/// The delay before attempt `i` is `base_delay_ms * 2^(i-1)`, capped at
/// `max_delay_ms`. After `max_attempts` failures the connection surfaces
/// as `ConnectionUnavailable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Maximum connection attempts (default: 10).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds (default: 500).
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Maximum delay between attempts in milliseconds (default: 30000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Default parameters for the full summary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefaults {
    /// Continent used by continent-scoped summary reports.
    #[serde(default = "default_continent")]
    pub continent: String,

    /// Region used by region-scoped summary reports.
    #[serde(default = "default_region")]
    pub region: String,

    /// Row cap for the top-N summary reports.
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            continent: default_continent(),
            region: default_region(),
            top_n: default_top_n(),
        }
    }
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_world_db() -> String {
    "world".to_string()
}

fn default_max_attempts() -> u32 {
    10
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_continent() -> String {
    "Europe".to_string()
}

fn default_region() -> String {
    "Southeast Asia".to_string()
}

fn default_top_n() -> i64 {
    10
}
