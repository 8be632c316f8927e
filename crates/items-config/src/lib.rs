//! Shared configuration for the items function.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults are
//! overridden by a configuration file, then by environment variables, then by
//! command-line flags. The function reads it once at process start; there is
//! no hot reload.
//!
//! The table name and region are read from the unprefixed `TABLE_NAME` and
//! `REGION` variables that the deployment template sets for the function.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TABLE_NAME, default_log_filter, default_log_filter_string,
    default_log_format, default_table_name, default_table_name_string,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for the items function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
pub struct Config {
    /// Name of the key-value table holding the items.
    #[ortho_config(default = default_table_name_string())]
    pub table_name: String,
    /// Optional region override for the store client.
    pub region: Option<String>,
    /// `tracing` filter expression applied to the log subscriber.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of the log subscriber.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: default_table_name_string(),
            region: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Checks invariants that the layered sources cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::BlankTableName`] when the table name is
    /// empty or whitespace.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigValidationError::BlankTableName);
        }
        Ok(())
    }

    /// Name of the table holding the items.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    /// Region override, when one was configured and is not blank.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
    }

    /// Filter expression for the log subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format of the log subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Invariant violations detected after the configuration layers merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// The table name resolved to an empty string.
    #[error("table name must not be blank")]
    BlankTableName,
}

impl ConfigValidationError {
    /// Configuration key the violation refers to.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::BlankTableName => "table_name",
        }
    }
}
