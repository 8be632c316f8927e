use crate::logging::LogFormat;

/// Table used when no `TABLE_NAME` is configured.
pub const DEFAULT_TABLE_NAME: &str = "Usuarios";

/// Default log filter expression used by the function.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default table name.
#[must_use]
pub fn default_table_name() -> &'static str {
    DEFAULT_TABLE_NAME
}

/// Owned table name used where allocation is required (e.g. serde).
#[must_use]
pub fn default_table_name_string() -> String {
    DEFAULT_TABLE_NAME.to_owned()
}

/// Default log filter expression.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format. Lambda ships stderr to a log group, so structured
/// JSON is the natural default.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}
