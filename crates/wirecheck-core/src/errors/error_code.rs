//! ErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code that reporting layers can group on.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const MISSING_MODULE: &str = "MISSING_MODULE";
pub const UNBALANCED_DELIMITER: &str = "UNBALANCED_DELIMITER";
pub const UNTERMINATED_COMMENT: &str = "UNTERMINATED_COMMENT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
