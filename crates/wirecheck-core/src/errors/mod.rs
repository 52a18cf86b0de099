//! Error handling for wirecheck.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod parse_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
