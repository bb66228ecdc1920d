//! Error types for eloquent-modelgen

use thiserror::Error;

/// Result type alias for eloquent-modelgen operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while reading a schema or emitting models
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Database error: {0}")]
    Database(#[from] mysql_async::Error),

    #[error("Failed to decode information schema row: {0}")]
    RowDecode(String),

    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

impl From<sqlparser::parser::ParserError> for GeneratorError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        GeneratorError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for GeneratorError {
    fn from(err: config::ConfigError) -> Self {
        GeneratorError::ConfigError(err.to_string())
    }
}
