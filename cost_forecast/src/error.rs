//! Error types for the cost_forecast crate

use cost_math::MathError;
use thiserror::Error;

/// Custom error types for the cost_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Year or period field that cannot be turned into a month
    #[error("Malformed period: {0}")]
    MalformedPeriod(String),

    /// Not enough observations for a calculation
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// A historical value used as a denominator is zero
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter or result validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Material name not present in the catalog
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Invalid dashboard configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON parsing
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => ForecastError::InsufficientHistory(msg),
            MathError::DivisionByZero { .. } => ForecastError::DivisionByZero(err.to_string()),
            other => ForecastError::MathError(other.to_string()),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
