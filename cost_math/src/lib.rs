//! # Cost Math
//!
//! Numeric building blocks for material price index analysis.
//! This crate works on plain value slices ordered oldest to newest and knows
//! nothing about dates or files.
//!
//! - [`changes`]: 1/3/6/12-month trailing percentage changes and direction
//! - [`forecasting`]: naive decaying random-walk forecast and its band

use thiserror::Error;

pub mod changes;
pub mod forecasting;

pub use changes::{calculate_changes, ChangeSet, Direction, TrailingChanges};
pub use forecasting::{ForecastBand, NaiveForecaster};

/// Errors that can occur in price index calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Division by zero: value {lookback} month(s) back is zero")]
    DivisionByZero { lookback: usize },
}

/// Result type for price index calculations
pub type Result<T> = std::result::Result<T, MathError>;

/// Round a value to the given number of decimal places, ties to even
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
