//! Conversion of `Year` / `Period` fields into month dates
//!
//! Price index files identify months by a year and a period code such as
//! `M01` through `M12`.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Parse a period code (`M01`..`M12`) into a month number
pub fn parse_period(period: &str) -> Result<u32> {
    let trimmed = period.trim();
    let digits = trimmed
        .strip_prefix('M')
        .ok_or_else(|| {
            ForecastError::MalformedPeriod(format!("'{}' does not start with 'M'", period))
        })?;

    let month: u32 = digits
        .parse()
        .map_err(|_| ForecastError::MalformedPeriod(format!("'{}' has no numeric month", period)))?;

    if !(1..=12).contains(&month) {
        return Err(ForecastError::MalformedPeriod(format!(
            "'{}' is outside M01..M12",
            period
        )));
    }

    Ok(month)
}

/// Parse a year field
pub fn parse_year(year: &str) -> Result<i32> {
    year.trim()
        .parse()
        .map_err(|_| ForecastError::MalformedPeriod(format!("'{}' is not a valid year", year)))
}

/// First calendar day of the given year and period code
pub fn period_to_date(year: i32, period: &str) -> Result<NaiveDate> {
    let month = parse_period(period)?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| {
            ForecastError::MalformedPeriod(format!("{} {} is not a valid date", year, period))
        })
}

/// Same as [`period_to_date`] but with the year still in text form
pub fn normalize_period(year: &str, period: &str) -> Result<NaiveDate> {
    period_to_date(parse_year(year)?, period)
}
