//! Time-window resolution and filtering
//!
//! Windows are resolved against a single anchor date shared by every plotted
//! series, so multi-series charts line up on a common range.

use crate::data::{Observation, Series};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far forecast points may run past the anchor
pub const FORECAST_HORIZON_MONTHS: u32 = 12;

/// Start of the `max` window, regardless of the data's own first date
pub fn max_window_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Requested look-back window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1yr")]
    OneYear,
    #[default]
    #[serde(rename = "5yr")]
    FiveYears,
    #[serde(rename = "10yr")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::OneYear,
        TimeWindow::FiveYears,
        TimeWindow::TenYears,
        TimeWindow::Max,
    ];

    /// Tag used in requests and configuration
    pub fn tag(&self) -> &'static str {
        match self {
            TimeWindow::OneYear => "1yr",
            TimeWindow::FiveYears => "5yr",
            TimeWindow::TenYears => "10yr",
            TimeWindow::Max => "max",
        }
    }

    /// Resolve into a concrete date range ending at `anchor`.
    ///
    /// `current_year` only matters for [`TimeWindow::OneYear`]: an anchor in
    /// the current year starts the window on January 1st of that year.
    pub fn resolve(self, anchor: NaiveDate, current_year: i32) -> Result<WindowRange> {
        let start = match self {
            TimeWindow::OneYear if anchor.year() == current_year => {
                NaiveDate::from_ymd_opt(current_year, 1, 1).ok_or_else(|| {
                    ForecastError::InvalidParameter(format!("Invalid year {}", current_year))
                })?
            }
            TimeWindow::OneYear => years_before(anchor, 1)?,
            TimeWindow::FiveYears => years_before(anchor, 5)?,
            TimeWindow::TenYears => years_before(anchor, 10)?,
            TimeWindow::Max => max_window_floor(),
        };

        Ok(WindowRange { start, end: anchor })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for TimeWindow {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1yr" => Ok(TimeWindow::OneYear),
            "5yr" => Ok(TimeWindow::FiveYears),
            "10yr" => Ok(TimeWindow::TenYears),
            "max" => Ok(TimeWindow::Max),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unsupported time window: {}",
                other
            ))),
        }
    }
}

fn years_before(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(12 * years))
        .ok_or_else(|| {
            ForecastError::DataError(format!("{} minus {} years is out of range", date, years))
        })
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WindowRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Range for forecast points: same start, end pushed 12 months past the anchor
    pub fn forecast_range(&self) -> Result<WindowRange> {
        let end = self
            .end
            .checked_add_months(Months::new(FORECAST_HORIZON_MONTHS))
            .ok_or_else(|| {
                ForecastError::DataError(format!("{} plus 12 months is out of range", self.end))
            })?;
        Ok(WindowRange {
            start: self.start,
            end,
        })
    }

    /// Observations falling inside the range, order preserved
    pub fn filter(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|o| self.contains(o.date))
            .copied()
            .collect()
    }

    /// Forecast points falling inside [`WindowRange::forecast_range`]
    pub fn filter_forecast(&self, points: &[Observation]) -> Result<Vec<Observation>> {
        Ok(self.forecast_range()?.filter(points))
    }
}

/// Latest end date across a group of series; `None` when all are empty
pub fn shared_anchor<'a, I>(series: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a Series>,
{
    series.into_iter().filter_map(Series::last_date).max()
}
