//! Monthly price index series and their CSV loader

use crate::error::{ForecastError, Result};
use crate::period::normalize_period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One dated index value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Raw row of a price index file
///
/// Only `Year`, `Period` and `Value` are read; other columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

impl PriceRecord {
    pub fn new(year: impl Into<String>, period: impl Into<String>, value: f64) -> Self {
        Self {
            year: year.into(),
            period: period.into(),
            value,
        }
    }

    /// Normalize into a first-of-month observation
    pub fn to_observation(&self) -> Result<Observation> {
        let date = normalize_period(&self.year, &self.period)?;
        Ok(Observation::new(date, self.value))
    }
}

/// Chronologically ordered history for one material
///
/// Dates are strictly increasing. A series is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series, sorting by date and rejecting duplicate months
    pub fn from_observations(mut observations: Vec<Observation>) -> Result<Self> {
        observations.sort_by_key(|o| o.date);

        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::DataError(format!(
                "Duplicate observation for {}",
                pair[0].date
            )));
        }

        Ok(Self { observations })
    }

    /// Build a series from raw year/period rows
    pub fn from_records(records: &[PriceRecord]) -> Result<Self> {
        let observations = records
            .iter()
            .map(PriceRecord::to_observation)
            .collect::<Result<Vec<_>>>()?;
        Self::from_observations(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Values in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Data loader for price index files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file with `Year`, `Period` and `Value` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Series> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a series from any CSV source
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Series> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<PriceRecord>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        if records.is_empty() {
            return Err(ForecastError::DataError(
                "No rows found in price index data".to_string(),
            ));
        }

        Series::from_records(&records)
    }
}
