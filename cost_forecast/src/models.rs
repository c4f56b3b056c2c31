//! Dated forecasts for material series

use crate::data::{Observation, Series};
use crate::error::{ForecastError, Result};
use chrono::{Months, NaiveDate};
use cost_math::{ForecastBand, MathError, NaiveForecaster};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Projected values for the months following a series' last date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Date of the first projected value, one month after the last observation
    start: NaiveDate,
    /// Projected values in order
    values: Vec<f64>,
}

/// One dated point of the band around a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub date: NaiveDate,
    pub lower: f64,
    pub upper: f64,
}

impl Forecast {
    /// Create a forecast starting on `start`
    pub fn new(start: NaiveDate, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::ValidationError(
                "Forecast must contain at least one value".to_string(),
            ));
        }
        Ok(Self { start, values })
    }

    /// Project `series` forward.
    ///
    /// Returns `Ok(None)` when the series is too short to forecast.
    pub fn generate<R: Rng + ?Sized>(
        series: &Series,
        forecaster: &NaiveForecaster,
        rng: &mut R,
    ) -> Result<Option<Self>> {
        let last_date = match series.last_date() {
            Some(date) => date,
            None => return Ok(None),
        };

        let values = match forecaster.forecast_with_rng(&series.values(), rng) {
            Ok(values) => values,
            Err(MathError::InsufficientData(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let start = add_months(last_date, 1)?;
        Ok(Some(Self::new(start, values)?))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.values.len()
    }

    /// Month dates of each projected value
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        (0..self.values.len())
            .map(|i| add_months(self.start, i as u32))
            .collect()
    }

    /// Projected values paired with their dates
    pub fn points(&self) -> Result<Vec<Observation>> {
        Ok(self
            .dates()?
            .into_iter()
            .zip(self.values.iter())
            .map(|(date, &value)| Observation::new(date, value))
            .collect())
    }
}

/// Band of `width` around already dated forecast points
pub fn band_for(points: &[Observation], width: f64) -> Result<Vec<BandPoint>> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let band = ForecastBand::around(&values, width)?;

    Ok(points
        .iter()
        .zip(band.lower.iter().zip(band.upper.iter()))
        .map(|(p, (&lower, &upper))| BandPoint {
            date: p.date,
            lower,
            upper,
        })
        .collect())
}

pub(crate) fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| {
            ForecastError::DataError(format!("{} plus {} months is out of range", date, months))
        })
}
