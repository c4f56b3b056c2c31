//! Naive forecasting for monthly price indices
//!
//! The forecaster is a placeholder extrapolation rather than a fitted model:
//! starting from the last observed value it chains forward, applying a small
//! linear decay and Gaussian noise at each step.

use crate::{MathError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Minimum history required before a forecast is produced
pub const MIN_FORECAST_OBSERVATIONS: usize = 24;

/// Number of trailing observations the forecast is anchored to
pub const FORECAST_WINDOW: usize = 24;

/// Default number of projected periods
pub const DEFAULT_FORECAST_PERIODS: usize = 12;

/// Decaying random-walk forecaster
#[derive(Debug, Clone)]
pub struct NaiveForecaster {
    periods: usize,
    decay_per_step: f64,
    noise_std_dev: f64,
}

impl Default for NaiveForecaster {
    fn default() -> Self {
        Self {
            periods: DEFAULT_FORECAST_PERIODS,
            decay_per_step: 0.005,
            noise_std_dev: 0.01,
        }
    }
}

impl NaiveForecaster {
    /// Create a forecaster projecting `periods` steps ahead
    pub fn new(periods: usize) -> Result<Self> {
        if periods == 0 {
            return Err(MathError::InvalidInput(
                "Forecast periods must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            periods,
            ..Self::default()
        })
    }

    /// Override the standard deviation of the per-step noise
    pub fn with_noise(mut self, std_dev: f64) -> Result<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Noise standard deviation must be finite and non-negative, got {}",
                std_dev
            )));
        }
        self.noise_std_dev = std_dev;
        Ok(self)
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn noise_std_dev(&self) -> f64 {
        self.noise_std_dev
    }

    /// Trend applied at step `i`: `-0.005 * i` with the default decay
    pub fn trend(&self, step: usize) -> f64 {
        -self.decay_per_step * step as f64
    }

    /// Forecast using the thread-local random number generator
    pub fn forecast(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.forecast_with_rng(values, &mut rand::thread_rng())
    }

    /// Forecast drawing noise from `rng`.
    ///
    /// Each projected value is derived from the previous projection, not from
    /// the last observation.
    ///
    /// # Errors
    ///
    /// [`MathError::InsufficientData`] when fewer than
    /// [`MIN_FORECAST_OBSERVATIONS`] values are given, and
    /// [`MathError::InvalidInput`] when the last value is not finite.
    pub fn forecast_with_rng<R: Rng + ?Sized>(
        &self,
        values: &[f64],
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        if values.len() < MIN_FORECAST_OBSERVATIONS {
            return Err(MathError::InsufficientData(format!(
                "Need at least {} observations to forecast, have {}",
                MIN_FORECAST_OBSERVATIONS,
                values.len()
            )));
        }

        let recent = &values[values.len() - FORECAST_WINDOW..];
        let mut current = recent[recent.len() - 1];
        if !current.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Last observed value must be finite, got {}",
                current
            )));
        }

        let noise = Normal::new(0.0, self.noise_std_dev)
            .map_err(|e| MathError::InvalidInput(format!("Invalid noise distribution: {}", e)))?;

        let mut projected = Vec::with_capacity(self.periods);
        for step in 0..self.periods {
            current *= 1.0 + self.trend(step) + noise.sample(rng);
            projected.push(current);
        }

        Ok(projected)
    }
}

/// Symmetric percentage band around forecast values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBand {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ForecastBand {
    /// Band of `width` (0.05 = ±5%) around each value
    pub fn around(values: &[f64], width: f64) -> Result<Self> {
        if !(width > 0.0 && width < 1.0) {
            return Err(MathError::InvalidInput(format!(
                "Band width must be between 0 and 1, got {}",
                width
            )));
        }

        let (lower, upper) = values
            .iter()
            .map(|&v| {
                let a = v * (1.0 - width);
                let b = v * (1.0 + width);
                (a.min(b), a.max(b))
            })
            .unzip();

        Ok(Self { lower, upper })
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}
