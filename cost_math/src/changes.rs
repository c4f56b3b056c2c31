//! Trailing percentage change calculations
//!
//! Compares the latest value of a monthly series against the values 1, 3, 6
//! and 12 months earlier. Values are expected oldest first.

use crate::{round_to, MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of observations before changes are attempted
pub const MIN_CHANGE_OBSERVATIONS: usize = 12;

/// Lookbacks in months for monthly, quarterly, semi-annual and annual changes
pub const LOOKBACKS: [usize; 4] = [1, 3, 6, 12];

/// Direction of a series, derived from its annual change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    /// Changes could not be computed
    Neutral,
}

impl Direction {
    /// Classify an annual change; zero counts as up
    pub fn from_annual_change(annual: f64) -> Self {
        if annual >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Marker used in change summary tables
    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Up => "+",
            Direction::Down | Direction::Neutral => "-",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Neutral => "neutral",
        };
        write!(f, "{}", label)
    }
}

/// Percentage changes at the four trailing horizons, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeSet {
    pub monthly: f64,
    pub quarterly: f64,
    pub semi_annual: f64,
    pub annual: f64,
}

impl ChangeSet {
    /// All four changes set to zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Changes in lookback order (1, 3, 6, 12 months)
    pub fn as_array(&self) -> [f64; 4] {
        [self.monthly, self.quarterly, self.semi_annual, self.annual]
    }
}

/// Outcome of a change calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "changes", rename_all = "snake_case")]
pub enum TrailingChanges {
    /// Fewer than [`MIN_CHANGE_OBSERVATIONS`] values
    Insufficient,
    /// Enough values to try, but a lookback fell off the start of the series.
    /// Always carries an all-zero set.
    Incomplete(ChangeSet),
    /// Every lookback was available
    Complete(ChangeSet),
}

impl TrailingChanges {
    /// Direction flag; neutral unless the changes are complete
    pub fn direction(&self) -> Direction {
        match self {
            TrailingChanges::Complete(changes) => Direction::from_annual_change(changes.annual),
            TrailingChanges::Insufficient | TrailingChanges::Incomplete(_) => Direction::Neutral,
        }
    }

    /// The computed change set, if every lookback was available
    pub fn change_set(&self) -> Option<&ChangeSet> {
        match self {
            TrailingChanges::Complete(changes) => Some(changes),
            _ => None,
        }
    }

    /// The values shown to a reader: computed or fallback zeros
    pub fn reported(&self) -> Option<ChangeSet> {
        match self {
            TrailingChanges::Complete(changes) | TrailingChanges::Incomplete(changes) => {
                Some(*changes)
            }
            TrailingChanges::Insufficient => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TrailingChanges::Complete(_))
    }
}

/// Percentage change from `previous` to `latest`, rounded to 2 decimals
pub fn percent_change(latest: f64, previous: f64, lookback: usize) -> Result<f64> {
    if previous == 0.0 {
        return Err(MathError::DivisionByZero { lookback });
    }
    Ok(round_to((latest - previous) / previous * 100.0, 2))
}

/// Calculate trailing changes for a chronologically sorted series.
///
/// A series with exactly [`MIN_CHANGE_OBSERVATIONS`] values cannot reach back
/// 12 months, so it yields [`TrailingChanges::Incomplete`] rather than a
/// partial set.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] when a historical value used as a
/// denominator is zero.
pub fn calculate_changes(values: &[f64]) -> Result<TrailingChanges> {
    if values.len() < MIN_CHANGE_OBSERVATIONS {
        return Ok(TrailingChanges::Insufficient);
    }

    let n = values.len();
    if LOOKBACKS.iter().any(|&k| k >= n) {
        return Ok(TrailingChanges::Incomplete(ChangeSet::zero()));
    }

    let latest = values[n - 1];
    let mut computed = [0.0; 4];
    for (slot, &k) in computed.iter_mut().zip(LOOKBACKS.iter()) {
        *slot = percent_change(latest, values[n - 1 - k], k)?;
    }

    Ok(TrailingChanges::Complete(ChangeSet {
        monthly: computed[0],
        quarterly: computed[1],
        semi_annual: computed[2],
        annual: computed[3],
    }))
}
