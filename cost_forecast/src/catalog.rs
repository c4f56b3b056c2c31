//! Series catalog and selection policy
//!
//! The catalog is built once from every successfully loaded material and is
//! read-only afterwards. Changes and forecasts are computed at build time, so
//! repeated reads of the same material always see the same forecast.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, Observation, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecast;
use crate::window::{shared_anchor, TimeWindow, WindowRange};
use chrono::{Datelike, NaiveDate, Utc};
use cost_math::{calculate_changes, ChangeSet, Direction, NaiveForecaster, TrailingChanges};
use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

/// Everything known about one material
#[derive(Debug, Clone, Serialize)]
pub struct MaterialEntry {
    name: String,
    series: Series,
    changes: TrailingChanges,
    /// Set when the changes could not be computed for this material
    change_error: Option<String>,
    forecast: Option<Forecast>,
}

impl MaterialEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn changes(&self) -> &TrailingChanges {
        &self.changes
    }

    /// Why the changes could not be computed, if they failed
    pub fn change_error(&self) -> Option<&str> {
        self.change_error.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.changes.direction()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }
}

/// Why a selection ended up the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionStatus {
    /// Nothing usable was requested; the first material was chosen instead
    Defaulted { cap: usize },
    /// Fewer than `cap` materials selected
    Partial { count: usize, cap: usize },
    /// Exactly `cap` materials selected
    Full { cap: usize },
    /// More than `cap` requested; the first `cap` were kept
    Truncated { requested: usize, cap: usize },
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStatus::Defaulted { cap } => {
                write!(f, "Please select at least one material (up to {})", cap)
            }
            SelectionStatus::Partial { count, cap } => {
                write!(f, "{} material(s) selected (select up to {})", count, cap)
            }
            SelectionStatus::Full { cap } => write!(f, "Maximum of {} materials selected", cap),
            SelectionStatus::Truncated { cap, .. } => write!(
                f,
                "Maximum of {} materials reached - showing first {} selected",
                cap, cap
            ),
        }
    }
}

/// Materials chosen for display together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub names: Vec<String>,
    pub status: SelectionStatus,
}

impl Selection {
    pub fn message(&self) -> String {
        self.status.to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One row of the change summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSummaryRow {
    pub material: String,
    pub monthly: String,
    pub quarterly: String,
    pub semi_annual: String,
    pub annual: String,
}

impl ChangeSummaryRow {
    fn new(material: &str, changes: &TrailingChanges) -> Self {
        let marker = changes.direction().marker();
        let cells = match changes.reported() {
            Some(set) => set
                .as_array()
                .map(|value| format!("{:.2}% {}", value, marker)),
            None => std::array::from_fn(|_| "N/A".to_string()),
        };
        let [monthly, quarterly, semi_annual, annual] = cells;

        Self {
            material: material.to_string(),
            monthly,
            quarterly,
            semi_annual,
            annual,
        }
    }
}

/// Read-only collection of materials in configured order
#[derive(Debug, Clone)]
pub struct SeriesCatalog {
    entries: Vec<MaterialEntry>,
    index: HashMap<String, usize>,
    current_year: i32,
    config: DashboardConfig,
}

impl SeriesCatalog {
    /// Load every configured material and build the catalog.
    ///
    /// Files that fail to load are logged and left out.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;

        let mut loaded = Vec::with_capacity(config.materials.len());
        for source in &config.materials {
            let path = config.path_for(source);
            match DataLoader::from_csv(&path) {
                Ok(series) => loaded.push((source.name.clone(), series)),
                Err(e) => warn!(
                    material = %source.name,
                    path = %path.display(),
                    error = %e,
                    "dropping material that failed to load"
                ),
            }
        }

        Self::build(loaded, config)
    }

    /// Build from already loaded series using the thread-local RNG
    pub fn build(materials: Vec<(String, Series)>, config: &DashboardConfig) -> Result<Self> {
        Self::build_with_rng(materials, config, &mut rand::thread_rng())
    }

    /// Build from already loaded series, drawing forecast noise from `rng`.
    ///
    /// A material whose changes or forecast cannot be computed stays in the
    /// catalog without them; only an invalid `config` fails the build.
    pub fn build_with_rng<R: Rng + ?Sized>(
        materials: Vec<(String, Series)>,
        config: &DashboardConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let forecaster = NaiveForecaster::new(config.forecast_periods)?;
        let mut entries = Vec::with_capacity(materials.len());
        let mut index = HashMap::with_capacity(materials.len());

        for (name, series) in materials {
            if series.is_empty() {
                warn!(material = %name, "dropping material with no observations");
                continue;
            }
            if index.contains_key(&name) {
                warn!(material = %name, "dropping duplicate material");
                continue;
            }

            let (changes, change_error) = match calculate_changes(&series.values()) {
                Ok(changes) => (changes, None),
                Err(e) => {
                    warn!(material = %name, error = %e, "trailing changes unavailable");
                    (TrailingChanges::Insufficient, Some(format!("{}: {}", name, e)))
                }
            };

            let forecast = match Forecast::generate(&series, &forecaster, rng) {
                Ok(forecast) => forecast,
                Err(e) => {
                    warn!(material = %name, error = %e, "forecast unavailable");
                    None
                }
            };

            debug!(
                material = %name,
                observations = series.len(),
                direction = %changes.direction(),
                complete_changes = changes.is_complete(),
                forecast = forecast.is_some(),
                "built material entry"
            );

            index.insert(name.clone(), entries.len());
            entries.push(MaterialEntry {
                name,
                series,
                changes,
                change_error,
                forecast,
            });
        }

        info!(materials = entries.len(), "series catalog built");

        Ok(Self {
            entries,
            index,
            current_year: config.current_year.unwrap_or_else(|| Utc::now().year()),
            config: config.clone(),
        })
    }

    /// Replace the year used by the `1yr` window rule
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn entries(&self) -> &[MaterialEntry] {
        &self.entries
    }

    /// Material names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&MaterialEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    fn entry(&self, name: &str) -> Result<&MaterialEntry> {
        self.get(name)
            .ok_or_else(|| ForecastError::UnknownMaterial(name.to_string()))
    }

    /// Computed trailing changes; `None` unless every lookback was available.
    ///
    /// # Errors
    ///
    /// [`ForecastError::DivisionByZero`] if this material has a zero value
    /// where a trailing change needs a denominator.
    pub fn get_change_summary(&self, name: &str) -> Result<Option<ChangeSet>> {
        let entry = self.entry(name)?;
        match &entry.change_error {
            Some(reason) => Err(ForecastError::DivisionByZero(reason.clone())),
            None => Ok(entry.changes.change_set().copied()),
        }
    }

    /// History of `name` inside `window`, resolved against `anchor`
    pub fn get_series(
        &self,
        name: &str,
        window: TimeWindow,
        anchor: NaiveDate,
    ) -> Result<Vec<Observation>> {
        let entry = self.entry(name)?;
        let range = self.resolve_window(window, anchor)?;
        Ok(range.filter(entry.series.observations()))
    }

    /// Forecast of `name` inside `window` extended 12 months past `anchor`
    pub fn get_forecast(
        &self,
        name: &str,
        window: TimeWindow,
        anchor: NaiveDate,
    ) -> Result<Option<Vec<Observation>>> {
        let entry = self.entry(name)?;
        let forecast = match &entry.forecast {
            Some(forecast) => forecast,
            None => return Ok(None),
        };

        let range = self.resolve_window(window, anchor)?;
        Ok(Some(range.filter_forecast(&forecast.points()?)?))
    }

    pub fn resolve_window(&self, window: TimeWindow, anchor: NaiveDate) -> Result<WindowRange> {
        window.resolve(anchor, self.current_year)
    }

    /// Latest end date across the selected materials
    pub fn anchor_for<S: AsRef<str>>(&self, names: &[S]) -> Option<NaiveDate> {
        shared_anchor(
            names
                .iter()
                .filter_map(|n| self.get(n.as_ref()))
                .map(|e| &e.series),
        )
    }

    /// Apply the selection policy with the configured cap
    pub fn select<S: AsRef<str>>(&self, requested: &[S]) -> Selection {
        self.resolve_selection(requested, self.config.selection_cap)
    }

    /// Apply the selection policy.
    ///
    /// Unknown and repeated names are ignored. More than `cap` names are
    /// truncated silently; an empty result falls back to the first material.
    pub fn resolve_selection<S: AsRef<str>>(&self, requested: &[S], cap: usize) -> Selection {
        let cap = cap.max(1);
        let mut seen = HashSet::new();
        let mut names: Vec<String> = Vec::with_capacity(requested.len());

        for name in requested.iter().map(AsRef::as_ref) {
            if !self.contains(name) {
                warn!(material = %name, "ignoring unknown material in selection");
                continue;
            }
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }

        let count = names.len();
        let status = match count {
            0 => {
                names = self.entries.first().map(|e| e.name.clone()).into_iter().collect();
                SelectionStatus::Defaulted { cap }
            }
            n if n > cap => {
                names.truncate(cap);
                SelectionStatus::Truncated { requested: n, cap }
            }
            n if n == cap => SelectionStatus::Full { cap },
            n => SelectionStatus::Partial { count: n, cap },
        };

        Selection { names, status }
    }

    /// Change summary rows in catalog order
    pub fn summary_rows(&self) -> Vec<ChangeSummaryRow> {
        self.entries
            .iter()
            .map(|e| ChangeSummaryRow::new(&e.name, &e.changes))
            .collect()
    }
}
