//! Dashboard configuration
//!
//! Maps material names to their source files and display colors, and holds
//! the tuning knobs for selection, forecasting and windows. Every field has a
//! default, so a JSON file only needs to list what it overrides.

use crate::error::{ForecastError, Result};
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A material and the file its index is read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSource {
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MaterialSource {
    pub fn new(name: &str, file: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
            color: Some(color.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the material files are resolved against
    pub data_dir: PathBuf,
    /// Materials in catalog order
    pub materials: Vec<MaterialSource>,
    /// Most materials shown at once
    pub selection_cap: usize,
    /// Months projected per forecast
    pub forecast_periods: usize,
    /// Relative half-width of the forecast band
    pub band_width: f64,
    /// Window used when none is requested
    pub default_window: TimeWindow,
    /// Overrides the clock's year for the `1yr` rule
    pub current_year: Option<i32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            materials: vec![
                MaterialSource::new("Aluminum", "aluminum_base_scrap.csv", "#1f77b4"),
                MaterialSource::new("Iron and Steel", "iron_and_steel.csv", "#ff7f0e"),
                MaterialSource::new(
                    "Paint and Coating Manufacturing",
                    "paint_and_coating_manufacturing.csv",
                    "#2ca02c",
                ),
                MaterialSource::new("Concrete and Brick", "concrete_brick.csv", "#d62728"),
                MaterialSource::new(
                    "Gypsum Building Materials",
                    "gypsum_building_materials.csv",
                    "#9467bd",
                ),
                MaterialSource::new("Lumber and Plywood", "lumber_and_plywood.csv", "#8c564b"),
                MaterialSource::new("Copper Wire", "copper_wire.csv", "#e377c2"),
                MaterialSource::new("Glass", "glass.csv", "#7f7f7f"),
                MaterialSource::new(
                    "Construction Machinery and Equipment",
                    "construction_machinery_and_equipment.csv",
                    "#bcbd22",
                ),
                MaterialSource::new("Electrical Equipment", "electrical_equipment.csv", "#17becf"),
                MaterialSource::new(
                    "Plastics Plumbing Fixtures",
                    "plastics_plumbing_fixtures.csv",
                    "#aec7e8",
                ),
            ],
            selection_cap: 5,
            forecast_periods: 12,
            band_width: 0.05,
            default_window: TimeWindow::FiveYears,
            current_year: None,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON configuration and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection_cap == 0 {
            return Err(ForecastError::ConfigError(
                "selection_cap must be at least 1".to_string(),
            ));
        }
        if self.forecast_periods == 0 {
            return Err(ForecastError::ConfigError(
                "forecast_periods must be at least 1".to_string(),
            ));
        }
        if !(self.band_width > 0.0 && self.band_width < 1.0) {
            return Err(ForecastError::ConfigError(format!(
                "band_width must be between 0 and 1, got {}",
                self.band_width
            )));
        }
        if self.materials.is_empty() {
            return Err(ForecastError::ConfigError(
                "at least one material must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for material in &self.materials {
            if material.name.trim().is_empty() {
                return Err(ForecastError::ConfigError(
                    "material names must not be empty".to_string(),
                ));
            }
            if !seen.insert(material.name.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "material '{}' is configured twice",
                    material.name
                )));
            }
        }

        Ok(())
    }

    /// Full path of a material's source file
    pub fn path_for(&self, source: &MaterialSource) -> PathBuf {
        self.data_dir.join(&source.file)
    }

    /// Configured color of a material, or one derived from its name
    pub fn color_for(&self, name: &str) -> String {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .and_then(|m| m.color.clone())
            .unwrap_or_else(|| fallback_color(name))
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// `#rrggbb` color derived from a name with 64-bit FNV-1a, so the same name
/// maps to the same color on every toolchain
pub fn fallback_color(name: &str) -> String {
    let hash = name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    format!("#{:06x}", hash & 0xFF_FFFF)
}

/// Translucent fill for a forecast band drawn in `color`
pub fn band_fill(color: &str) -> String {
    if color.starts_with("rgba") {
        return color.replacen(')', ", 0.2)", 1);
    }

    let hex = color.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());

    match (hex.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => format!("rgba({}, {}, {}, 0.2)", r, g, b),
        _ => "rgba(150, 150, 150, 0.2)".to_string(),
    }
}
