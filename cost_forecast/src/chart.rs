//! Chart state for the presentation layer
//!
//! [`render_state`] is the single entry point a UI calls whenever the
//! selection, window or toggles change. It returns plain data; drawing it is
//! somebody else's job.

use crate::catalog::{Selection, SeriesCatalog};
use crate::config::band_fill;
use crate::data::Observation;
use crate::error::Result;
use crate::models::{band_for, BandPoint};
use crate::window::{TimeWindow, WindowRange};
use cost_math::Direction;
use serde::{Deserialize, Serialize};

/// Title used when more than three materials are shown
pub const DEFAULT_TITLE: &str = "National Material Costs";

/// Optional chart layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartToggles {
    pub show_forecast: bool,
    pub show_range: bool,
}

impl Default for ChartToggles {
    fn default() -> Self {
        Self {
            show_forecast: true,
            show_range: false,
        }
    }
}

/// Everything drawn for one material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialTrace {
    pub name: String,
    pub color: String,
    pub direction: Direction,
    pub history: Vec<Observation>,
    /// Forecast points inside the extended window, if any are shown
    pub forecast: Option<Vec<Observation>>,
    pub band: Option<Vec<BandPoint>>,
    pub band_fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub window: TimeWindow,
    /// `None` only when nothing could be selected
    pub range: Option<WindowRange>,
    pub selection: Selection,
    pub traces: Vec<MaterialTrace>,
}

impl ChartData {
    pub fn selection_message(&self) -> String {
        self.selection.message()
    }
}

/// Chart title for the selected materials
pub fn chart_title<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() || names.len() > 3 {
        return DEFAULT_TITLE.to_string();
    }
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("{} - Cost Trends", joined.join(", "))
}

/// Compute the full chart state for one interaction
pub fn render_state<S: AsRef<str>>(
    catalog: &SeriesCatalog,
    requested: &[S],
    window: TimeWindow,
    toggles: ChartToggles,
) -> Result<ChartData> {
    let selection = catalog.select(requested);
    let title = chart_title(&selection.names);

    let anchor = match catalog.anchor_for(&selection.names) {
        Some(anchor) => anchor,
        None => {
            return Ok(ChartData {
                title,
                window,
                range: None,
                selection,
                traces: Vec::new(),
            })
        }
    };

    let range = catalog.resolve_window(window, anchor)?;
    let band_width = catalog.config().band_width;
    let mut traces = Vec::with_capacity(selection.len());

    for name in &selection.names {
        let entry = match catalog.get(name) {
            Some(entry) => entry,
            None => continue,
        };
        let color = catalog.config().color_for(name);

        let forecast = if toggles.show_forecast {
            catalog
                .get_forecast(name, window, anchor)?
                .filter(|points| !points.is_empty())
        } else {
            None
        };

        let band = match (&forecast, toggles.show_range) {
            (Some(points), true) => Some(band_for(points, band_width)?),
            _ => None,
        };
        let fill = band.as_ref().map(|_| band_fill(&color));

        traces.push(MaterialTrace {
            name: name.clone(),
            direction: entry.direction(),
            history: range.filter(entry.series().observations()),
            forecast,
            band,
            band_fill: fill,
            color,
        });
    }

    Ok(ChartData {
        title,
        window,
        range: Some(range),
        selection,
        traces,
    })
}
