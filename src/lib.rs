//! # Material Cost Workspace
//!
//! `material_cost_workspace` bundles the crates behind the material cost
//! dashboard: [`cost_math`] for trailing changes and naive forecasts, and
//! [`cost_forecast`] for series loading, windows, the catalog and chart state.
//!
//! ## Example
//!
//! ```
//! use material_cost_workspace::forecast::{period_to_date, TimeWindow};
//!
//! let anchor = period_to_date(2024, "M06").unwrap();
//! let range = TimeWindow::FiveYears.resolve(anchor, 2026).unwrap();
//! assert_eq!(range.start.to_string(), "2019-06-01");
//! ```

pub use cost_forecast as forecast;
pub use cost_math as math;

pub use cost_forecast::{
    render_state, ChartData, ChartToggles, DashboardConfig, ForecastError, SeriesCatalog, TimeWindow,
};
