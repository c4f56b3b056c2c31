//! # Cost Forecast
//!
//! Analytics behind a material cost dashboard: monthly price index series,
//! trailing percentage changes, a naive forecast with an uncertainty band,
//! and time-window filtering for charts.
//!
//! ## Features
//!
//! - Period normalization (`Year` + `M01`..`M12` into first-of-month dates)
//! - 1/3/6/12-month trailing changes with an up/down/neutral direction
//! - Decaying random-walk forecast, generated once per material
//! - `1yr` / `5yr` / `10yr` / `max` windows sharing one anchor date
//! - Selection of up to five materials with status messages
//!
//! ## Quick Start
//!
//! ```no_run
//! use cost_forecast::{render_state, ChartToggles, DashboardConfig, SeriesCatalog, TimeWindow};
//!
//! let config = DashboardConfig::default();
//! let catalog = SeriesCatalog::from_config(&config)?;
//!
//! for row in catalog.summary_rows() {
//!     println!("{}: {}", row.material, row.annual);
//! }
//!
//! let chart = render_state(
//!     &catalog,
//!     &["Aluminum", "Copper Wire"],
//!     TimeWindow::FiveYears,
//!     ChartToggles::default(),
//! )?;
//! println!("{} ({})", chart.title, chart.selection_message());
//! # Ok::<(), cost_forecast::ForecastError>(())
//! ```

pub mod catalog;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod period;
pub mod window;

// Re-export commonly used types
pub use crate::catalog::{
    ChangeSummaryRow, MaterialEntry, Selection, SelectionStatus, SeriesCatalog,
};
pub use crate::chart::{render_state, ChartData, ChartToggles, MaterialTrace};
pub use crate::config::{DashboardConfig, MaterialSource};
pub use crate::data::{DataLoader, Observation, PriceRecord, Series};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{BandPoint, Forecast};
pub use crate::period::period_to_date;
pub use crate::window::{TimeWindow, WindowRange};
pub use cost_math::{ChangeSet, Direction, TrailingChanges};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
