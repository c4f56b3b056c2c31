use chrono::{Months, NaiveDate};
use cost_forecast::data::{Observation, Series};
use cost_forecast::{render_state, ChartToggles, DashboardConfig, SeriesCatalog, TimeWindow};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Cost Forecast: Basic Forecasting Example");
    println!("========================================\n");

    // Create sample data
    println!("Creating sample data...");
    let materials = vec![
        ("Aluminum".to_string(), create_sample_series(48, 180.0, 0.004)?),
        ("Lumber and Plywood".to_string(), create_sample_series(30, 320.0, -0.006)?),
    ];

    let config = DashboardConfig::default();
    let catalog = SeriesCatalog::build(materials, &config)?;

    println!("Change summary:");
    for row in catalog.summary_rows() {
        println!(
            "  {:<20} 1m {:>10}  3m {:>10}  6m {:>10}  12m {:>10}",
            row.material, row.monthly, row.quarterly, row.semi_annual, row.annual
        );
    }

    // Forecast with a +/-5% band
    let toggles = ChartToggles {
        show_forecast: true,
        show_range: true,
    };
    let chart = render_state(&catalog, &["Aluminum", "Lumber and Plywood"], TimeWindow::OneYear, toggles)?;

    println!("\n{}", chart.title);
    for trace in &chart.traces {
        println!("\n{} ({})", trace.name, trace.direction);
        if let (Some(forecast), Some(band)) = (&trace.forecast, &trace.band) {
            for (point, bounds) in forecast.iter().zip(band) {
                println!(
                    "  {}: {:.2} ({:.2}, {:.2})",
                    point.date, point.value, bounds.lower, bounds.upper
                );
            }
        }
    }

    Ok(())
}

fn create_sample_series(months: u32, start_value: f64, growth: f64) -> cost_forecast::Result<Series> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();
    let mut value = start_value;
    let mut observations = Vec::with_capacity(months as usize);

    for i in 0..months {
        let date = start.checked_add_months(Months::new(i)).unwrap_or(start);
        observations.push(Observation::new(date, value));
        value *= 1.0 + growth;
    }

    Series::from_observations(observations)
}
