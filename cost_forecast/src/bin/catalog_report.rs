use cost_forecast::{render_state, ChartToggles, DashboardConfig, SeriesCatalog};
use tracing_subscriber::EnvFilter;

fn print_summary(catalog: &SeriesCatalog) {
    println!(
        "{:<40} {:>12} {:>12} {:>12} {:>12}",
        "Material", "Monthly", "Quarterly", "Semi-Annual", "Annual"
    );
    for row in catalog.summary_rows() {
        println!(
            "{:<40} {:>12} {:>12} {:>12} {:>12}",
            row.material, row.monthly, row.quarterly, row.semi_annual, row.annual
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };

    println!("Material Price Change Summary");
    println!("=============================");

    let catalog = SeriesCatalog::from_config(&config)?;
    if catalog.is_empty() {
        println!("No material data could be loaded from {}", config.data_dir.display());
        return Ok(());
    }
    print_summary(&catalog);

    let first: Vec<&str> = catalog.names().take(1).collect();
    let chart = render_state(&catalog, &first, config.default_window, ChartToggles::default())?;

    println!("\n{} [{}]", chart.title, chart.window);
    println!("{}", chart.selection_message());
    if let Some(range) = chart.range {
        println!("Range: {} to {}", range.start, range.end);
    }
    for trace in &chart.traces {
        let forecast_points = trace.forecast.as_ref().map_or(0, Vec::len);
        println!(
            "  {}: {} historical points, {} forecast points ({})",
            trace.name,
            trace.history.len(),
            forecast_points,
            trace.direction
        );
    }

    Ok(())
}
