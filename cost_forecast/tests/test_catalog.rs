use chrono::{Datelike, Months, NaiveDate};
use cost_forecast::catalog::SeriesCatalog;
use cost_forecast::config::{DashboardConfig, MaterialSource};
use cost_forecast::data::{Observation, Series};
use cost_forecast::error::ForecastError;
use cost_forecast::window::TimeWindow;
use cost_forecast::{Direction, TrailingChanges};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::TempDir;

fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn series_ending(end: NaiveDate, values: &[f64]) -> Series {
    let n = values.len() as u32;
    let start = end.checked_sub_months(Months::new(n - 1)).unwrap();
    let observations = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::new(start.checked_add_months(Months::new(i as u32)).unwrap(), v))
        .collect();
    Series::from_observations(observations).unwrap()
}

fn rising(len: usize) -> Vec<f64> {
    (0..len).map(|i| 100.0 + i as f64).collect()
}

fn test_config() -> DashboardConfig {
    DashboardConfig {
        current_year: Some(2026),
        ..DashboardConfig::default()
    }
}

fn sample_catalog() -> SeriesCatalog {
    let materials = vec![
        ("Aluminum".to_string(), series_ending(date(2025, 6), &rising(36))),
        ("Glass".to_string(), series_ending(date(2024, 12), &rising(18))),
        ("Copper Wire".to_string(), series_ending(date(2025, 3), &rising(12))),
        ("Lumber and Plywood".to_string(), series_ending(date(2025, 3), &rising(6))),
    ];
    SeriesCatalog::build_with_rng(materials, &test_config(), &mut StdRng::seed_from_u64(3)).unwrap()
}

#[test]
fn test_catalog_preserves_order() {
    let catalog = sample_catalog();
    let names: Vec<&str> = catalog.names().collect();

    assert_eq!(names, vec!["Aluminum", "Glass", "Copper Wire", "Lumber and Plywood"]);
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.current_year(), 2026);
}

#[test]
fn test_change_outcomes_by_history_length() {
    let catalog = sample_catalog();

    let aluminum = catalog.get("Aluminum").unwrap();
    assert!(aluminum.changes().is_complete());
    assert_eq!(aluminum.direction(), Direction::Up);

    // Exactly twelve observations: fallback zeros, reported as absent
    let copper = catalog.get("Copper Wire").unwrap();
    assert!(matches!(copper.changes(), TrailingChanges::Incomplete(_)));
    assert_eq!(copper.direction(), Direction::Neutral);
    assert_eq!(catalog.get_change_summary("Copper Wire").unwrap(), None);

    let lumber = catalog.get("Lumber and Plywood").unwrap();
    assert_eq!(*lumber.changes(), TrailingChanges::Insufficient);
    assert_eq!(catalog.get_change_summary("Lumber and Plywood").unwrap(), None);
}

#[test]
fn test_change_summary_values() {
    let catalog = sample_catalog();
    let changes = catalog.get_change_summary("Aluminum").unwrap().unwrap();

    // latest 135, one month back 134
    assert_eq!(changes.monthly, 0.75);
    // twelve months back 123
    assert_eq!(changes.annual, 9.76);
}

#[test]
fn test_forecast_only_for_two_years_of_history() {
    let catalog = sample_catalog();

    let forecast = catalog.get("Aluminum").unwrap().forecast().unwrap();
    assert_eq!(forecast.horizons(), 12);
    assert_eq!(forecast.start(), date(2025, 7));
    assert!(forecast.values().iter().all(|v| v.is_finite()));

    assert!(catalog.get("Glass").unwrap().forecast().is_none());
}

#[test]
fn test_forecast_is_stable_across_reads() {
    let catalog = sample_catalog();
    let anchor = date(2025, 6);

    let first = catalog.get_forecast("Aluminum", TimeWindow::Max, anchor).unwrap();
    let second = catalog.get_forecast("Aluminum", TimeWindow::Max, anchor).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_get_series_uses_given_anchor() {
    let catalog = sample_catalog();

    let one_year = catalog
        .get_series("Aluminum", TimeWindow::OneYear, date(2025, 6))
        .unwrap();
    assert_eq!(one_year.first().map(|o| o.date), Some(date(2024, 6)));
    assert_eq!(one_year.len(), 13);

    let everything = catalog.get_series("Glass", TimeWindow::Max, date(2025, 6)).unwrap();
    assert_eq!(everything.len(), 18);
}

#[test]
fn test_get_forecast_window() {
    let catalog = sample_catalog();

    let points = catalog
        .get_forecast("Aluminum", TimeWindow::FiveYears, date(2025, 6))
        .unwrap()
        .unwrap();
    assert_eq!(points.len(), 12);
    assert_eq!(points.first().map(|o| o.date), Some(date(2025, 7)));
    assert_eq!(points.last().map(|o| o.date), Some(date(2026, 6)));

    // Anchored earlier than the series end, part of the forecast is cut off
    let points = catalog
        .get_forecast("Aluminum", TimeWindow::FiveYears, date(2025, 1))
        .unwrap()
        .unwrap();
    assert_eq!(points.len(), 7);

    assert_eq!(
        catalog.get_forecast("Glass", TimeWindow::Max, date(2025, 6)).unwrap(),
        None
    );
}

#[test]
fn test_unknown_material() {
    let catalog = sample_catalog();
    let err = catalog.get_change_summary("Unobtainium").unwrap_err();
    assert!(matches!(err, ForecastError::UnknownMaterial(name) if name == "Unobtainium"));
}

#[test]
fn test_zero_denominator_is_reported_per_material() {
    let mut values = vec![50.0; 13];
    values[0] = 0.0;
    let materials = vec![
        ("Glass".to_string(), series_ending(date(2024, 1), &values)),
        ("Aluminum".to_string(), series_ending(date(2024, 1), &rising(36))),
    ];

    let catalog = SeriesCatalog::build(materials, &test_config()).unwrap();
    assert_eq!(catalog.len(), 2);

    let err = catalog.get_change_summary("Glass").unwrap_err();
    assert!(matches!(err, ForecastError::DivisionByZero(ref msg) if msg.contains("Glass")));
    let glass = catalog.get("Glass").unwrap();
    assert!(glass.change_error().is_some());
    assert_eq!(glass.direction(), Direction::Neutral);

    assert!(catalog.get_change_summary("Aluminum").unwrap().is_some());
    assert_eq!(catalog.get("Aluminum").unwrap().change_error(), None);

    let rows = catalog.summary_rows();
    assert_eq!(rows[0].annual, "N/A");
    assert_eq!(rows[1].monthly, "0.75% +");
}

#[test]
fn test_build_rejects_invalid_config() {
    let config = DashboardConfig {
        band_width: 1.5,
        ..test_config()
    };
    let materials = vec![("Aluminum".to_string(), series_ending(date(2024, 1), &rising(36)))];

    let err = SeriesCatalog::build(materials, &config).unwrap_err();
    assert!(matches!(err, ForecastError::ConfigError(_)));
}

fn write_csv(dir: &TempDir, file: &str, values: &[String]) {
    let mut out = std::fs::File::create(dir.path().join(file)).unwrap();
    writeln!(out, "Year,Period,Value").unwrap();
    let start = date(2023, 1);
    for (i, value) in values.iter().enumerate() {
        let month = start.checked_add_months(Months::new(i as u32)).unwrap();
        writeln!(out, "{},M{:02},{}", month.year(), month.month(), value).unwrap();
    }
}

#[test]
fn test_bad_values_do_not_sink_other_materials() {
    let dir = TempDir::new().unwrap();
    let good: Vec<String> = rising(30).iter().map(|v| v.to_string()).collect();

    let mut zero = good.clone();
    // Twelve months before the last value
    zero[17] = "0".to_string();
    let mut nan = good.clone();
    nan[29] = "NaN".to_string();

    write_csv(&dir, "good.csv", &good);
    write_csv(&dir, "zero.csv", &zero);
    write_csv(&dir, "nan.csv", &nan);

    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        materials: vec![
            MaterialSource::new("Zero", "zero.csv", "#000000"),
            MaterialSource::new("Nan", "nan.csv", "#111111"),
            MaterialSource::new("Good", "good.csv", "#222222"),
        ],
        ..test_config()
    };

    let catalog = SeriesCatalog::from_config(&config).unwrap();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["Zero", "Nan", "Good"]);

    let good = catalog.get("Good").unwrap();
    assert!(good.changes().is_complete());
    assert!(good.forecast().is_some());
    assert!(catalog.get_change_summary("Good").unwrap().is_some());

    assert!(matches!(
        catalog.get_change_summary("Zero"),
        Err(ForecastError::DivisionByZero(_))
    ));
    // A non-finite last value leaves no forecast seed
    assert!(catalog.get("Nan").unwrap().forecast().is_none());
}

#[test]
fn test_empty_and_duplicate_series_are_dropped() {
    let materials = vec![
        ("Glass".to_string(), series_ending(date(2024, 1), &rising(13))),
        ("Glass".to_string(), series_ending(date(2024, 1), &rising(30))),
        ("Empty".to_string(), Series::from_observations(Vec::new()).unwrap()),
    ];
    let catalog = SeriesCatalog::build(materials, &test_config()).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Glass").unwrap().series().len(), 13);
    assert!(!catalog.contains("Empty"));
}

#[test]
fn test_summary_rows() {
    let catalog = sample_catalog();
    let rows = catalog.summary_rows();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].material, "Aluminum");
    assert_eq!(rows[0].monthly, "0.75% +");
    assert_eq!(rows[2].annual, "0.00% -");
    assert_eq!(rows[3].quarterly, "N/A");
}

#[test]
fn test_from_config_drops_unloadable_materials() {
    let dir = TempDir::new().unwrap();

    let mut good = std::fs::File::create(dir.path().join("good.csv")).unwrap();
    writeln!(good, "Year,Period,Value").unwrap();
    for month in 1..=12 {
        writeln!(good, "2024,M{:02},{}", month, 100 + month).unwrap();
    }
    writeln!(good, "2025,M01,120").unwrap();

    let mut bad = std::fs::File::create(dir.path().join("bad.csv")).unwrap();
    writeln!(bad, "Year,Period,Value").unwrap();
    writeln!(bad, "2024,M99,1.0").unwrap();

    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        materials: vec![
            MaterialSource::new("Bad", "bad.csv", "#000000"),
            MaterialSource::new("Missing", "missing.csv", "#111111"),
            MaterialSource::new("Good", "good.csv", "#222222"),
        ],
        ..test_config()
    };

    let catalog = SeriesCatalog::from_config(&config).unwrap();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["Good"]);

    let changes = catalog.get_change_summary("Good").unwrap().unwrap();
    // 120 vs 101 twelve months earlier
    assert_eq!(changes.annual, 18.81);
}
