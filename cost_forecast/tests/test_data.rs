use chrono::NaiveDate;
use cost_forecast::data::{DataLoader, Observation, PriceRecord, Series};
use cost_forecast::error::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "series_id,Year,Period,Value,footnote_codes").unwrap();
    writeln!(file, "WPU1017,2023,M03,310.5,").unwrap();
    writeln!(file, "WPU1017,2023,M01,300.0,").unwrap();
    writeln!(file, "WPU1017,2023,M02,305.25,P").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.first_date(), Some(date(2023, 1)));
    assert_eq!(series.last_date(), Some(date(2023, 3)));
    assert_eq!(series.values(), vec![300.0, 305.25, 310.5]);
}

#[test]
fn test_data_loader_error_handling() {
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid,csv,format").unwrap();
    writeln!(file, "1,2,3").unwrap();
    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::CsvError(_))));
}

#[test]
fn test_empty_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Year,Period,Value").unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_bad_period_in_file() {
    let data = "Year,Period,Value\n2023,M01,1.0\n2023,M13,2.0\n";
    let result = DataLoader::from_reader(data.as_bytes());
    assert!(matches!(result, Err(ForecastError::MalformedPeriod(_))));
}

#[test]
fn test_series_sorts_and_rejects_duplicates() {
    let series = Series::from_observations(vec![
        Observation::new(date(2021, 5), 2.0),
        Observation::new(date(2021, 3), 1.0),
    ])
    .unwrap();
    assert_eq!(series.first_date(), Some(date(2021, 3)));
    assert_eq!(series.latest().map(|o| o.value), Some(2.0));

    let duplicate = Series::from_records(&[
        PriceRecord::new("2021", "M01", 1.0),
        PriceRecord::new("2021", "M01", 1.5),
    ]);
    assert!(matches!(duplicate, Err(ForecastError::DataError(_))));
}

#[test]
fn test_empty_series() {
    let series = Series::from_observations(Vec::new()).unwrap();
    assert!(series.is_empty());
    assert_eq!(series.last_date(), None);
}
