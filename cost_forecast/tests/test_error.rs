use cost_forecast::error::ForecastError;
use cost_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
    assert!(matches!(ForecastError::from(json_error), ForecastError::JsonError(_)));
}

#[test]
fn test_math_error_mapping() {
    let insufficient = ForecastError::from(MathError::InsufficientData("need 24".to_string()));
    assert!(matches!(insufficient, ForecastError::InsufficientHistory(ref msg) if msg == "need 24"));

    let zero = ForecastError::from(MathError::DivisionByZero { lookback: 3 });
    match zero {
        ForecastError::DivisionByZero(msg) => assert!(msg.contains("3 month(s) back")),
        other => panic!("Expected DivisionByZero, got {:?}", other),
    }

    let invalid = ForecastError::from(MathError::InvalidInput("bad".to_string()));
    assert!(matches!(invalid, ForecastError::MathError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::MalformedPeriod("'M13' is outside M01..M12".to_string());
    assert_eq!(error.to_string(), "Malformed period: 'M13' is outside M01..M12");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
