use inflation_hub::AnalyticsConfig;
use inflation_hub::analytics::{latest_volatility, level_vs_volatility, rolling_volatility};

use crate::utils::{assert_close, month, monthly_series};

fn config(window: usize) -> AnalyticsConfig {
    AnalyticsConfig {
        volatility_window: window,
        ..AnalyticsConfig::default()
    }
}

#[test]
fn test_minimum_window_yields_no_value() {
    let rows = monthly_series("PER", "Peru", month(2022, 1), &[2.0, 4.0, 6.0, 8.0]);

    let points = rolling_volatility(&rows, &config(3));
    let volatility: Vec<Option<f64>> = points.iter().map(|point| point.volatility).collect();

    assert_eq!(volatility[0], None);
    assert_eq!(volatility[1], None);
    assert_close(volatility[2].unwrap(), 2.0);
    assert_close(volatility[3].unwrap(), 2.0);
}

#[test]
fn test_short_history_never_reports_zero() {
    let rows = monthly_series("BOL", "Bolivia", month(2022, 1), &[3.0, 3.0]);

    let points = rolling_volatility(&rows, &config(12));

    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|point| point.volatility.is_none()));
    assert!(latest_volatility(&rows, &config(12)).is_empty());
}

#[test]
fn test_window_is_trailing() {
    let rows = monthly_series("ECU", "Ecuador", month(2022, 1), &[100.0, 1.0, 2.0, 3.0]);

    let points = rolling_volatility(&rows, &config(3));

    assert_close(points[3].volatility.unwrap(), 1.0);
    assert_eq!(points[3].period, month(2022, 4));
}

#[test]
fn test_level_vs_volatility_joins_latest_values() {
    let mut rows = monthly_series("COL", "Colombia", month(2022, 1), &[5.0, 7.0, 9.0]);
    rows.extend(monthly_series("URY", "Uruguay", month(2022, 1), &[8.0, 8.0, 11.0]));
    rows.extend(monthly_series("PRY", "Paraguay", month(2022, 2), &[4.0, 6.0]));

    let profiles = level_vs_volatility(&rows, month(2022, 3), &config(3));
    let labels: Vec<&str> = profiles.iter().map(|p| p.area_label.as_str()).collect();

    assert_eq!(labels, vec!["Uruguay", "Colombia"]);
    assert_close(profiles[1].volatility, 2.0);
}
