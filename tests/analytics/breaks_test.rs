use inflation_hub::AnalyticsConfig;
use inflation_hub::analytics::detect_breaks;

use crate::utils::{assert_close, month, monthly_series, observation};

fn config(window: u32) -> AnalyticsConfig {
    AnalyticsConfig {
        break_window: window,
        ..AnalyticsConfig::default()
    }
}

#[test]
fn test_level_shift_is_top_ranked() {
    let mut values = vec![5.0; 6];
    values.extend([15.0; 6]);
    let mut rows = monthly_series("ARG", "Argentina", month(2020, 1), &values);
    rows.extend(monthly_series(
        "CHL",
        "Chile",
        month(2020, 1),
        &[3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0],
    ));

    let breaks = detect_breaks(&rows, month(2020, 12), &config(6));

    assert_eq!(breaks.len(), 2);
    let top = &breaks[0];
    assert_eq!(top.country, "Argentina");
    assert_close(top.shift, 10.0);
    assert_close(top.current_avg, 15.0);
    assert_close(top.previous_avg, 5.0);
    assert_eq!(top.period_label(), "Δ6m");
}

#[test]
fn test_ranking_uses_absolute_shift() {
    let mut rows = monthly_series("AAA", "Rising", month(2021, 1), &[1.0, 1.0, 5.0, 5.0]);
    rows.extend(monthly_series("BBB", "Falling", month(2021, 1), &[12.0, 12.0, 4.0, 4.0]));

    let breaks = detect_breaks(&rows, month(2021, 4), &config(2));
    let order: Vec<(&str, f64)> = breaks.iter().map(|b| (b.country.as_str(), b.shift)).collect();

    assert_eq!(order, vec![("Falling", -8.0), ("Rising", 4.0)]);
}

#[test]
fn test_country_without_previous_window_is_skipped() {
    let mut rows = monthly_series("OLD", "Veteran", month(2021, 1), &[2.0, 2.0, 3.0, 3.0]);
    rows.extend(monthly_series("NEW", "Newcomer", month(2021, 3), &[9.0, 9.0]));

    let breaks = detect_breaks(&rows, month(2021, 4), &config(2));

    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].country, "Veteran");
}

#[test]
fn test_windows_are_calendar_months() {
    // December sits outside (Dec, Feb]; a row-count window would pick it up.
    let rows = vec![
        observation("GAP", "Gappy", month(2020, 12), 1.0),
        observation("GAP", "Gappy", month(2021, 2), 2.0),
        observation("GAP", "Gappy", month(2021, 4), 6.0),
    ];

    let breaks = detect_breaks(&rows, month(2021, 4), &config(2));

    assert_eq!(breaks.len(), 1);
    assert_close(breaks[0].current_avg, 6.0);
    assert_close(breaks[0].previous_avg, 2.0);
}

#[test]
fn test_no_data_yields_no_breaks() {
    assert!(detect_breaks(&[], month(2021, 4), &config(6)).is_empty());

    let rows = monthly_series("USA", "United States", month(2010, 1), &[1.0, 2.0]);
    assert!(detect_breaks(&rows, month(2021, 4), &config(6)).is_empty());
}
