use inflation_hub::analytics::filter::period_slice;
use inflation_hub::analytics::regional::share_percent;
use inflation_hub::analytics::{
    anomaly_radar, concentration_table, hotspot_share, persistence_ranking, region_drill_table,
    region_kpis, regional_averages, regional_hotspots, threshold_share_by_region,
};
use inflation_hub::{AnalyticsConfig, Observation, Region};

use crate::utils::{assert_close, month, monthly_series, observation};

fn latin_america_and_europe() -> Vec<Observation> {
    let period = month(2023, 3);
    vec![
        observation("ARG", "Argentina", period, 104.3),
        observation("BRA", "Brazil", period, 4.7),
        observation("CHL", "Chile", period, 11.1),
        observation("MEX", "Mexico", period, 6.9),
        observation("DEU", "Germany", period, 7.4),
        observation("FRA", "France", period, 5.7),
    ]
}

#[test]
fn test_regional_hotspot_counts() {
    let hotspots = regional_hotspots(&latin_america_and_europe(), month(2023, 3), 10.0);

    assert_eq!(hotspots.len(), 2);
    let latam = hotspots
        .iter()
        .find(|h| h.region == Region::LatinAmericaCaribbean)
        .unwrap();
    assert_eq!((latam.countries, latam.hotspots), (4, 2));
    assert_close(latam.share, 50.0);

    let europe = hotspots
        .iter()
        .find(|h| h.region == Region::EuropeCentralAsia)
        .unwrap();
    assert_eq!((europe.countries, europe.hotspots), (2, 0));
    assert_close(europe.share, 0.0);
}

#[test]
fn test_threshold_is_inclusive() {
    let rows = vec![observation("USA", "United States", month(2023, 3), 10.0)];
    let hotspots = regional_hotspots(&rows, month(2023, 3), 10.0);
    assert_close(hotspots[0].share, 100.0);
}

#[test]
fn test_region_without_countries_has_zero_share() {
    assert!(regional_hotspots(&latin_america_and_europe(), month(1999, 1), 10.0).is_empty());

    let share = share_percent(0, 0);
    assert!(share.is_finite());
    assert_close(share, 0.0);

    let rows = latin_america_and_europe();
    let empty = period_slice(&rows, month(1999, 1));
    assert_close(hotspot_share(&empty, 10.0), 0.0);
}

#[test]
fn test_hotspot_share_counts_distinct_countries() {
    let rows = latin_america_and_europe();
    let slice = period_slice(&rows, month(2023, 3));
    assert_close(hotspot_share(&slice, 7.0), 50.0);
}

#[test]
fn test_regional_averages_sorted() {
    let averages = regional_averages(&latin_america_and_europe(), month(2023, 3));

    assert_eq!(averages[0].0, Region::LatinAmericaCaribbean);
    assert_close(averages[0].1, (104.3 + 4.7 + 11.1 + 6.9) / 4.0);
    assert_eq!(averages[1].0, Region::EuropeCentralAsia);
    assert_close(averages[1].1, 6.55);
}

#[test]
fn test_threshold_tracker_is_a_fraction() {
    let shares = threshold_share_by_region(&latin_america_and_europe(), 5.0);

    assert_eq!(shares[0], (Region::EuropeCentralAsia, 1.0));
    assert_eq!(shares[1], (Region::LatinAmericaCaribbean, 0.75));
}

#[test]
fn test_persistence_and_concentration() {
    let mut rows = monthly_series("TUR", "Turkiye", month(2022, 1), &[48.7, 54.4, 61.1, 70.0]);
    rows.extend(monthly_series("POL", "Poland", month(2022, 1), &[9.4, 8.5, 11.0, 12.4]));
    rows.extend(monthly_series("CHE", "Switzerland", month(2022, 1), &[1.6, 2.2, 2.4, 2.5]));

    let config = AnalyticsConfig {
        persistence_limit: 2,
        ..AnalyticsConfig::default()
    };
    let ranking = persistence_ranking(&rows, 10.0, &config);
    assert_eq!(
        ranking,
        vec![("Turkiye".to_string(), 4), ("Poland".to_string(), 2)]
    );

    let table = concentration_table(&rows, 10.0);
    let shares: Vec<(&str, f64)> = table
        .iter()
        .map(|row| (row.country.as_str(), row.share_above))
        .collect();
    assert_eq!(
        shares,
        vec![("Turkiye", 100.0), ("Poland", 50.0), ("Switzerland", 0.0)]
    );
    assert_eq!(table[0].region, Region::EuropeCentralAsia);
}

/// Twelve months oscillating between 2.0 and 2.2 through 2023, then `latest` in January 2024
fn steady_then(code: &str, label: &str, latest: f64) -> Vec<Observation> {
    let mut values: Vec<f64> = (0..12).map(|i| if i % 2 == 0 { 2.0 } else { 2.2 }).collect();
    values.push(latest);
    monthly_series(code, label, month(2023, 1), &values)
}

#[test]
fn test_anomaly_radar_flags_spikes_and_cooldowns() {
    let mut rows = steady_then("DEU", "Germany", 6.0);
    rows.extend(steady_then("AUT", "Austria", 3.2));
    rows.extend(steady_then("FRA", "France", -2.0));
    rows.extend(steady_then("ITA", "Italy", 2.1));
    rows.push(observation("ESP", "Spain", month(2024, 1), 40.0));
    rows.extend(monthly_series("POL", "Poland", month(2020, 1), &[1.0, 30.0]));
    rows.extend(monthly_series("POL", "Poland", month(2023, 11), &[3.0, 3.0, 3.0]));

    let radar = anomaly_radar(&rows, month(2024, 1));

    let hot: Vec<&str> = radar.hot.iter().map(|a| a.country.as_str()).collect();
    assert_eq!(hot, vec!["Germany", "Austria"]);
    assert_close(radar.hot[0].z_score, 3.6 / (14.16_f64 / 12.0).sqrt());
    assert_eq!(radar.hot[0].region, Region::EuropeCentralAsia);
    assert_close(radar.hot[0].value, 6.0);

    assert_eq!(radar.cooling.len(), 1);
    assert_eq!(radar.cooling[0].country, "France");
    assert!(radar.cooling[0].z_score <= -2.0);
}

#[test]
fn test_anomaly_radar_needs_history() {
    let rows = vec![observation("ESP", "Spain", month(2024, 1), 40.0)];
    assert!(anomaly_radar(&rows, month(2024, 1)).is_empty());
    assert!(anomaly_radar(&steady_then("DEU", "Germany", 6.0), month(2030, 1)).is_empty());
}

#[test]
fn test_region_kpis_against_global() {
    let europe = vec![
        observation("DEU", "Germany", month(2023, 12), 8.0),
        observation("DEU", "Germany", month(2024, 1), 12.0),
        observation("FRA", "France", month(2023, 12), 6.0),
        observation("FRA", "France", month(2024, 1), 8.0),
    ];
    let mut global = europe.clone();
    global.push(observation("USA", "United States", month(2024, 1), 1.0));

    let kpis = region_kpis(&europe, &global, month(2024, 1), &AnalyticsConfig::default());
    println!("{kpis:?}");

    assert_eq!(kpis.period, month(2024, 1));
    assert_close(kpis.average.unwrap(), 10.0);
    assert_close(kpis.vs_global.unwrap(), 3.0);
    assert_close(kpis.momentum.unwrap(), 3.0);
    assert_close(kpis.hotspot_share.unwrap(), 50.0);
    assert_close(kpis.hotspot_share_change.unwrap(), 50.0);
    assert_close(kpis.volatility.unwrap(), 4.5_f64.sqrt());
}

#[test]
fn test_region_kpis_without_previous_month() {
    let rows = vec![observation("DEU", "Germany", month(2024, 1), 12.0)];
    let kpis = region_kpis(&rows, &rows, month(2024, 1), &AnalyticsConfig::default());

    assert_close(kpis.vs_global.unwrap(), 0.0);
    assert!(kpis.momentum.is_none());
    assert!(kpis.hotspot_share_change.is_none());
    assert!(kpis.volatility.is_none());
}

#[test]
fn test_region_drill_table_changes() {
    let rows = vec![
        observation("DEU", "Germany", month(2023, 1), 4.0),
        observation("DEU", "Germany", month(2023, 12), 8.0),
        observation("DEU", "Germany", month(2024, 1), 12.0),
        observation("FRA", "France", month(2023, 12), 6.0),
        observation("FRA", "France", month(2024, 1), 8.0),
        observation("ESP", "Spain", month(2024, 1), 15.0),
    ];

    let table = region_drill_table(&rows, month(2024, 1));

    let order: Vec<&str> = table.iter().map(|row| row.country.as_str()).collect();
    assert_eq!(order, vec!["Spain", "Germany", "France"]);

    assert!(table[0].previous.is_none() && table[0].mom_change.is_none());
    assert_eq!(table[1].previous, Some(8.0));
    assert_close(table[1].mom_change.unwrap(), 4.0);
    assert_close(table[1].yoy_change.unwrap(), 8.0);
    assert_close(table[2].mom_change.unwrap(), 2.0);
    assert!(table[2].yoy_change.is_none());
}
