use std::sync::Arc;

use inflation_hub::analytics::cache::fingerprint;
use inflation_hub::analytics::{
    PivotCache, PivotKey, correlation_matrix, country_pivot, pivot, region_heatmap, sharpest_swing,
};

use crate::utils::{assert_close, month, monthly_series, observation};

fn three_countries() -> Vec<inflation_hub::Observation> {
    let mut rows = monthly_series("USA", "United States", month(2022, 1), &[7.5, 7.9, 8.5, 8.3]);
    rows.extend(monthly_series("CAN", "Canada", month(2022, 1), &[5.1, 5.7, 6.7, 6.8]));
    rows.extend(monthly_series("JPN", "Japan", month(2022, 1), &[2.0, 1.0, 2.0, 1.0]));
    rows
}

#[test]
fn test_country_pivot_layout() {
    let rows = three_countries();
    let table = country_pivot(&rows);

    assert_eq!(table.periods.len(), 4);
    assert_eq!(table.columns, vec!["Canada", "Japan", "United States"]);
    assert_eq!(table.get(month(2022, 3), "United States"), Some(8.5));
    assert_eq!(table.get(month(2022, 5), "Canada"), None);
}

#[test]
fn test_pivot_averages_shared_cells() {
    let rows = vec![
        observation("USA", "United States", month(2022, 1), 7.0),
        observation("CAN", "Canada", month(2022, 1), 5.0),
        observation("MEX", "Mexico", month(2022, 2), 7.0),
    ];
    let table = pivot(&rows, PivotKey::Region);

    assert_eq!(table.columns, vec!["Latin America & Caribbean", "North America"]);
    assert_eq!(table.get(month(2022, 1), "North America"), Some(6.0));
    assert_eq!(table.get(month(2022, 1), "Latin America & Caribbean"), None);
}

#[test]
fn test_region_heatmap_window() {
    let rows = monthly_series("USA", "United States", month(2021, 1), &[1.0; 24]);
    let heatmap = region_heatmap(&rows, month(2022, 12), 5);

    assert_eq!(heatmap.periods.first(), Some(&month(2022, 7)));
    assert_eq!(heatmap.periods.last(), Some(&month(2022, 12)));
}

#[test]
fn test_correlation_matrix() {
    let matrix = correlation_matrix(&country_pivot(&three_countries()));

    assert_eq!(matrix.labels.len(), 3);
    assert_close(matrix.values[0][0].unwrap(), 1.0);
    let (a, b, r) = matrix.strongest_pair().unwrap();
    assert_eq!((a, b), ("Canada", "United States"));
    assert!(r > 0.9);
}

#[test]
fn test_correlation_needs_variance() {
    let mut rows = monthly_series("AAA", "Flat", month(2022, 1), &[3.0, 3.0, 3.0]);
    rows.extend(monthly_series("BBB", "Moving", month(2022, 1), &[1.0, 2.0, 3.0]));

    let matrix = correlation_matrix(&country_pivot(&rows));
    assert_eq!(matrix.values[0][1], None);
    assert!(matrix.strongest_pair().is_none());
}

#[test]
fn test_cache_reuses_and_invalidates() {
    let cache = PivotCache::default();
    let rows = three_countries();

    let first = cache.get_or_compute(&rows, PivotKey::Country);
    let second = cache.get_or_compute(&rows, PivotKey::Country);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, country_pivot(&rows));

    let mut changed = rows.clone();
    changed[0].value += 1.0;
    assert_ne!(fingerprint(&rows), fingerprint(&changed));
    let third = cache.get_or_compute(&changed, PivotKey::Country);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*third, country_pivot(&changed));

    cache.get_or_compute(&rows, PivotKey::Region);
    assert_eq!(cache.len(), 3);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_sharpest_cross_region_swing() {
    let mut rows = monthly_series("USA", "United States", month(2024, 1), &[3.0, 3.0, 9.0, 6.0]);
    rows.extend(monthly_series("DEU", "Germany", month(2024, 1), &[5.0, 7.0, 7.0]));
    let regions = pivot(&rows, PivotKey::Region);

    let means: Vec<f64> = regions.row_means().into_iter().flatten().collect();
    assert_eq!(means, vec![4.0, 5.0, 8.0, 6.0]);

    let (period, swing) = sharpest_swing(&regions).unwrap();
    assert_eq!(period, month(2024, 3));
    assert_close(swing, 3.0);
}

#[test]
fn test_sharpest_swing_needs_two_periods() {
    assert!(sharpest_swing(&pivot(&[], PivotKey::Region)).is_none());

    let single = vec![observation("USA", "United States", month(2024, 1), 3.0)];
    assert!(sharpest_swing(&pivot(&single, PivotKey::Region)).is_none());
}
