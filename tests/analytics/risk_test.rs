use inflation_hub::analytics::risk::{MEAN_WEIGHT, RANGE_WEIGHT, VOLATILITY_WEIGHT};
use inflation_hub::analytics::risk_scores;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{assert_close, month, monthly_series, observation};

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[test]
fn test_normalised_components_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(42);

    for trial in 0..50 {
        let countries = rng.random_range(2..10);
        let mut rows = Vec::new();
        for c in 0..countries {
            let length = rng.random_range(2..36);
            let base = rng.random_range(-2.0..40.0);
            let values: Vec<f64> = (0..length)
                .map(|_| base + rng.random_range(-5.0..5.0))
                .collect();
            rows.extend(monthly_series(
                &format!("C{c:02}"),
                &format!("Country {c}"),
                month(2015, 1),
                &values,
            ));
        }

        let scores = risk_scores(&rows);
        assert_eq!(scores.len(), countries, "trial {trial}");
        for score in &scores {
            assert!(in_unit_interval(score.norm_mean), "trial {trial}: {score:?}");
            assert!(in_unit_interval(score.norm_volatility), "trial {trial}: {score:?}");
            assert!(in_unit_interval(score.norm_range), "trial {trial}: {score:?}");
            assert!(in_unit_interval(score.score), "trial {trial}: {score:?}");
        }
        assert!(scores.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}

#[test]
fn test_composite_weights() {
    let mut rows = monthly_series("LOW", "Calm", month(2020, 1), &[1.0, 1.0, 1.0]);
    rows.extend(monthly_series("HIG", "Stormy", month(2020, 1), &[10.0, 30.0, 50.0]));

    let scores = risk_scores(&rows);

    assert_eq!(scores[0].country, "Stormy");
    assert_close(scores[0].score, MEAN_WEIGHT + VOLATILITY_WEIGHT + RANGE_WEIGHT);
    assert_close(scores[0].mean, 30.0);
    assert_close(scores[0].volatility.unwrap(), 20.0);
    assert_close(scores[0].p95, 48.0);
    assert_close(scores[0].p05, 12.0);
    assert_close(scores[0].range, 36.0);

    assert_eq!(scores[1].country, "Calm");
    assert_close(scores[1].score, 0.0);
}

#[test]
fn test_degenerate_metric_contributes_nothing() {
    // Same mean for both, so only volatility and range separate them.
    let mut rows = monthly_series("AAA", "Flat", month(2020, 1), &[5.0, 5.0, 5.0]);
    rows.extend(monthly_series("BBB", "Swinging", month(2020, 1), &[0.0, 5.0, 10.0]));

    let scores = risk_scores(&rows);

    for score in &scores {
        assert_close(score.norm_mean, 0.0);
    }
    assert_eq!(scores[0].country, "Swinging");
    assert_close(scores[0].score, VOLATILITY_WEIGHT + RANGE_WEIGHT);
}

#[test]
fn test_identical_countries_score_zero() {
    let mut rows = monthly_series("AAA", "Twin A", month(2020, 1), &[2.0, 4.0]);
    rows.extend(monthly_series("BBB", "Twin B", month(2020, 1), &[2.0, 4.0]));

    for score in risk_scores(&rows) {
        assert_close(score.score, 0.0);
    }
}

#[test]
fn test_single_observation_has_no_volatility() {
    let mut rows = monthly_series("AAA", "Long", month(2020, 1), &[1.0, 3.0, 8.0]);
    rows.push(observation("BBB", "Short", month(2020, 1), 20.0));

    let scores = risk_scores(&rows);
    let short = scores.iter().find(|score| score.country == "Short").unwrap();

    assert_eq!(short.volatility, None);
    assert_close(short.norm_volatility, 0.0);
    assert_close(short.norm_mean, 1.0);
}
