//! Tests for rating aggregation
//!
//! Covers the zero fallback, per-field mean with two-decimal rounding and
//! order invariance for both general and health ratings.

use proptest::prelude::*;
use travel_health_domain::{
    aggregate, average_general_rating,
    identifiers::CityId, average_health_ratings, GeneralRating, HealthRating, HealthScores,
};

fn scores(values: [f64; 5]) -> HealthScores {
    HealthScores {
        language_support: values[0],
        water_safety: values[1],
        food_safety: values[2],
        health_risk: values[3],
        air_quality: values[4],
    }
}

fn health_ratings(rows: &[[f64; 5]]) -> Vec<HealthRating> {
    let city = CityId::new();
    rows.iter()
        .map(|row| HealthRating::new(city, scores(*row)))
        .collect()
}

// ============================================================================
// Fixed scenarios
// ============================================================================

#[test]
fn test_empty_health_ratings_yield_zeros() {
    let average = average_health_ratings(&[]);
    assert_eq!(average, HealthScores::default());
}

#[test]
fn test_empty_general_ratings_yield_zero() {
    assert_eq!(average_general_rating(&[]), 0.0);
}

#[test]
fn test_two_health_ratings() {
    let rows = health_ratings(&[[4.0, 2.0, 3.0, 1.0, 5.0], [2.0, 4.0, 5.0, 3.0, 1.0]]);
    let average = average_health_ratings(&rows);
    assert_eq!(average, scores([3.0, 3.0, 4.0, 2.0, 3.0]));
}

#[test]
fn test_each_field_rounded_independently() {
    let rows = health_ratings(&[
        [1.0, 0.0, 5.0, 2.0, 0.0],
        [1.0, 0.0, 5.0, 2.0, 0.0],
        [2.0, 1.0, 4.0, 2.0, 0.0],
    ]);
    let average = average_health_ratings(&rows);
    assert_eq!(average, scores([1.33, 0.33, 4.67, 2.0, 0.0]));
}

#[test]
fn test_single_general_rating_is_its_own_average() {
    let rating = GeneralRating::new(CityId::new(), 3.7);
    assert_eq!(average_general_rating(&[rating]), 3.7);
}

#[test]
fn test_tie_rounds_up_in_any_order() {
    let city = CityId::new();
    let values = [4.3, 1.3, 2.7, 4.6];

    for rotation in 0..values.len() {
        let mut order = values;
        order.rotate_left(rotation);
        for reversed in [false, true] {
            if reversed {
                order.reverse();
            }
            let ratings: Vec<GeneralRating> =
                order.iter().map(|v| GeneralRating::new(city, *v)).collect();
            assert_eq!(average_general_rating(&ratings), 3.23, "order {:?}", order);
        }
    }
}

#[test]
fn test_near_tie_means_are_stable() {
    let city = CityId::new();
    for (values, expected) in [
        ([2.3, 3.1, 4.6, 0.1], 2.53),
        ([0.7, 0.1, 1.9, 2.4], 1.28),
    ] {
        let forward: Vec<GeneralRating> =
            values.iter().map(|v| GeneralRating::new(city, *v)).collect();
        let backward: Vec<GeneralRating> =
            values.iter().rev().map(|v| GeneralRating::new(city, *v)).collect();

        assert_eq!(average_general_rating(&forward), expected);
        assert_eq!(average_general_rating(&backward), expected);
    }
}

#[test]
fn test_plain_numbers_aggregate() {
    let average: f64 = aggregate::<f64, f64, 1>(&[1.0, 2.0, 2.0]);
    assert_eq!(average, 1.67);
}

// ============================================================================
// Properties
// ============================================================================

/// Ratings in tenths, as clients send them. Most are not exact in binary.
fn tenth_step() -> impl Strategy<Value = u32> {
    0u32..=50
}

fn as_rating(tenths: u32) -> f64 {
    f64::from(tenths) / 10.0
}

/// Mean of `tenths` rounded half up to hundredths, computed exactly.
fn expected_mean(tenths: &[u32]) -> f64 {
    let sum: u64 = tenths.iter().map(|t| u64::from(*t)).sum();
    let n = tenths.len() as u64;
    let hundredths = (sum * 10 * 2 + n) / (2 * n);
    hundredths as f64 / 100.0
}

fn general_ratings(tenths: &[u32]) -> Vec<GeneralRating> {
    let city = CityId::new();
    tenths
        .iter()
        .map(|t| GeneralRating::new(city, as_rating(*t)))
        .collect()
}

fn health_row() -> impl Strategy<Value = [u32; 5]> {
    [tenth_step(), tenth_step(), tenth_step(), tenth_step(), tenth_step()]
}

fn health_rows(rows: &[[u32; 5]]) -> Vec<HealthRating> {
    let rows: Vec<[f64; 5]> = rows.iter().map(|row| row.map(as_rating)).collect();
    health_ratings(&rows)
}

/// A list together with a random permutation of it
fn with_shuffle<T: Clone + std::fmt::Debug>(
    element: impl Strategy<Value = T>,
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
    prop::collection::vec(element, size)
        .prop_flat_map(|values| (Just(values.clone()), Just(values).prop_shuffle()))
}

proptest! {
    #[test]
    fn test_general_average_is_rounded_mean(values in prop::collection::vec(tenth_step(), 1..40)) {
        prop_assert_eq!(average_general_rating(&general_ratings(&values)), expected_mean(&values));
    }

    #[test]
    fn test_health_average_is_rounded_mean_per_field(rows in prop::collection::vec(health_row(), 1..20)) {
        let average = average_health_ratings(&health_rows(&rows));

        for (field, actual) in [
            average.language_support,
            average.water_safety,
            average.food_safety,
            average.health_risk,
            average.air_quality,
        ]
        .into_iter()
        .enumerate()
        {
            let column: Vec<u32> = rows.iter().map(|row| row[field]).collect();
            prop_assert_eq!(actual, expected_mean(&column));
        }
    }

    #[test]
    fn test_general_average_ignores_order((values, shuffled) in with_shuffle(tenth_step(), 0..40)) {
        let mut reversed = values.clone();
        reversed.reverse();

        let forward = average_general_rating(&general_ratings(&values));
        prop_assert_eq!(forward, average_general_rating(&general_ratings(&shuffled)));
        prop_assert_eq!(forward, average_general_rating(&general_ratings(&reversed)));
    }

    #[test]
    fn test_health_average_ignores_order((rows, shuffled) in with_shuffle(health_row(), 0..20)) {
        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = average_health_ratings(&health_rows(&rows));
        prop_assert_eq!(forward, average_health_ratings(&health_rows(&shuffled)));
        prop_assert_eq!(forward, average_health_ratings(&health_rows(&reversed)));
    }

    #[test]
    fn test_average_stays_in_rating_range(values in prop::collection::vec(tenth_step(), 0..40)) {
        let average = average_general_rating(&general_ratings(&values));
        prop_assert!((0.0..=5.0).contains(&average));
    }
}
