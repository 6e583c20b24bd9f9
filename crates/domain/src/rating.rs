//! Rating records and the averaging logic shared by every rating read path.
//!
//! A city's averages are never stored. They are recomputed from the rating
//! rows with [`aggregate`], which works on any record exposing a fixed array
//! of numeric fields.

use crate::identifiers::{CityId, GeneralRatingId, HealthRatingId};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating value
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating value
pub const MAX_RATING: f64 = 5.0;

/// Returns true when `value` is a finite number inside `[MIN_RATING, MAX_RATING]`.
pub fn is_valid_rating(value: f64) -> bool {
    value.is_finite() && (MIN_RATING..=MAX_RATING).contains(&value)
}

/// Round to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Aggregation
// ============================================================================

/// A record carrying `N` numeric rating fields in a fixed order.
pub trait RatingFields<const N: usize> {
    fn fields(&self) -> [f64; N];
}

/// A record that can be rebuilt from `N` numeric rating fields.
pub trait FromRatingFields<const N: usize> {
    fn from_fields(fields: [f64; N]) -> Self;
}

/// Fixed-point scale used while summing: one unit is a millionth of a point.
const MICROS_PER_POINT: f64 = 1_000_000.0;

/// Micro-units per hundredth, the precision of an average.
const MICROS_PER_HUNDREDTH: i128 = 10_000;

/// Per-field arithmetic mean of `records`, each field rounded to two decimals.
///
/// An empty slice yields the all-zero record. Fields are summed as integer
/// micro-units and the mean is rounded half away from zero in integer
/// arithmetic, so the result is identical for every ordering of `records`.
pub fn aggregate<T, R, const N: usize>(records: &[T]) -> R
where
    T: RatingFields<N>,
    R: FromRatingFields<N>,
{
    if records.is_empty() {
        return R::from_fields([0.0; N]);
    }

    let mut sums = [0_i128; N];
    for record in records {
        for (sum, value) in sums.iter_mut().zip(record.fields()) {
            *sum += to_micros(value);
        }
    }

    let divisor = records.len() as i128 * MICROS_PER_HUNDREDTH;
    R::from_fields(sums.map(|sum| div_round(sum, divisor) as f64 / 100.0))
}

fn to_micros(value: f64) -> i128 {
    (value * MICROS_PER_POINT).round() as i128
}

/// `numerator / divisor` rounded half away from zero; `divisor` is positive.
fn div_round(numerator: i128, divisor: i128) -> i128 {
    let half = divisor / 2;
    if numerator >= 0 {
        (numerator + half) / divisor
    } else {
        -((-numerator + half) / divisor)
    }
}

/// Average of a city's general ratings, `0.0` when there are none.
pub fn average_general_rating(ratings: &[GeneralRating]) -> f64 {
    aggregate::<GeneralRating, f64, 1>(ratings)
}

/// Per-field average of a city's health ratings, all zeros when there are none.
pub fn average_health_ratings(ratings: &[HealthRating]) -> HealthScores {
    aggregate::<HealthRating, HealthScores, 5>(ratings)
}

impl RatingFields<1> for f64 {
    fn fields(&self) -> [f64; 1] {
        [*self]
    }
}

impl FromRatingFields<1> for f64 {
    fn from_fields([value]: [f64; 1]) -> Self {
        value
    }
}

// ============================================================================
// General rating
// ============================================================================

/// A single overall rating left for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRating {
    pub id: GeneralRatingId,
    pub city_id: CityId,
    pub rating: f64,
}

impl GeneralRating {
    pub fn new(city_id: CityId, rating: f64) -> Self {
        Self {
            id: GeneralRatingId::new(),
            city_id,
            rating,
        }
    }
}

impl RatingFields<1> for GeneralRating {
    fn fields(&self) -> [f64; 1] {
        [self.rating]
    }
}

// ============================================================================
// Health rating
// ============================================================================

/// The five health dimensions scored for a city
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScores {
    pub language_support: f64,
    pub water_safety: f64,
    pub food_safety: f64,
    pub health_risk: f64,
    pub air_quality: f64,
}

impl HealthScores {
    /// Field names in aggregation order, as they appear on the wire.
    pub const FIELD_NAMES: [&'static str; 5] = [
        "languageSupport",
        "waterSafety",
        "foodSafety",
        "healthRisk",
        "airQuality",
    ];

    /// Names of the fields that fall outside the accepted rating range.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        Self::FIELD_NAMES
            .iter()
            .zip(self.fields())
            .filter(|(_, value)| !is_valid_rating(*value))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl RatingFields<5> for HealthScores {
    fn fields(&self) -> [f64; 5] {
        [
            self.language_support,
            self.water_safety,
            self.food_safety,
            self.health_risk,
            self.air_quality,
        ]
    }
}

impl FromRatingFields<5> for HealthScores {
    fn from_fields(
        [language_support, water_safety, food_safety, health_risk, air_quality]: [f64; 5],
    ) -> Self {
        Self {
            language_support,
            water_safety,
            food_safety,
            health_risk,
            air_quality,
        }
    }
}

/// A health rating row for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRating {
    pub id: HealthRatingId,
    pub city_id: CityId,
    #[serde(flatten)]
    pub scores: HealthScores,
}

impl HealthRating {
    pub fn new(city_id: CityId, scores: HealthScores) -> Self {
        Self {
            id: HealthRatingId::new(),
            city_id,
            scores,
        }
    }
}

impl RatingFields<5> for HealthRating {
    fn fields(&self) -> [f64; 5] {
        self.scores.fields()
    }
}
