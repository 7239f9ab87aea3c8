use crate::models::{Place, RecommendationQuery, ScoringWeights};

/// Status value that earns the open bonus
pub const OPEN_STATUS: &str = "open";

/// Calculate the composite score for a place that passed every gate
///
/// Scoring formula (additive, no normalization):
/// score = (
///     mood_match          # place suits the requested mood
///     + rating * 10       # raw quality, kept exact for fractional ratings
///     + distance_bonus    # nearest band wins, 5..25
///     + affordability     # budget_max / budget ratio, 0..15
///     + open_bonus        # status == "open"
/// )
pub fn calculate_place_score(
    place: &Place,
    query: &RecommendationQuery<'_>,
    distance_km: f64,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = 0.0;

    if place.has_mood(query.mood) {
        score += weights.mood_match;
    }

    score += place.rating * weights.rating_multiplier;
    score += distance_bonus(distance_km);
    score += affordability_bonus(place.budget_max, query.budget);

    if place.status == OPEN_STATUS {
        score += weights.open_bonus;
    }

    score
}

/// Closer places earn more; bands are exclusive
#[inline]
pub fn distance_bonus(distance_km: f64) -> f64 {
    if distance_km < 5.0 {
        25.0
    } else if distance_km < 15.0 {
        20.0
    } else if distance_km < 30.0 {
        15.0
    } else if distance_km < 50.0 {
        10.0
    } else {
        5.0
    }
}

/// Cheaper places relative to the user's budget earn more
///
/// A zero budget yields a ratio of 0, which lands in the top band.
#[inline]
pub fn affordability_bonus(budget_max: f64, budget: u32) -> f64 {
    let ratio = if budget > 0 {
        budget_max / f64::from(budget)
    } else {
        0.0
    };

    if ratio < 0.3 {
        15.0
    } else if ratio < 0.6 {
        10.0
    } else if ratio < 0.9 {
        5.0
    } else {
        0.0
    }
}
