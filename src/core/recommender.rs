use std::cmp::Ordering;

use crate::models::{Place, RecommendationQuery, ScoredPlace, ScoringWeights};
use crate::core::{
    distance::{haversine_distance, round_distance},
    filters::{check_gates, EnergyLevel},
    scoring::calculate_place_score,
};

/// Maximum number of places returned by one pass
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Result of one recommendation pass
#[derive(Debug)]
pub struct RecommendationResult<'a> {
    pub places: Vec<ScoredPlace<'a>>,
    pub total_candidates: usize,
}

/// Single-category recommendation engine
///
/// # Pipeline Stages
/// 1. Energy (distance) gate
/// 2. Budget gate
/// 3. Category gate
/// 4. Subtype gate ("Eat" only)
/// 5. Scoring
/// 6. Ranking by score, then distance
///
/// The engine never mutates the catalog; every annotation lives on the
/// returned [`ScoredPlace`] values.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    limit: usize,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        Self { weights, limit }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_RESULT_LIMIT)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Recommend places of one category for a user
    ///
    /// # Arguments
    /// * `places` - The validated catalog for this call
    /// * `query` - Location, preferences and the requested category
    ///
    /// # Returns
    /// RecommendationResult with at most `limit` places, best first
    pub fn recommend<'a>(
        &self,
        places: &'a [Place],
        query: &RecommendationQuery<'_>,
    ) -> RecommendationResult<'a> {
        let total_candidates = places.len();

        if EnergyLevel::from_selector(query.energy).is_none() {
            tracing::debug!("Unrecognised energy {}, distance gate disabled", query.energy);
        }

        let mut scored: Vec<ScoredPlace<'a>> = places
            .iter()
            .filter_map(|place| {
                let distance_km = haversine_distance(query.lat, query.lon, place.lat, place.long);

                if let Some(reason) = check_gates(place, query, distance_km) {
                    tracing::trace!("Rejected {}: {:?}", place.place_name, reason);
                    return None;
                }

                Some(ScoredPlace {
                    place,
                    calculated_distance: round_distance(distance_km),
                    score: calculate_place_score(place, query, distance_km, &self.weights),
                })
            })
            .collect();

        // Sort by score (descending) and then by distance (ascending)
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.calculated_distance
                        .partial_cmp(&b.calculated_distance)
                        .unwrap_or(Ordering::Equal)
                })
        });

        scored.truncate(self.limit);

        tracing::debug!(
            "{} pass{}: {} of {} places kept",
            query.place_type,
            query.subtype.map(|s| format!(" ({})", s)).unwrap_or_default(),
            scored.len(),
            total_candidates
        );

        RecommendationResult {
            places: scored,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_LAT: f64 = 11.0168;
    const USER_LON: f64 = 76.9558;

    /// Roughly `km` kilometers north of the user
    fn north_of_user(km: f64) -> f64 {
        USER_LAT + km / 111.195
    }

    fn create_place(name: &str, km: f64, rating: f64, types: &[&str]) -> Place {
        Place {
            place_name: name.to_string(),
            lat: north_of_user(km),
            long: USER_LON,
            types: types.iter().map(|t| t.to_string()).collect(),
            subtypes: vec![],
            moods: vec!["Calm".to_string()],
            budget_min: 0.0,
            budget_max: 100.0,
            rating,
            status: "open".to_string(),
        }
    }

    fn create_query(energy: u32, place_type: &str) -> RecommendationQuery<'_> {
        RecommendationQuery {
            lat: USER_LAT,
            lon: USER_LON,
            mood: "Calm",
            budget: 200,
            energy,
            place_type,
            subtype: None,
        }
    }

    #[test]
    fn test_single_place_scenario() {
        let recommender = Recommender::with_default_weights();
        let places = vec![create_place("Park A", 1.0, 4.0, &["See"])];

        let result = recommender.recommend(&places, &create_query(10, "See"));

        assert_eq!(result.places.len(), 1);
        assert_eq!(result.places[0].place.place_name, "Park A");
        assert_eq!(result.places[0].score, 120.0);
        assert!((result.places[0].calculated_distance - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_energy_gate() {
        let recommender = Recommender::with_default_weights();
        let places = vec![
            create_place("Near", 3.0, 4.0, &["See"]),
            create_place("Mid", 30.0, 4.0, &["See"]),
            create_place("Far", 120.0, 4.0, &["See"]),
        ];

        let low = recommender.recommend(&places, &create_query(10, "See"));
        assert_eq!(low.places.len(), 1);

        let medium = recommender.recommend(&places, &create_query(50, "See"));
        assert_eq!(medium.places.len(), 2);

        let high = recommender.recommend(&places, &create_query(150, "See"));
        assert_eq!(high.places.len(), 3);
        assert_eq!(high.total_candidates, 3);
    }

    #[test]
    fn test_ties_broken_by_distance() {
        let recommender = Recommender::with_default_weights();
        // Both land in the 5..15km band with identical attributes
        let places = vec![
            create_place("Farther", 12.0, 4.0, &["See"]),
            create_place("Nearer", 6.0, 4.0, &["See"]),
        ];

        let result = recommender.recommend(&places, &create_query(50, "See"));

        assert_eq!(result.places[0].score, result.places[1].score);
        assert_eq!(result.places[0].place.place_name, "Nearer");
        assert_eq!(result.places[1].place.place_name, "Farther");
    }

    #[test]
    fn test_higher_score_first() {
        let recommender = Recommender::with_default_weights();
        let places = vec![
            create_place("Average", 1.0, 3.0, &["See"]),
            create_place("Great", 8.0, 5.0, &["See"]),
        ];

        let result = recommender.recommend(&places, &create_query(10, "See"));

        assert_eq!(result.places[0].place.place_name, "Great");
    }

    #[test]
    fn test_small_rating_gap_outranks_nearer_place() {
        let recommender = Recommender::with_default_weights();
        let mut nearer = create_place("A", 6.0, 4.26, &["See"]);
        let mut farther = create_place("B", 12.0, 4.34, &["See"]);
        for place in [&mut nearer, &mut farther] {
            place.moods = vec!["Lively".to_string()];
            place.budget_max = 1000.0;
            place.status = "closed".to_string();
        }
        let places = vec![nearer, farther];

        let result = recommender.recommend(&places, &create_query(50, "See"));

        // 63.4 vs 62.6: both sit in the same distance band
        assert_eq!(result.places[0].place.place_name, "B");
        assert_eq!(result.places[1].place.place_name, "A");
        assert!((result.places[0].score - 63.4).abs() < 1e-9);
        assert!((result.places[1].score - 62.6).abs() < 1e-9);
    }

    #[test]
    fn test_respects_limit() {
        let recommender = Recommender::with_default_weights();
        let places: Vec<Place> = (0..25)
            .map(|i| create_place(&format!("Place {}", i), i as f64 * 0.3, 4.0, &["Eat"]))
            .collect();

        let result = recommender.recommend(&places, &create_query(10, "Eat"));

        assert_eq!(result.places.len(), DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn test_empty_catalog() {
        let recommender = Recommender::with_default_weights();
        let result = recommender.recommend(&[], &create_query(10, "Eat"));
        assert!(result.places.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_catalog_left_untouched() {
        let recommender = Recommender::with_default_weights();
        let places = vec![create_place("Park A", 1.0, 4.0, &["See"])];
        let before = places.clone();

        let _ = recommender.recommend(&places, &create_query(10, "See"));

        assert_eq!(places, before);
    }
}
