use std::sync::Arc;
use thiserror::Error;

use crate::core::{merge_ranked, Recommender, RideHailing};
use crate::models::{Catalog, Recommendation, RecommendationQuery, UserLocation, UserPreferences};
use crate::services::catalog::{CatalogError, CatalogSource};

/// Errors that can occur while building a recommendation list
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Multi-category recommendation orchestrator
///
/// Runs the engine once per requested category, or once per
/// (category, subtype) pair when subtypes are given, then merges,
/// deduplicates, re-ranks and annotates the union.
pub struct RecommendationPlanner {
    catalog: Arc<dyn CatalogSource>,
    recommender: Recommender,
    ride_hailing: RideHailing,
}

impl RecommendationPlanner {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        recommender: Recommender,
        ride_hailing: RideHailing,
    ) -> Self {
        Self {
            catalog,
            recommender,
            ride_hailing,
        }
    }

    /// Planner with default weights, limit and geofence
    pub fn with_defaults(catalog: Arc<dyn CatalogSource>) -> Self {
        Self::new(catalog, Recommender::default(), RideHailing::default())
    }

    /// Build the final recommendation list for a user
    ///
    /// The catalog is loaded and validated once per call; a malformed entry
    /// fails the whole call.
    pub fn plan(
        &self,
        location: UserLocation,
        preferences: &UserPreferences,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let catalog = Catalog::from_records(self.catalog.load()?).map_err(CatalogError::from)?;

        let queries = build_queries(location, preferences);
        let passes = queries.iter().flat_map(|query| {
            self.recommender
                .recommend(catalog.places(), query)
                .places
        });

        let merged = merge_ranked(passes, self.recommender.limit());

        tracing::debug!(
            "Planned {} places from {} passes over {} catalog entries",
            merged.len(),
            queries.len(),
            catalog.len()
        );

        Ok(merged
            .iter()
            .map(|scored| self.ride_hailing.annotate(scored))
            .collect())
    }
}

/// Expand preferences into one engine query per pass, in request order
fn build_queries<'a>(
    location: UserLocation,
    preferences: &'a UserPreferences,
) -> Vec<RecommendationQuery<'a>> {
    let mut queries = Vec::new();

    for place_type in &preferences.place_types {
        if preferences.subtypes.is_empty() {
            queries.push(RecommendationQuery::new(location, preferences, place_type, None));
        } else {
            for subtype in &preferences.subtypes {
                queries.push(RecommendationQuery::new(
                    location,
                    preferences,
                    place_type,
                    Some(subtype.as_str()),
                ));
            }
        }
    }

    queries
}
