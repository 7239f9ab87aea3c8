//! NearbyNomad - recommendations for nearby places
//!
//! This library ranks points of interest around a user by mood, budget,
//! travel radius and category. Each category is ranked independently by a
//! composite score, then the union is deduplicated, re-ranked by rating and
//! annotated with a geofenced ride-hailing link.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{haversine_distance, merge_ranked, Recommender, RideHailing};
pub use models::{Catalog, DataIntegrityError, Place, PlaceRecord, Recommendation, ScoredPlace, UserLocation, UserPreferences};
pub use services::{CatalogSource, JsonFileCatalog, RecommendationPlanner};
