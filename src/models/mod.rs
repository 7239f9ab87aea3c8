// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Catalog, DataIntegrityError, GeoBox, Place, PlaceRecord, Recommendation, RecommendationQuery,
    ScoredPlace, ScoringWeights, UserLocation, UserPreferences,
};
pub use requests::RecommendationsRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse};
