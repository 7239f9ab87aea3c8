// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod merge;
pub mod recommender;
pub mod scoring;

pub use distance::{haversine_distance, is_inside_geobox, round_distance};
pub use filters::{check_gates, EnergyLevel, Rejection};
pub use merge::{merge_ranked, RideHailing};
pub use recommender::{RecommendationResult, Recommender};
pub use scoring::calculate_place_score;
