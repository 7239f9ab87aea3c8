// Service exports
pub mod catalog;
pub mod planner;

pub use catalog::{CatalogError, CatalogSource, InMemoryCatalog, JsonFileCatalog};
pub use planner::{RecommendError, RecommendationPlanner};
