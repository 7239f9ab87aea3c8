use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{UserLocation, UserPreferences};

/// Request to get recommendations for the caller's location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[validate(length(min = 1))]
    pub mood: String,
    pub budget: u32,
    pub energy: u32,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
}

impl RecommendationsRequest {
    pub fn location(&self) -> UserLocation {
        UserLocation {
            lat: self.lat,
            lon: self.lon,
        }
    }

    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            mood: self.mood.clone(),
            budget: self.budget,
            energy: self.energy,
            place_types: self.types.clone(),
            subtypes: self.subtypes.clone(),
        }
    }
}
