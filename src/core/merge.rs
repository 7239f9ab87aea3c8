use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::distance::is_inside_geobox;
use crate::models::{GeoBox, Place, Recommendation, ScoredPlace};

/// Default deep link base for ride-hailing pickups
pub const DEFAULT_RIDE_LINK_BASE: &str = "https://m.uber.com/ul/?action=setPickup";

/// Area where ride-hailing is offered
pub const DEFAULT_RIDE_GEOFENCE: GeoBox = GeoBox {
    min_lat: 10.5,
    max_lat: 11.5,
    min_lon: 76.6,
    max_lon: 77.1,
};

/// Merge the output of several engine passes into one ranked list
///
/// Duplicates by `place_name` are dropped, keeping the first occurrence in
/// iteration order. The union is then re-ranked by raw rating (not the
/// composite score), nearer first on ties, and truncated to `limit`.
pub fn merge_ranked<'a, I>(passes: I, limit: usize) -> Vec<ScoredPlace<'a>>
where
    I: IntoIterator<Item = ScoredPlace<'a>>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut merged: Vec<ScoredPlace<'a>> = passes
        .into_iter()
        .filter(|scored| {
            let place: &'a Place = scored.place;
            seen.insert(place.place_name.as_str())
        })
        .collect();

    merged.sort_by(|a, b| {
        b.place
            .rating
            .partial_cmp(&a.place.rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.calculated_distance
                    .partial_cmp(&b.calculated_distance)
                    .unwrap_or(Ordering::Equal)
            })
    });

    merged.truncate(limit);
    merged
}

/// Geofenced ride-hailing affordance
#[derive(Debug, Clone)]
pub struct RideHailing {
    geofence: GeoBox,
    link_base: String,
}

impl RideHailing {
    pub fn new(geofence: GeoBox, link_base: impl Into<String>) -> Self {
        Self {
            geofence,
            link_base: link_base.into(),
        }
    }

    /// Deep link for a dropoff at the given point, if it lies in the geofence
    pub fn link_for(&self, lat: f64, lon: f64) -> Option<String> {
        if !is_inside_geobox(lat, lon, &self.geofence) {
            return None;
        }

        Some(format!(
            "{}&dropoff[latitude]={:?}&dropoff[longitude]={:?}",
            self.link_base, lat, lon
        ))
    }

    /// Turn a scored place into an owned recommendation
    pub fn annotate(&self, scored: &ScoredPlace<'_>) -> Recommendation {
        let uber_link = self.link_for(scored.place.lat, scored.place.long);

        Recommendation {
            place: scored.place.clone(),
            calculated_distance: scored.calculated_distance,
            score: scored.score,
            uber_available: uber_link.is_some(),
            uber_link,
        }
    }
}

impl Default for RideHailing {
    fn default() -> Self {
        Self::new(DEFAULT_RIDE_GEOFENCE, DEFAULT_RIDE_LINK_BASE)
    }
}
