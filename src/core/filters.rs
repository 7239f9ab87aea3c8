use crate::models::{Place, RecommendationQuery};

/// The only category whose places carry meaningful subtypes
pub const EAT_CATEGORY: &str = "Eat";

/// How far the user is willing to travel
///
/// The wire value is the radius itself; anything outside the three known
/// selectors is not an energy level and disables the distance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub fn from_selector(energy: u32) -> Option<Self> {
        match energy {
            10 => Some(Self::Low),
            50 => Some(Self::Medium),
            150 => Some(Self::High),
            _ => None,
        }
    }

    pub fn radius_km(self) -> f64 {
        match self {
            Self::Low => 10.0,
            Self::Medium => 50.0,
            Self::High => 150.0,
        }
    }
}

/// Why a place was dropped from a recommendation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooFar,
    OverBudget,
    WrongCategory,
    WrongSubtype,
}

/// Stage 1: distance gate driven by the energy selector
#[inline]
pub fn within_energy_radius(distance_km: f64, energy: u32) -> bool {
    match EnergyLevel::from_selector(energy) {
        Some(level) => distance_km <= level.radius_km(),
        None => true,
    }
}

/// Stage 2: budget gate
///
/// Only the place's minimum cost is compared; `budget_max` feeds the
/// affordability bonus instead.
#[inline]
pub fn within_budget(place: &Place, budget: u32) -> bool {
    place.budget_min <= f64::from(budget)
}

/// Stage 3: category gate
#[inline]
pub fn matches_category(place: &Place, place_type: &str) -> bool {
    place.has_type(place_type)
}

/// Stage 4: subtype gate, applied only to the "Eat" category
///
/// A place with no declared subtypes matches any requested subtype, and an
/// empty subtype requests nothing.
#[inline]
pub fn matches_subtype(place: &Place, place_type: &str, subtype: Option<&str>) -> bool {
    match subtype {
        Some(subtype) if !subtype.is_empty() && place_type == EAT_CATEGORY => {
            place.subtypes.is_empty() || place.has_subtype(subtype)
        }
        _ => true,
    }
}

/// Run every gate in pipeline order, returning the first one that fails
pub fn check_gates(
    place: &Place,
    query: &RecommendationQuery<'_>,
    distance_km: f64,
) -> Option<Rejection> {
    if !within_energy_radius(distance_km, query.energy) {
        return Some(Rejection::TooFar);
    }

    if !within_budget(place, query.budget) {
        return Some(Rejection::OverBudget);
    }

    if !matches_category(place, query.place_type) {
        return Some(Rejection::WrongCategory);
    }

    if !matches_subtype(place, query.place_type, query.subtype) {
        return Some(Rejection::WrongSubtype);
    }

    None
}
