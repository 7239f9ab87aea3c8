use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder used in integrity errors when a record has no name at all
const UNNAMED_PLACE: &str = "<unnamed>";

/// A catalog entry exactly as it is stored on disk
///
/// Every field is optional here so that a malformed entry can be reported
/// with the offending field instead of failing the whole parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_name: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    #[serde(rename = "type")]
    pub types: Option<Vec<String>>,
    #[serde(rename = "subtype")]
    pub subtypes: Option<Vec<String>>,
    #[serde(rename = "mood")]
    pub moods: Option<Vec<String>>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub rating: Option<f64>,
    pub status: Option<String>,
}

/// A catalog entry missing a field the engine relies on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("place '{place_name}' is missing required field '{field}'")]
    MissingField {
        place_name: String,
        field: &'static str,
    },

    #[error("place '{place_name}' has a malformed '{field}' field")]
    MalformedField {
        place_name: String,
        field: &'static str,
    },
}

/// Read one optional field, treating `null` the same as absent
fn optional_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    place_name: &str,
    field: &'static str,
) -> Result<Option<T>, DataIntegrityError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => T::deserialize(raw).map(Some).map_err(|_| DataIntegrityError::MalformedField {
            place_name: place_name.to_string(),
            field,
        }),
    }
}

impl TryFrom<&Value> for PlaceRecord {
    type Error = DataIntegrityError;

    /// Decode one catalog element field by field so a bad value can be
    /// attributed to its place and field
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let place_name = value
            .get("place_name")
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED_PLACE);

        let object = value.as_object().ok_or_else(|| DataIntegrityError::MalformedField {
            place_name: place_name.to_string(),
            field: "record",
        })?;

        Ok(Self {
            place_name: optional_field(object, place_name, "place_name")?,
            lat: optional_field(object, place_name, "lat")?,
            long: optional_field(object, place_name, "long")?,
            types: optional_field(object, place_name, "type")?,
            subtypes: optional_field(object, place_name, "subtype")?,
            moods: optional_field(object, place_name, "mood")?,
            budget_min: optional_field(object, place_name, "budget_min")?,
            budget_max: optional_field(object, place_name, "budget_max")?,
            rating: optional_field(object, place_name, "rating")?,
            status: optional_field(object, place_name, "status")?,
        })
    }
}

/// Validated, read-only point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_name: String,
    pub lat: f64,
    pub long: f64,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// Finer labels, only consulted for the "Eat" category
    #[serde(rename = "subtype", default)]
    pub subtypes: Vec<String>,
    #[serde(rename = "mood")]
    pub moods: Vec<String>,
    pub budget_min: f64,
    pub budget_max: f64,
    pub rating: f64,
    pub status: String,
}

impl Place {
    pub fn has_type(&self, place_type: &str) -> bool {
        self.types.iter().any(|t| t == place_type)
    }

    pub fn has_mood(&self, mood: &str) -> bool {
        self.moods.iter().any(|m| m == mood)
    }

    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }
}

impl TryFrom<PlaceRecord> for Place {
    type Error = DataIntegrityError;

    fn try_from(record: PlaceRecord) -> Result<Self, Self::Error> {
        let place_name = record.place_name.ok_or_else(|| DataIntegrityError::MissingField {
            place_name: UNNAMED_PLACE.to_string(),
            field: "place_name",
        })?;

        let missing = |field: &'static str| DataIntegrityError::MissingField {
            place_name: place_name.clone(),
            field,
        };

        Ok(Self {
            lat: record.lat.ok_or_else(|| missing("lat"))?,
            long: record.long.ok_or_else(|| missing("long"))?,
            types: record.types.ok_or_else(|| missing("type"))?,
            subtypes: record.subtypes.unwrap_or_default(),
            moods: record.moods.ok_or_else(|| missing("mood"))?,
            budget_min: record.budget_min.ok_or_else(|| missing("budget_min"))?,
            budget_max: record.budget_max.ok_or_else(|| missing("budget_max"))?,
            rating: record.rating.ok_or_else(|| missing("rating"))?,
            status: record.status.ok_or_else(|| missing("status"))?,
            place_name,
        })
    }
}

/// Validated catalog snapshot for a single recommendation call
///
/// Owned by the call that loaded it; nothing derived during ranking is
/// written back into it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    /// Validate raw records, failing on the first malformed entry
    pub fn from_records(records: Vec<PlaceRecord>) -> Result<Self, DataIntegrityError> {
        let places = records
            .into_iter()
            .map(Place::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { places })
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl From<Vec<Place>> for Catalog {
    fn from(places: Vec<Place>) -> Self {
        Self { places }
    }
}

/// A place that survived every gate, paired with its call-scoped annotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlace<'a> {
    pub place: &'a Place,
    /// Kilometers from the user, rounded to 2 decimals
    pub calculated_distance: f64,
    pub score: f64,
}

/// Final, owned recommendation handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub place: Place,
    pub calculated_distance: f64,
    pub score: f64,
    pub uber_available: bool,
    pub uber_link: Option<String>,
}

/// User position, already resolved to coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Everything the user told us about the outing they want
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub mood: String,
    pub budget: u32,
    /// Radius selector: 10, 50 or 150
    pub energy: u32,
    #[serde(rename = "types")]
    pub place_types: Vec<String>,
    #[serde(rename = "subtypes", default)]
    pub subtypes: Vec<String>,
}

/// Parameters for a single engine pass over one category
#[derive(Debug, Clone, Copy)]
pub struct RecommendationQuery<'a> {
    pub lat: f64,
    pub lon: f64,
    pub mood: &'a str,
    pub budget: u32,
    pub energy: u32,
    pub place_type: &'a str,
    pub subtype: Option<&'a str>,
}

impl<'a> RecommendationQuery<'a> {
    pub fn new(
        location: UserLocation,
        preferences: &'a UserPreferences,
        place_type: &'a str,
        subtype: Option<&'a str>,
    ) -> Self {
        Self {
            lat: location.lat,
            lon: location.lon,
            mood: &preferences.mood,
            budget: preferences.budget,
            energy: preferences.energy,
            place_type,
            subtype,
        }
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Additive scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub mood_match: f64,
    pub rating_multiplier: f64,
    pub open_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            mood_match: 30.0,
            rating_multiplier: 10.0,
            open_bonus: 10.0,
        }
    }
}
