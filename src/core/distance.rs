use crate::models::GeoBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Float overshoot near antipodes can push `a` just past 1.0
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Round a distance to two decimals for display and tie-breaking
#[inline]
pub fn round_distance(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

/// Check if a point lies strictly inside a bounding box
///
/// Points on the edge are outside.
#[inline]
pub fn is_inside_geobox(lat: f64, lon: f64, bbox: &GeoBox) -> bool {
    lat > bbox.min_lat
        && lat < bbox.max_lat
        && lon > bbox.min_lon
        && lon < bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(haversine_distance(11.0168, 76.9558, 11.0168, 76.9558), 0.0);
    }

    #[test]
    fn test_antipodal_points_do_not_nan() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!(distance.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // On a meridian the haversine reduces to R * delta_lat
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        let distance = haversine_distance(10.0, 76.0, 11.0, 76.0);
        assert!((distance - expected).abs() < 1e-6);
    }

    #[test]
    fn test_round_distance() {
        assert_eq!(round_distance(1.23456), 1.23);
        assert_eq!(round_distance(9.999), 10.0);
        assert_eq!(round_distance(0.0), 0.0);
    }

    #[test]
    fn test_geobox_is_strict() {
        let bbox = GeoBox {
            min_lat: 10.5,
            max_lat: 11.5,
            min_lon: 76.6,
            max_lon: 77.1,
        };

        assert!(is_inside_geobox(11.0, 76.9, &bbox));
        assert!(!is_inside_geobox(10.5, 76.9, &bbox));
        assert!(!is_inside_geobox(11.0, 77.1, &bbox));
        assert!(!is_inside_geobox(0.0, 0.0, &bbox));
    }
}
