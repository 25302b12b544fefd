use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to every box edge so points lying exactly on the radius
/// are not lost to rounding
const BOX_EPSILON_DEG: f64 = 1e-9;

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
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box enclosing every point within `radius_km` of `center`
///
/// Used as a cheap pre-filter before Haversine, so the box always contains
/// the whole circle. Longitude is left unbounded when the circle reaches a
/// pole or wraps across the antimeridian.
///
/// Assumes longitudes normalised to [-180, 180]; points outside that range
/// may lie within the radius yet outside the box.
pub fn calculate_bounding_box(center: &GeoPoint, radius_km: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees() + BOX_EPSILON_DEG;

    let min_lat = center.latitude - lat_delta;
    let max_lat = center.latitude + lat_delta;

    let unbounded = BoundingBox {
        min_lat,
        max_lat,
        min_lon: f64::NEG_INFINITY,
        max_lon: f64::INFINITY,
    };

    if min_lat <= -90.0 || max_lat >= 90.0 || angular >= std::f64::consts::FRAC_PI_2 {
        return unbounded;
    }

    let ratio = angular.sin() / center.latitude.to_radians().cos();
    if ratio.is_nan() || ratio >= 1.0 {
        return unbounded;
    }

    let lon_delta = ratio.asin().to_degrees() + BOX_EPSILON_DEG;
    let min_lon = center.longitude - lon_delta;
    let max_lon = center.longitude + lon_delta;

    if min_lon < -180.0 || max_lon > 180.0 {
        return unbounded;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}
