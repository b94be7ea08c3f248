use thiserror::Error;

use crate::models::Coordinate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors from the checked distance entry point
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// Great-circle distance between two coordinates in kilometers
///
/// Every distance in this service is kilometers; no call site converts to
/// miles. Fails with `InvalidCoordinate` when either point is out of range.
/// Symmetric, and zero for identical points.
pub fn distance_km(from: Coordinate, to: Coordinate) -> Result<f64, GeoError> {
    for point in [from, to] {
        if !point.is_valid() {
            return Err(GeoError::InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }
    }
    Ok(haversine_km(from.latitude, from.longitude, to.latitude, to.longitude))
}

/// Haversine formula on a spherical Earth
#[inline]
fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
