use crate::models::Coordinate;

/// Injected collaborator resolving free-form location text to a coordinate
///
/// The engine never embeds its own lookup tables; deployments supply an
/// implementation (see `services::geocode`) or run without one.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, text: &str) -> Option<Coordinate>;
}

/// Default geocoder that resolves nothing, leaving text-only locations to
/// the classifier's text-match fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGeocoder;

impl Geocoder for NullGeocoder {
    fn geocode(&self, _text: &str) -> Option<Coordinate> {
        None
    }
}
