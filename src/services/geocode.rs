use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::Geocoder;
use crate::models::Coordinate;

/// Errors that can occur when loading a geocoder table
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("failed to read geocoder table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse geocoder table {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    latitude: f64,
    longitude: f64,
}

/// Geocoder backed by an operator-supplied JSON lookup table
///
/// Keys are free-text place names; lookups are trimmed and case-folded.
/// This keeps literal city tables out of the engine; deployments swap the
/// table without touching matching code.
#[derive(Debug)]
pub struct StaticGeocoder {
    table: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    /// Load a `{ "place name": {"latitude": .., "longitude": ..} }` table
    pub fn from_file(path: &Path) -> Result<Self, GeocodeError> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| GeocodeError::Io {
            path: display.clone(),
            source,
        })?;
        let raw: HashMap<String, TableEntry> =
            serde_json::from_slice(&bytes).map_err(|source| GeocodeError::Parse {
                path: display,
                source,
            })?;

        let table = raw
            .into_iter()
            .map(|(name, entry)| (normalize(&name), Coordinate::new(entry.latitude, entry.longitude)))
            .collect();
        Ok(Self { table })
    }

    pub fn from_table(entries: HashMap<String, Coordinate>) -> Self {
        let table = entries
            .into_iter()
            .map(|(name, coordinate)| (normalize(&name), coordinate))
            .collect();
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, text: &str) -> Option<Coordinate> {
        self.table.get(&normalize(text)).copied()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut entries = HashMap::new();
        entries.insert("Dallas".to_string(), Coordinate::new(32.77, -96.79));
        let geocoder = StaticGeocoder::from_table(entries);

        assert_eq!(geocoder.geocode("dallas"), Some(Coordinate::new(32.77, -96.79)));
        assert_eq!(geocoder.geocode("  DALLAS "), Some(Coordinate::new(32.77, -96.79)));
        assert_eq!(geocoder.geocode("Austin"), None);
    }

    #[test]
    fn test_from_file_parses_table() {
        let path = std::env::temp_dir().join(format!("geocoder-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"Dallas": {"latitude": 32.77, "longitude": -96.79}}"#).unwrap();

        let geocoder = StaticGeocoder::from_file(&path).unwrap();
        assert_eq!(geocoder.len(), 1);
        assert!(geocoder.geocode("Dallas").is_some());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_table_is_io_error() {
        let err = StaticGeocoder::from_file(Path::new("/nonexistent/table.json")).unwrap_err();
        assert!(matches!(err, GeocodeError::Io { .. }));
    }
}
