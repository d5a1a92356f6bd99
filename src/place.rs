//! Local place gazetteer.
//!
//! Stands in for the map search and reverse-geocode collaborators: a small
//! `places.json` in the data dir holds named coordinates that `tm place`
//! maintains and that task creation resolves against.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::proximity::{distance_m, Coordinates};
use crate::storage::Storage;

const PLACES_SCHEMA_VERSION: &str = "tm.places.v1";

/// Reverse geocoding gives up beyond this radius.
pub const REVERSE_GEOCODE_CUTOFF_M: f64 = 1_000.0;

/// A named location attached to tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlacesFile {
    schema_version: String,
    places: Vec<Place>,
}

impl PlacesFile {
    fn empty() -> Self {
        Self {
            schema_version: PLACES_SCHEMA_VERSION.to_string(),
            places: Vec::new(),
        }
    }
}

/// Gazetteer over `places.json`
#[derive(Debug, Clone)]
pub struct PlaceIndex {
    storage: Storage,
}

impl PlaceIndex {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> Result<Vec<Place>> {
        Ok(self.load()?.places)
    }

    /// Add a place, replacing any existing entry with the same name
    /// (case-insensitive).
    pub fn add(&self, place: Place) -> Result<()> {
        let name = place.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "place name cannot be empty".to_string(),
            ));
        }
        let place = Place {
            name: name.to_string(),
            ..place
        };

        let path = self.storage.places_file();
        let lock_path = path.with_extension("lock");
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut file = self.load()?;
        file.places
            .retain(|existing| !existing.name.eq_ignore_ascii_case(&place.name));
        file.places.push(place);
        file.places
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        self.storage.write_json(&path, &file)
    }

    /// One-shot place search: case-insensitive substring match on the name,
    /// ranked by match position, then name.
    pub fn search(&self, query: &str) -> Result<Vec<Place>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(Error::InvalidArgument(
                "search query cannot be empty".to_string(),
            ));
        }

        let mut ranked: Vec<(usize, Place)> = self
            .load()?
            .places
            .into_iter()
            .filter_map(|place| {
                place
                    .name
                    .to_lowercase()
                    .find(&needle)
                    .map(|position| (position, place))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
        Ok(ranked.into_iter().map(|(_, place)| place).collect())
    }

    /// One-shot reverse geocode: nearest stored place within the cutoff.
    pub fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<Place>> {
        let nearest = self
            .load()?
            .places
            .into_iter()
            .map(|place| (distance_m(coords, place.coordinates()), place))
            .filter(|(distance, _)| *distance <= REVERSE_GEOCODE_CUTOFF_M)
            .min_by(|a, b| a.0.total_cmp(&b.0));
        Ok(nearest.map(|(_, place)| place))
    }

    fn load(&self) -> Result<PlacesFile> {
        let path = self.storage.places_file();
        if !path.exists() {
            return Ok(PlacesFile::empty());
        }
        self.storage.read_json(&path)
    }
}
