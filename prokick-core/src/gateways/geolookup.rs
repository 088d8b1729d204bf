//! Contract towards the geographic reference API (Georef).

use prokick_entities::geo::MapPoint;
use thiserror::Error;

/// A named administrative unit (province, municipality, locality, street).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub name: String,
}

/// A geocoded free-text match with a human-readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSuggestion {
    pub label: String,
    pub pos: MapPoint,
}

#[derive(Debug, Error)]
#[error("geographic lookup failed: {0}")]
pub struct Error(pub String);

pub type Result<T> = std::result::Result<T, Error>;

pub trait GeoLookupGateway {
    fn provinces(&self) -> Result<Vec<Region>>;
    fn municipalities(&self, province: &str) -> Result<Vec<Region>>;
    fn localities(&self, province: &str, municipality: Option<&str>) -> Result<Vec<Region>>;
    fn search_streets(&self, province: &str, name: &str, max: usize) -> Result<Vec<Region>>;
    /// First geocoding match for a street address, if any.
    fn resolve_address_lat_lng(
        &self,
        province: &str,
        city: &str,
        address: &str,
    ) -> Option<MapPoint>;
    /// Free-text lookup over street addresses and localities, used by the
    /// map search box. Partial upstream failures yield fewer results, not
    /// an error.
    fn search_places(&self, query: &str, max: usize) -> Result<Vec<GeoSuggestion>>;
}
