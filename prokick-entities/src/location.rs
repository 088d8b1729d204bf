use crate::geo::MapPoint;

/// ISO 3166-1 alpha-2 code of the only country served today.
pub const COUNTRY_AR: &str = "AR";

/// A place within a country, resolved down to an optional street address.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    pub province: String,
    pub city: String,
    pub address: Option<String>,
    pub pos: Option<MapPoint>,
}
