//! Map search box: merges venue matches with geocoded places.

use std::time::Duration;

use prokick_entities::{geo::MapPoint, id::Id, venue::Venue};

use crate::gateways::geolookup::GeoLookupGateway;

use super::Result;

/// Window between keystrokes and the lookup; callers debounce with
/// cancellable single-flight semantics so stale responses never land.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Queries shorter than this (but non-empty) produce no suggestions.
pub const SEARCH_MIN_QUERY_LEN: usize = 3;
/// Venue matches listed ahead of geocoded places, capped at this many.
pub const MAX_VENUE_SUGGESTIONS: usize = 3;
/// Cap on geocoded places appended after the venue matches.
pub const MAX_GEO_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub label: String,
    pub pos: MapPoint,
    /// Set when the suggestion is a venue rather than a geocoded place.
    pub venue_id: Option<Id>,
}

fn venue_suggestion(venue: &Venue) -> Suggestion {
    let label = match &venue.address {
        Some(address) => format!("🏟️ {} - {}", venue.name, address),
        None => format!("🏟️ {}", venue.name),
    };
    Suggestion {
        label,
        pos: venue.pos,
        venue_id: Some(venue.id.clone()),
    }
}

/// Suggestions for a focused but empty search box: the first venues.
pub fn default_suggestions(venues: &[Venue]) -> Vec<Suggestion> {
    venues
        .iter()
        .take(MAX_VENUE_SUGGESTIONS)
        .map(venue_suggestion)
        .collect()
}

/// Merged suggestion list for a query: substring venue matches first
/// (at most [`MAX_VENUE_SUGGESTIONS`]), then geocoded places.
pub fn search_suggestions<G: GeoLookupGateway + ?Sized>(
    geo: &G,
    venues: &[Venue],
    query: &str,
) -> Result<Vec<Suggestion>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(default_suggestions(venues));
    }
    if query.chars().count() < SEARCH_MIN_QUERY_LEN {
        return Ok(vec![]);
    }

    let mut suggestions: Vec<_> = venues
        .iter()
        .filter(|v| v.matches_text(query))
        .take(MAX_VENUE_SUGGESTIONS)
        .map(venue_suggestion)
        .collect();

    let places = geo.search_places(query, MAX_GEO_SUGGESTIONS)?;
    suggestions.extend(places.into_iter().map(|p| Suggestion {
        label: p.label,
        pos: p.pos,
        venue_id: None,
    }));

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::geolookup::{self, GeoSuggestion, Region};
    use prokick_entities::builders::venue;

    struct CannedGeo(Vec<GeoSuggestion>);

    impl GeoLookupGateway for CannedGeo {
        fn provinces(&self) -> geolookup::Result<Vec<Region>> {
            Ok(vec![])
        }
        fn municipalities(&self, _: &str) -> geolookup::Result<Vec<Region>> {
            Ok(vec![])
        }
        fn localities(&self, _: &str, _: Option<&str>) -> geolookup::Result<Vec<Region>> {
            Ok(vec![])
        }
        fn search_streets(&self, _: &str, _: &str, _: usize) -> geolookup::Result<Vec<Region>> {
            Ok(vec![])
        }
        fn resolve_address_lat_lng(&self, _: &str, _: &str, _: &str) -> Option<MapPoint> {
            None
        }
        fn search_places(&self, _: &str, max: usize) -> geolookup::Result<Vec<GeoSuggestion>> {
            Ok(self.0.iter().take(max).cloned().collect())
        }
    }

    fn venues() -> Vec<Venue> {
        vec![
            venue("v1", "El Potrero").pos(-31.6, -60.7).finish(),
            venue("v2", "Potrero Norte").pos(-31.5, -60.7).finish(),
            venue("v3", "La Redonda")
                .pos(-31.7, -60.6)
                .address("Calle Potrero 10")
                .finish(),
            venue("v4", "Potrero Sur").pos(-31.8, -60.7).finish(),
        ]
    }

    fn geocoded() -> Vec<GeoSuggestion> {
        vec![GeoSuggestion {
            label: "📍 San Martín 500, Santa Fe".into(),
            pos: MapPoint::try_from_lat_lng_deg(-31.64, -60.71).unwrap(),
        }]
    }

    #[test]
    fn empty_query_yields_the_first_venues() {
        let geo = CannedGeo(geocoded());
        let suggestions = search_suggestions(&geo, &venues(), "  ").unwrap();
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|s| s.venue_id.is_some()));
        assert_eq!(suggestions[0].venue_id, Some("v1".into()));
    }

    #[test]
    fn short_queries_are_silent() {
        let geo = CannedGeo(geocoded());
        assert!(search_suggestions(&geo, &venues(), "po").unwrap().is_empty());
    }

    #[test]
    fn venue_matches_come_first_and_are_capped() {
        let geo = CannedGeo(geocoded());
        let suggestions = search_suggestions(&geo, &venues(), "potrero").unwrap();
        // 4 venues match (v3 via its address) but only 3 survive the cap,
        // then the geocoded place follows.
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[..3].iter().all(|s| s.venue_id.is_some()));
        assert!(suggestions[3].venue_id.is_none());
        assert!(suggestions[3].label.starts_with("📍"));
    }

    #[test]
    fn venue_labels_include_the_address() {
        let geo = CannedGeo(vec![]);
        let suggestions = search_suggestions(&geo, &venues(), "redonda").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "🏟️ La Redonda - Calle Potrero 10");
    }
}
