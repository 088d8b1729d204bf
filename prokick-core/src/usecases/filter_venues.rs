//! In-memory filtering and aggregate stats over the venue list.

use prokick_entities::{
    geo::MapPoint,
    venue::{Venue, VenueKind},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueFilter {
    pub kind: Option<VenueKind>,
    pub text: Option<String>,
    /// Keep only venues within the radius (km) of the point, ordered by
    /// distance.
    pub near: Option<(MapPoint, f64)>,
}

fn matches_owner(venue: &Venue, needle: &str) -> bool {
    venue
        .owner
        .as_deref()
        .map(|o| o.to_lowercase().contains(needle))
        .unwrap_or(false)
}

pub fn filter_venues(venues: &[Venue], filter: &VenueFilter) -> Vec<Venue> {
    let needle = filter.text.as_deref().map(str::to_lowercase);
    let mut result: Vec<Venue> = venues
        .iter()
        .filter(|v| filter.kind.map(|k| v.kind == k).unwrap_or(true))
        .filter(|v| match &needle {
            Some(needle) => v.matches_text(needle) || matches_owner(v, needle),
            None => true,
        })
        .filter(|v| match filter.near {
            Some((center, radius_km)) => v.pos.distance_km(center) <= radius_km,
            None => true,
        })
        .cloned()
        .collect();

    if let Some((center, _)) = filter.near {
        result.sort_by(|a, b| {
            a.pos
                .distance_km(center)
                .total_cmp(&b.pos.distance_km(center))
        });
    }
    result
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VenueStats {
    pub total: usize,
    pub organizer: usize,
    pub first_team: usize,
    pub avg_reputation: f64,
    pub with_image: usize,
    pub with_phone: usize,
}

pub fn venue_stats(venues: &[Venue]) -> VenueStats {
    let mut stats = VenueStats {
        total: venues.len(),
        ..Default::default()
    };
    if venues.is_empty() {
        return stats;
    }
    let mut reputation_sum = 0i64;
    for v in venues {
        match v.kind {
            VenueKind::Organizer => stats.organizer += 1,
            VenueKind::FirstTeam => stats.first_team += 1,
        }
        reputation_sum += i64::from(v.reputation.value());
        if v.image_url.is_some() {
            stats.with_image += 1;
        }
        if v.phone.is_some() {
            stats.with_phone += 1;
        }
    }
    stats.avg_reputation = reputation_sum as f64 / venues.len() as f64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use prokick_entities::builders::venue;

    fn venues() -> Vec<Venue> {
        vec![
            venue("v1", "El Potrero")
                .pos(-31.6333, -60.7)
                .reputation(90)
                .owner("Carlos")
                .phone("+54 342 555 0001")
                .finish(),
            venue("v2", "Estadio Colón")
                .pos(-31.645, -60.725)
                .kind(VenueKind::FirstTeam)
                .reputation(70)
                .owner("Colón")
                .image_url("https://img.example.com/colon.webp")
                .finish(),
            venue("v3", "Canchita Lejana")
                .pos(-34.6, -58.38)
                .reputation(30)
                .finish(),
        ]
    }

    #[test]
    fn filter_by_kind() {
        let result = filter_venues(
            &venues(),
            &VenueFilter {
                kind: Some(VenueKind::FirstTeam),
                ..Default::default()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "v2".into());
    }

    #[test]
    fn text_filter_also_matches_the_owner() {
        let result = filter_venues(
            &venues(),
            &VenueFilter {
                text: Some("carlos".into()),
                ..Default::default()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "v1".into());
    }

    #[test]
    fn radius_filter_orders_by_distance() {
        let center = MapPoint::try_from_lat_lng_deg(-31.64, -60.71).unwrap();
        let result = filter_venues(
            &venues(),
            &VenueFilter {
                near: Some((center, 50.0)),
                ..Default::default()
            },
        );
        // The Buenos Aires venue is out of range.
        assert_eq!(result.len(), 2);
        assert!(result[0].pos.distance_km(center) <= result[1].pos.distance_km(center));
    }

    #[test]
    fn stats_aggregate() {
        let stats = venue_stats(&venues());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.organizer, 2);
        assert_eq!(stats.first_team, 1);
        assert_eq!(stats.with_image, 1);
        assert_eq!(stats.with_phone, 1);
        assert!((stats.avg_reputation - 63.333).abs() < 0.01);
    }

    #[test]
    fn stats_of_nothing() {
        assert_eq!(venue_stats(&[]), VenueStats::default());
    }
}
