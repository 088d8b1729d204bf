use super::*;
use prokick_entities as e;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid coordinates")]
    Coordinates,
    #[error("unknown venue kind: {0}")]
    VenueKind(String),
    #[error("unknown request status: {0}")]
    RequestStatus(String),
    #[error("invalid timestamp")]
    Timestamp(#[from] time::error::Parse),
    #[error(transparent)]
    Handle(#[from] e::profile::HandleParseError),
}

fn parse_timestamp(s: &str) -> Result<e::time::Timestamp, ConversionError> {
    Ok(e::time::Timestamp::parse_rfc3339(s)?)
}

fn format_timestamp(ts: e::time::Timestamp) -> String {
    // Infallible for timestamps within the RFC 3339 year range.
    ts.format_rfc3339().unwrap_or_else(|_| ts.as_millis().to_string())
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        Self {
            lat: from.lat_deg(),
            lng: from.lng_deg(),
        }
    }
}

impl TryFrom<Coordinate> for e::geo::MapPoint {
    type Error = ConversionError;
    fn try_from(from: Coordinate) -> Result<Self, Self::Error> {
        e::geo::MapPoint::try_from_lat_lng_deg(from.lat, from.lng)
            .ok_or(ConversionError::Coordinates)
    }
}

impl TryFrom<Venue> for e::venue::Venue {
    type Error = ConversionError;
    fn try_from(from: Venue) -> Result<Self, Self::Error> {
        let Venue {
            id,
            name,
            lat,
            lng,
            tipo,
            reputacion,
            organizador,
            equipo,
            address,
            phone,
            image,
            description,
            marker: _,
        } = from;
        let kind: e::venue::VenueKind = tipo
            .parse()
            .map_err(|_| ConversionError::VenueKind(tipo))?;
        let pos = e::geo::MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or(ConversionError::Coordinates)?;
        let owner = match kind {
            e::venue::VenueKind::Organizer => organizador,
            e::venue::VenueKind::FirstTeam => equipo,
        };
        Ok(Self {
            id: id.into(),
            name,
            pos,
            kind,
            reputation: reputacion.into(),
            owner,
            address,
            phone,
            image_url: image,
            description,
        })
    }
}

impl From<e::venue::Venue> for Venue {
    fn from(from: e::venue::Venue) -> Self {
        let e::venue::Venue {
            id,
            name,
            pos,
            kind,
            reputation,
            owner,
            address,
            phone,
            image_url,
            description,
        } = from;
        let (organizador, equipo) = match kind {
            e::venue::VenueKind::Organizer => (owner, None),
            e::venue::VenueKind::FirstTeam => (None, owner),
        };
        Self {
            id: id.into(),
            name,
            lat: pos.lat_deg(),
            lng: pos.lng_deg(),
            tipo: kind.to_string(),
            reputacion: reputation.into(),
            organizador,
            equipo,
            address,
            phone,
            image: image_url,
            description,
            marker: None,
        }
    }
}

impl From<VenueLimit> for e::subscription::VenueLimit {
    fn from(from: VenueLimit) -> Self {
        match from {
            VenueLimit::Count(n) => Self::Limited(n),
            VenueLimit::Text(_) => Self::Unlimited,
        }
    }
}

impl From<e::subscription::VenueLimit> for VenueLimit {
    fn from(from: e::subscription::VenueLimit) -> Self {
        match from {
            e::subscription::VenueLimit::Limited(n) => Self::Count(n),
            e::subscription::VenueLimit::Unlimited => Self::Text("unlimited".into()),
        }
    }
}

impl From<Subscription> for e::subscription::Subscription {
    fn from(from: Subscription) -> Self {
        let Subscription {
            plan,
            seats_teams,
            venues_limit,
            status,
        } = from;
        Self {
            plan,
            seats_teams,
            venues_limit: venues_limit.into(),
            status,
        }
    }
}

impl From<e::subscription::Subscription> for Subscription {
    fn from(from: e::subscription::Subscription) -> Self {
        let e::subscription::Subscription {
            plan,
            seats_teams,
            venues_limit,
            status,
        } = from;
        Self {
            plan,
            seats_teams,
            venues_limit: venues_limit.into(),
            status,
        }
    }
}

impl TryFrom<User> for e::user::User {
    type Error = ConversionError;
    fn try_from(from: User) -> Result<Self, Self::Error> {
        let User {
            id,
            email,
            name,
            avatar_url,
            roles,
            is_verified,
            created_at,
            last_login_at,
            subscription,
        } = from;
        Ok(Self {
            id: id.into(),
            email,
            name,
            avatar_url,
            roles,
            is_verified,
            created_at: parse_timestamp(&created_at)?,
            last_login_at: last_login_at.as_deref().map(parse_timestamp).transpose()?,
            subscription: subscription.map(Into::into),
        })
    }
}

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            id,
            email,
            name,
            avatar_url,
            roles,
            is_verified,
            created_at,
            last_login_at,
            subscription,
        } = from;
        Self {
            id: id.into(),
            email,
            name,
            avatar_url,
            roles,
            is_verified,
            created_at: format_timestamp(created_at),
            last_login_at: last_login_at.map(format_timestamp),
            subscription: subscription.map(Into::into),
        }
    }
}

impl From<GameTally> for e::profile::GameTally {
    fn from(from: GameTally) -> Self {
        let GameTally {
            total,
            wins,
            losses,
            draws,
        } = from;
        Self {
            total,
            wins,
            losses,
            draws,
        }
    }
}

impl From<e::profile::GameTally> for GameTally {
    fn from(from: e::profile::GameTally) -> Self {
        let e::profile::GameTally {
            total,
            wins,
            losses,
            draws,
        } = from;
        Self {
            total,
            wins,
            losses,
            draws,
        }
    }
}

impl From<PlayerStats> for e::profile::PlayerStats {
    fn from(from: PlayerStats) -> Self {
        let PlayerStats {
            games,
            goals,
            assists,
            mvps,
            yellow_cards,
            red_cards,
        } = from;
        Self {
            games: games.into(),
            goals,
            assists,
            mvps,
            yellow_cards,
            red_cards,
        }
    }
}

impl From<e::profile::PlayerStats> for PlayerStats {
    fn from(from: e::profile::PlayerStats) -> Self {
        let e::profile::PlayerStats {
            games,
            goals,
            assists,
            mvps,
            yellow_cards,
            red_cards,
        } = from;
        Self {
            games: games.into(),
            goals,
            assists,
            mvps,
            yellow_cards,
            red_cards,
        }
    }
}

impl From<ProfileLocation> for e::location::Location {
    fn from(from: ProfileLocation) -> Self {
        let ProfileLocation {
            country,
            province,
            city,
        } = from;
        Self {
            country,
            province,
            city,
            address: None,
            pos: None,
        }
    }
}

impl From<e::location::Location> for ProfileLocation {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            country,
            province,
            city,
            ..
        } = from;
        Self {
            country,
            province,
            city,
        }
    }
}

impl TryFrom<PlayerProfile> for e::profile::PlayerProfile {
    type Error = ConversionError;
    fn try_from(from: PlayerProfile) -> Result<Self, Self::Error> {
        let PlayerProfile {
            id,
            handle,
            name,
            location,
            foot,
            positions,
            height_cm,
            weight_kg,
            avatar_url,
            elo,
            reputation,
            stats,
        } = from;
        Ok(Self {
            id: id.into(),
            handle: handle.parse()?,
            name,
            location: location.into(),
            foot,
            positions,
            height_cm,
            weight_kg,
            avatar_url,
            elo,
            reputation: reputation.into(),
            stats: stats.into(),
        })
    }
}

impl From<e::profile::PlayerProfile> for PlayerProfile {
    fn from(from: e::profile::PlayerProfile) -> Self {
        let e::profile::PlayerProfile {
            id,
            handle,
            name,
            location,
            foot,
            positions,
            height_cm,
            weight_kg,
            avatar_url,
            elo,
            reputation,
            stats,
        } = from;
        Self {
            id: id.into(),
            handle: handle.into(),
            name,
            location: location.into(),
            foot,
            positions,
            height_cm,
            weight_kg,
            avatar_url,
            elo,
            reputation: reputation.into(),
            stats: stats.into(),
        }
    }
}

impl TryFrom<RequestLocation> for e::location::Location {
    type Error = ConversionError;
    fn try_from(from: RequestLocation) -> Result<Self, Self::Error> {
        let RequestLocation {
            country,
            province,
            city,
            address,
            coordinates,
        } = from;
        Ok(Self {
            country,
            province,
            city,
            address,
            pos: coordinates.map(TryInto::try_into).transpose()?,
        })
    }
}

impl From<e::location::Location> for RequestLocation {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            country,
            province,
            city,
            address,
            pos,
        } = from;
        Self {
            country,
            province,
            city,
            address,
            coordinates: pos.map(Into::into),
        }
    }
}

impl From<Reviewer> for e::request::Reviewer {
    fn from(from: Reviewer) -> Self {
        let Reviewer { id, name } = from;
        Self {
            id: id.into(),
            name,
        }
    }
}

impl From<e::request::Reviewer> for Reviewer {
    fn from(from: e::request::Reviewer) -> Self {
        let e::request::Reviewer { id, name } = from;
        Self {
            id: id.into(),
            name,
        }
    }
}

impl TryFrom<OrganizerRequest> for e::request::OrganizerRequest {
    type Error = ConversionError;
    fn try_from(from: OrganizerRequest) -> Result<Self, Self::Error> {
        let OrganizerRequest {
            id,
            user_id,
            name,
            email,
            phone_number,
            location,
            image,
            status,
            reviewed_by,
            reviewed_at,
            rejection_reason,
            notes,
            created_at,
            updated_at,
        } = from;
        let status: e::request::RequestStatus = status
            .parse()
            .map_err(|_| ConversionError::RequestStatus(status))?;
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            name,
            email,
            phone_number,
            location: location.try_into()?,
            image,
            status,
            reviewed_by: reviewed_by.map(Into::into),
            reviewed_at: reviewed_at.as_deref().map(parse_timestamp).transpose()?,
            rejection_reason,
            notes,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}

impl From<e::request::OrganizerRequest> for OrganizerRequest {
    fn from(from: e::request::OrganizerRequest) -> Self {
        let e::request::OrganizerRequest {
            id,
            user_id,
            name,
            email,
            phone_number,
            location,
            image,
            status,
            reviewed_by,
            reviewed_at,
            rejection_reason,
            notes,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name,
            email,
            phone_number,
            location: location.into(),
            image,
            status: status.to_string(),
            reviewed_by: reviewed_by.map(Into::into),
            reviewed_at: reviewed_at.map(format_timestamp),
            rejection_reason,
            notes,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_owner_field_follows_kind() {
        let json = Venue {
            id: "v1".into(),
            name: "La Bombonerita".into(),
            lat: -31.6,
            lng: -60.7,
            tipo: "equipo_primera".into(),
            reputacion: 70,
            organizador: None,
            equipo: Some("Colón".into()),
            address: None,
            phone: None,
            image: None,
            description: None,
            marker: None,
        };
        let venue = e::venue::Venue::try_from(json).unwrap();
        assert_eq!(venue.kind, e::venue::VenueKind::FirstTeam);
        assert_eq!(venue.owner.as_deref(), Some("Colón"));

        let back = Venue::from(venue);
        assert_eq!(back.tipo, "equipo_primera");
        assert_eq!(back.equipo.as_deref(), Some("Colón"));
        assert!(back.organizador.is_none());
    }

    #[test]
    fn unknown_venue_kind_is_rejected() {
        let json = Venue {
            id: "v1".into(),
            name: "x".into(),
            lat: 0.0,
            lng: 0.0,
            tipo: "gimnasio".into(),
            reputacion: 0,
            organizador: None,
            equipo: None,
            address: None,
            phone: None,
            image: None,
            description: None,
            marker: None,
        };
        assert!(matches!(
            e::venue::Venue::try_from(json),
            Err(ConversionError::VenueKind(_))
        ));
    }
}
