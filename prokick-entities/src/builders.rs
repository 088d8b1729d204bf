//! Fluent constructors for tests and fixtures.

pub use self::{request_builder::*, venue_builder::*};

pub mod venue_builder {

    use crate::{geo::MapPoint, reputation::ReputationScore, venue::*};

    /// Organizer venue at the map origin with a neutral reputation.
    pub fn venue(id: &str, name: &str) -> VenueBuild {
        VenueBuild {
            venue: Venue {
                id: id.into(),
                name: name.into(),
                pos: MapPoint::default(),
                kind: VenueKind::Organizer,
                reputation: ReputationScore::new(50),
                owner: None,
                address: None,
                phone: None,
                image_url: None,
                description: None,
            },
        }
    }

    #[derive(Debug)]
    pub struct VenueBuild {
        venue: Venue,
    }

    impl VenueBuild {
        pub fn pos(mut self, lat: f64, lng: f64) -> Self {
            self.venue.pos = MapPoint::try_from_lat_lng_deg(lat, lng).unwrap();
            self
        }
        pub fn kind(mut self, kind: VenueKind) -> Self {
            self.venue.kind = kind;
            self
        }
        pub fn reputation(mut self, score: i16) -> Self {
            self.venue.reputation = score.into();
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.venue.owner = Some(owner.into());
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.venue.address = Some(address.into());
            self
        }
        pub fn phone(mut self, phone: &str) -> Self {
            self.venue.phone = Some(phone.into());
            self
        }
        pub fn image_url(mut self, url: &str) -> Self {
            self.venue.image_url = Some(url.into());
            self
        }
        pub fn finish(self) -> Venue {
            self.venue
        }
    }
}

pub mod request_builder {

    use crate::{id::Id, location::*, request::*, time::Timestamp};

    /// Freshly submitted request with placeholder contact data.
    pub fn organizer_request(id: &str, user_id: &str) -> RequestBuild {
        let now = Timestamp::now();
        RequestBuild {
            request: OrganizerRequest {
                id: id.into(),
                user_id: user_id.into(),
                name: "Juan Pérez".into(),
                email: "juan@example.com".into(),
                phone_number: "541123456789".into(),
                location: Location {
                    country: COUNTRY_AR.into(),
                    province: "Santa Fe".into(),
                    city: "Santa Fe".into(),
                    address: Some("San Martín 1234".into()),
                    pos: None,
                },
                image: None,
                status: RequestStatus::initial(),
                reviewed_by: None,
                reviewed_at: None,
                rejection_reason: None,
                notes: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[derive(Debug)]
    pub struct RequestBuild {
        request: OrganizerRequest,
    }

    impl RequestBuild {
        pub fn status(mut self, status: RequestStatus) -> Self {
            self.request.status = status;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.request.name = name.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.request.email = email.into();
            self
        }
        pub fn reviewed_by(mut self, id: &str, name: &str) -> Self {
            self.request.reviewed_by = Some(Reviewer {
                id: Id::from(id),
                name: name.into(),
            });
            self
        }
        pub fn rejection_reason(mut self, reason: &str) -> Self {
            self.request.rejection_reason = Some(reason.into());
            self
        }
        pub fn created_at(mut self, at: Timestamp) -> Self {
            self.request.created_at = at;
            self
        }
        pub fn finish(self) -> OrganizerRequest {
            self.request
        }
    }
}
