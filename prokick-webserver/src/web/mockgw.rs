//! In-memory gateway fakes for the API tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use prokick_core::gateways::{
    backend::{
        self, AuthForwarding, BackendGateway, Error, LoginOutcome, NewOrganizerRequest,
        ProfileUpdate, RequestListQuery, RequestPage, SessionCookies, StatusChange,
        UserAndProfile,
    },
    geolookup::{self, GeoLookupGateway, GeoSuggestion, Region},
};
use prokick_entities::{
    geo::MapPoint,
    id::Id,
    profile::PlayerProfile,
    request::{OrganizerRequest, RequestStatus},
    time::Timestamp,
    user::User,
    venue::Venue,
};

pub const GOOD_ID_TOKEN: &str = "valid-google-id-token";

const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Default)]
pub struct MockBackend {
    pub venues: Mutex<Vec<Venue>>,
    pub requests: Mutex<Vec<OrganizerRequest>>,
    pub user: Mutex<Option<UserAndProfile>>,
    pub taken_handles: Mutex<Vec<String>>,
    pub venue_calls: AtomicUsize,
    pub handle_calls: AtomicUsize,
    venue_failure: Mutex<Option<String>>,
}

impl MockBackend {
    pub fn put_venue(&self, venue: Venue) {
        self.venues.lock().push(venue);
    }

    pub fn put_request(&self, request: OrganizerRequest) {
        self.requests.lock().push(request);
    }

    pub fn set_user(&self, data: UserAndProfile) {
        *self.user.lock() = Some(data);
    }

    pub fn fail_venues(&self, message: &str) {
        *self.venue_failure.lock() = Some(message.to_owned());
    }

    pub fn take_handle(&self, handle: &str) {
        self.taken_handles.lock().push(handle.to_owned());
    }

    fn authorized_user(&self, auth: &AuthForwarding) -> backend::Result<UserAndProfile> {
        if auth.is_empty() {
            return Err(Error::upstream(401, ""));
        }
        self.user
            .lock()
            .clone()
            .ok_or_else(|| Error::upstream(401, ""))
    }

    fn paginate(items: Vec<OrganizerRequest>, query: &RequestListQuery) -> RequestPage {
        let filtered: Vec<_> = items
            .into_iter()
            .filter(|r| query.status.map(|s| r.status == s).unwrap_or(true))
            .collect();
        let total = filtered.len() as u64;
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let total_pages = total.div_ceil(u64::from(limit)) as u32;
        let start = ((page - 1) * limit) as usize;
        let items = filtered
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        RequestPage {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

impl BackendGateway for MockBackend {
    fn login(&self, id_token: &str) -> backend::Result<LoginOutcome> {
        if id_token != GOOD_ID_TOKEN {
            return Err(Error::upstream(401, "Token inválido"));
        }
        let UserAndProfile { user, profile } = self
            .user
            .lock()
            .clone()
            .ok_or_else(|| Error::upstream(401, "Token inválido"))?;
        Ok(LoginOutcome {
            user,
            profile,
            is_new_user: false,
            set_cookies: vec![
                "accessToken=mock-access; Path=/; HttpOnly".into(),
                "refreshToken=mock-refresh; Path=/; HttpOnly".into(),
            ],
        })
    }

    fn logout(&self, _auth: &AuthForwarding) -> backend::Result<SessionCookies> {
        Ok(SessionCookies {
            message: Some("Sesión cerrada".into()),
            set_cookies: vec![],
        })
    }

    fn current_user(&self, auth: &AuthForwarding) -> backend::Result<UserAndProfile> {
        self.authorized_user(auth)
    }

    fn refresh_session(&self, auth: &AuthForwarding) -> backend::Result<SessionCookies> {
        if auth.cookie_header.is_none() {
            return Err(Error::Upstream {
                status: 401,
                message: "Sesión expirada".into(),
                should_logout: true,
            });
        }
        Ok(SessionCookies {
            message: Some("Sesión renovada".into()),
            set_cookies: vec!["accessToken=fresh; Path=/; HttpOnly".into()],
        })
    }

    fn update_profile(
        &self,
        auth: &AuthForwarding,
        update: &ProfileUpdate,
    ) -> backend::Result<PlayerProfile> {
        self.authorized_user(auth)?;
        let mut guard = self.user.lock();
        // Checked right above.
        let data = guard.as_mut().ok_or(Error::InvalidEnvelope)?;
        if let Some(handle) = &update.handle {
            data.profile.handle = handle.parse().map_err(|_| Error::InvalidEnvelope)?;
        }
        if let Some(name) = &update.name {
            data.profile.name = name.clone();
        }
        if let Some(location) = &update.location {
            data.profile.location = location.clone();
        }
        if let Some(positions) = &update.positions {
            data.profile.positions = positions.clone();
        }
        if update.foot.is_some() {
            data.profile.foot = update.foot.clone();
        }
        if update.height_cm.is_some() {
            data.profile.height_cm = update.height_cm;
        }
        if update.weight_kg.is_some() {
            data.profile.weight_kg = update.weight_kg;
        }
        if update.avatar_url.is_some() {
            data.profile.avatar_url = update.avatar_url.clone();
        }
        Ok(data.profile.clone())
    }

    fn check_handle(&self, _auth: &AuthForwarding, handle: &str) -> backend::Result<bool> {
        self.handle_calls.fetch_add(1, Ordering::SeqCst);
        Ok(!self.taken_handles.lock().iter().any(|h| h == handle))
    }

    fn all_venues(&self, _auth: &AuthForwarding) -> backend::Result<Vec<Venue>> {
        self.venue_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.venue_failure.lock().clone() {
            return Err(Error::upstream(500, message));
        }
        Ok(self.venues.lock().clone())
    }

    fn create_organizer_request(
        &self,
        request: &NewOrganizerRequest,
    ) -> backend::Result<OrganizerRequest> {
        let now = Timestamp::now();
        let stored = OrganizerRequest {
            id: Id::new(),
            user_id: request.user_id.clone(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone_number: request.phone_number.clone(),
            location: request.location.clone(),
            image: request.image.clone(),
            status: RequestStatus::initial(),
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.requests.lock().push(stored.clone());
        Ok(stored)
    }

    fn organizer_requests(
        &self,
        _auth: &AuthForwarding,
        query: &RequestListQuery,
    ) -> backend::Result<RequestPage> {
        Ok(Self::paginate(self.requests.lock().clone(), query))
    }

    fn organizer_request(
        &self,
        _auth: &AuthForwarding,
        id: &Id,
    ) -> backend::Result<OrganizerRequest> {
        self.requests
            .lock()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| Error::upstream(404, "Solicitud no encontrada"))
    }

    fn update_request_status(
        &self,
        id: &Id,
        change: &StatusChange,
    ) -> backend::Result<OrganizerRequest> {
        let mut requests = self.requests.lock();
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| Error::upstream(404, "Solicitud no encontrada"))?;
        request.status = change.status;
        request.rejection_reason = change.rejection_reason.clone();
        request.notes = change.notes.clone();
        request.updated_at = Timestamp::now();
        Ok(request.clone())
    }

    fn my_requests(
        &self,
        auth: &AuthForwarding,
        query: &RequestListQuery,
    ) -> backend::Result<RequestPage> {
        let user = self.authorized_user(auth)?;
        let mine: Vec<_> = self
            .requests
            .lock()
            .iter()
            .filter(|r| r.user_id == user.user.id)
            .cloned()
            .collect();
        Ok(Self::paginate(mine, query))
    }
}

#[derive(Default)]
pub struct MockGeo {
    pub suggestions: Vec<GeoSuggestion>,
}

impl MockGeo {
    pub fn with_place(label: &str, lat: f64, lng: f64) -> Self {
        Self {
            suggestions: vec![GeoSuggestion {
                label: label.to_owned(),
                pos: MapPoint::try_from_lat_lng_deg(lat, lng).unwrap(),
            }],
        }
    }
}

impl GeoLookupGateway for MockGeo {
    fn provinces(&self) -> geolookup::Result<Vec<Region>> {
        Ok(vec![
            Region {
                id: "06".into(),
                name: "Buenos Aires".into(),
            },
            Region {
                id: "82".into(),
                name: "Santa Fe".into(),
            },
        ])
    }

    fn municipalities(&self, province: &str) -> geolookup::Result<Vec<Region>> {
        if province == "Santa Fe" {
            Ok(vec![
                Region {
                    id: "820063".into(),
                    name: "Rosario".into(),
                },
                Region {
                    id: "820021".into(),
                    name: "Santa Fe".into(),
                },
            ])
        } else {
            Ok(vec![])
        }
    }

    fn localities(&self, _province: &str, _municipality: Option<&str>) -> geolookup::Result<Vec<Region>> {
        Ok(vec![Region {
            id: "8200210001".into(),
            name: "Santa Fe".into(),
        }])
    }

    fn search_streets(&self, _: &str, name: &str, _: usize) -> geolookup::Result<Vec<Region>> {
        Ok(vec![Region {
            id: "8200211234".into(),
            name: format!("Calle {name}"),
        }])
    }

    fn resolve_address_lat_lng(&self, _: &str, _: &str, _: &str) -> Option<MapPoint> {
        MapPoint::try_from_lat_lng_deg(-31.6333, -60.7)
    }

    fn search_places(&self, _query: &str, max: usize) -> geolookup::Result<Vec<GeoSuggestion>> {
        Ok(self.suggestions.iter().take(max).cloned().collect())
    }
}

/// A default signed-in account used by most tests.
pub fn sample_user() -> UserAndProfile {
    UserAndProfile {
        user: User {
            id: Id::from("u1"),
            email: Some("maria@example.com".into()),
            name: Some("María".into()),
            avatar_url: None,
            roles: vec!["player".into()],
            is_verified: true,
            created_at: Timestamp::from_secs(1_700_000_000),
            last_login_at: None,
            subscription: None,
        },
        profile: PlayerProfile {
            id: "p1".into(),
            handle: "maria07".parse().unwrap(),
            name: "María".into(),
            location: Default::default(),
            foot: Some("right".into()),
            positions: vec!["ST".into()],
            height_cm: Some(170),
            weight_kg: None,
            avatar_url: None,
            elo: 1100.0,
            reputation: 75.into(),
            stats: Default::default(),
        },
    }
}
