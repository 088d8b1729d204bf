//! Contract towards the external ProKick backend.
//!
//! The backend owns persistence, authentication, and the review workflow;
//! this service forwards credentials verbatim and mirrors the records.

use prokick_entities::{
    id::Id,
    location::Location,
    profile::PlayerProfile,
    request::{OrganizerRequest, RequestStatus},
    user::User,
    venue::Venue,
};
use thiserror::Error;

/// Credentials captured from the incoming request, forwarded verbatim.
#[derive(Debug, Clone, Default)]
pub struct AuthForwarding {
    /// Bearer token, taken from the `access_token` cookie or from the
    /// `Authorization` header.
    pub bearer_token: Option<String>,
    /// The raw `Cookie` header of the incoming request.
    pub cookie_header: Option<String>,
}

impl AuthForwarding {
    pub fn bearer_only(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            cookie_header: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bearer_token.is_none() && self.cookie_header.is_none()
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        should_logout: bool,
    },
    /// The response body did not match the `{success, data}` envelope.
    #[error("unexpected response from the backend")]
    InvalidEnvelope,
    #[error("backend request failed: {0}")]
    Transport(String),
}

impl Error {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            should_logout: false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct UserAndProfile {
    pub user: User,
    pub profile: PlayerProfile,
}

/// Outcome of a successful third-party sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: User,
    pub profile: PlayerProfile,
    pub is_new_user: bool,
    /// `Set-Cookie` headers to propagate to the browser.
    pub set_cookies: Vec<String>,
}

/// Outcome of logout/refresh calls that only move cookies around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pub message: Option<String>,
    pub set_cookies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestPage {
    pub items: Vec<OrganizerRequest>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// A validated organizer application, ready to be forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganizerRequest {
    pub user_id: Id,
    pub name: String,
    pub email: String,
    /// Calling code and subscriber digits flattened, e.g. `541123456789`.
    pub phone_number: String,
    pub location: Location,
    pub image: Option<String>,
}

/// Partial profile update; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub handle: Option<String>,
    pub name: Option<String>,
    pub location: Option<Location>,
    pub foot: Option<String>,
    pub positions: Option<Vec<String>>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Review decision applied to an organizer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
}

pub trait BackendGateway {
    fn login(&self, id_token: &str) -> Result<LoginOutcome>;
    fn logout(&self, auth: &AuthForwarding) -> Result<SessionCookies>;
    fn current_user(&self, auth: &AuthForwarding) -> Result<UserAndProfile>;
    fn refresh_session(&self, auth: &AuthForwarding) -> Result<SessionCookies>;
    fn update_profile(&self, auth: &AuthForwarding, update: &ProfileUpdate)
        -> Result<PlayerProfile>;
    fn check_handle(&self, auth: &AuthForwarding, handle: &str) -> Result<bool>;
    fn all_venues(&self, auth: &AuthForwarding) -> Result<Vec<Venue>>;
    fn create_organizer_request(&self, request: &NewOrganizerRequest) -> Result<OrganizerRequest>;
    fn organizer_requests(
        &self,
        auth: &AuthForwarding,
        query: &RequestListQuery,
    ) -> Result<RequestPage>;
    fn organizer_request(&self, auth: &AuthForwarding, id: &Id) -> Result<OrganizerRequest>;
    /// Deliberately takes no credentials; see the route that calls it.
    fn update_request_status(&self, id: &Id, change: &StatusChange) -> Result<OrganizerRequest>;
    fn my_requests(&self, auth: &AuthForwarding, query: &RequestListQuery) -> Result<RequestPage>;
}
