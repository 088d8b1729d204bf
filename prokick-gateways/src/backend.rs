//! Blocking HTTP client for the ProKick backend.
//!
//! Every backend response uses the `{success, data, message/error}` envelope.
//! Non-2xx statuses and `success: false` bodies become
//! [`Error::Upstream`] carrying the backend's own message so the proxy can
//! relay it verbatim.

use prokick_boundary as json;
use prokick_core::gateways::backend::{
    AuthForwarding, BackendGateway, Error, LoginOutcome, NewOrganizerRequest, ProfileUpdate,
    RequestListQuery, RequestPage, Result, SessionCookies, StatusChange, UserAndProfile,
};
use prokick_entities::{
    id::Id, profile::PlayerProfile, request::OrganizerRequest, venue::Venue,
};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::{COOKIE, SET_COOKIE},
    StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Sent on login so the backend can distinguish client platforms.
const DEVICE_TYPE_HEADER: (&str, &str) = ("X-Device-Type", "web");

#[derive(Debug, Clone)]
pub struct HttpBackendGateway {
    base_url: String,
    client: Client,
}

impl HttpBackendGateway {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(crate::HTTP_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_auth(req: RequestBuilder, auth: &AuthForwarding) -> RequestBuilder {
        let req = match &auth.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        match &auth.cookie_header {
            Some(cookies) => req.header(COOKIE, cookies),
            None => req,
        }
    }

    fn send(req: RequestBuilder) -> Result<(StatusCode, Vec<String>, Value)> {
        let response = req.send().map_err(|err| {
            log::warn!("backend request failed: {err}");
            Error::Transport(err.to_string())
        })?;
        let status = response.status();
        let set_cookies = collect_set_cookies(&response);
        let body: Value = match response.json() {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(Error::upstream(status.as_u16(), ""));
            }
            Err(_) => return Err(Error::InvalidEnvelope),
        };
        Ok((status, set_cookies, body))
    }

    /// Unwraps the envelope, surfacing backend failures with their own
    /// message and `should_logout` flag.
    fn parse_data<T: DeserializeOwned>(status: StatusCode, mut body: Value) -> Result<T> {
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !status.is_success() || !success {
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let should_logout = body
                .get("should_logout")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
                should_logout,
            });
        }
        let data = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|err| {
            log::warn!("malformed backend payload: {err}");
            Error::InvalidEnvelope
        })
    }

    fn get_data<T: DeserializeOwned>(&self, path: &str, auth: &AuthForwarding) -> Result<T> {
        let (status, _, body) = Self::send(Self::with_auth(self.client.get(self.url(path)), auth))?;
        Self::parse_data(status, body)
    }

    fn list_query(query: &RequestListQuery) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = query.status {
            params.push(("status", status.to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    fn request_page(
        &self,
        path: &str,
        auth: &AuthForwarding,
        query: &RequestListQuery,
    ) -> Result<RequestPage> {
        let req = Self::with_auth(
            self.client.get(self.url(path)).query(&Self::list_query(query)),
            auth,
        );
        let (status, _, body) = Self::send(req)?;
        let page: json::PaginatedResult<json::OrganizerRequest> = Self::parse_data(status, body)?;
        let items = page
            .data
            .into_iter()
            .map(convert_request)
            .collect::<Result<_>>()?;
        Ok(RequestPage {
            items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        })
    }
}

fn collect_set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .collect()
}

fn convert_request(from: json::OrganizerRequest) -> Result<OrganizerRequest> {
    from.try_into().map_err(|err| {
        log::warn!("malformed organizer request record: {err}");
        Error::InvalidEnvelope
    })
}

fn session_cookies(set_cookies: Vec<String>, body: Value) -> SessionCookies {
    SessionCookies {
        message: body
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        set_cookies,
    }
}

impl BackendGateway for HttpBackendGateway {
    fn login(&self, id_token: &str) -> Result<LoginOutcome> {
        let req = self
            .client
            .post(self.url("/auth/google"))
            .header(DEVICE_TYPE_HEADER.0, DEVICE_TYPE_HEADER.1)
            .json(&serde_json::json!({ "id_token": id_token }));
        let (status, set_cookies, body) = Self::send(req)?;
        let data: json::LoginData = Self::parse_data(status, body)?;
        let user = data.user.try_into().map_err(invalid)?;
        let profile = data.player_profile.try_into().map_err(invalid)?;
        Ok(LoginOutcome {
            user,
            profile,
            is_new_user: data.is_new_user,
            set_cookies,
        })
    }

    fn logout(&self, auth: &AuthForwarding) -> Result<SessionCookies> {
        let req = Self::with_auth(self.client.post(self.url("/auth/logout")), auth);
        let (status, set_cookies, body) = Self::send(req)?;
        // Probe the envelope for failure before packaging the cookies.
        Self::parse_data::<Value>(status, body.clone())?;
        Ok(session_cookies(set_cookies, body))
    }

    fn current_user(&self, auth: &AuthForwarding) -> Result<UserAndProfile> {
        let data: json::UserData = self.get_data("/auth/me", auth)?;
        Ok(UserAndProfile {
            user: data.user.try_into().map_err(invalid)?,
            profile: data.player_profile.try_into().map_err(invalid)?,
        })
    }

    fn refresh_session(&self, auth: &AuthForwarding) -> Result<SessionCookies> {
        let req = Self::with_auth(self.client.post(self.url("/auth/refresh")), auth);
        let (status, set_cookies, body) = Self::send(req)?;
        Self::parse_data::<Value>(status, body.clone())?;
        Ok(session_cookies(set_cookies, body))
    }

    fn update_profile(
        &self,
        auth: &AuthForwarding,
        update: &ProfileUpdate,
    ) -> Result<PlayerProfile> {
        #[derive(serde::Deserialize)]
        struct Data {
            player_profile: json::PlayerProfile,
        }
        let payload = profile_update_json(update);
        let req = Self::with_auth(
            self.client.patch(self.url("/auth/profile")).json(&payload),
            auth,
        );
        let (status, _, body) = Self::send(req)?;
        let data: Data = Self::parse_data(status, body)?;
        data.player_profile.try_into().map_err(invalid)
    }

    fn check_handle(&self, auth: &AuthForwarding, handle: &str) -> Result<bool> {
        let data: json::HandleAvailability =
            self.get_data(&format!("/auth/check-handle/{handle}"), auth)?;
        Ok(data.available)
    }

    fn all_venues(&self, auth: &AuthForwarding) -> Result<Vec<Venue>> {
        let venues: Vec<json::Venue> = self.get_data("/canchas/get", auth)?;
        venues
            .into_iter()
            .map(|v| v.try_into().map_err(invalid))
            .collect()
    }

    fn create_organizer_request(&self, request: &NewOrganizerRequest) -> Result<OrganizerRequest> {
        let payload = json::BackendNewOrganizerRequest {
            name: request.name.clone(),
            email: request.email.clone(),
            phone_number: request.phone_number.clone(),
            location: request.location.clone().into(),
            image: request.image.clone(),
            user_id: request.user_id.to_string(),
        };
        let req = self
            .client
            .post(self.url("/organizer-requests"))
            .json(&payload);
        let (status, _, body) = Self::send(req)?;
        let data: json::OrganizerRequest = Self::parse_data(status, body)?;
        convert_request(data)
    }

    fn organizer_requests(
        &self,
        auth: &AuthForwarding,
        query: &RequestListQuery,
    ) -> Result<RequestPage> {
        self.request_page("/organizer-requests", auth, query)
    }

    fn organizer_request(&self, auth: &AuthForwarding, id: &Id) -> Result<OrganizerRequest> {
        let data: json::OrganizerRequest =
            self.get_data(&format!("/organizer-requests/{id}"), auth)?;
        convert_request(data)
    }

    fn update_request_status(&self, id: &Id, change: &StatusChange) -> Result<OrganizerRequest> {
        let payload = json::StatusChange {
            status: Some(change.status.to_string()),
            rejection_reason: change.rejection_reason.clone(),
            notes: change.notes.clone(),
        };
        // No credentials are attached here on purpose; see the web route.
        let req = self
            .client
            .patch(self.url(&format!("/organizer-requests/{id}/status")))
            .json(&payload);
        let (status, _, body) = Self::send(req)?;
        let data: json::OrganizerRequest = Self::parse_data(status, body)?;
        convert_request(data)
    }

    fn my_requests(&self, auth: &AuthForwarding, query: &RequestListQuery) -> Result<RequestPage> {
        self.request_page("/organizer-requests/my-requests", auth, query)
    }
}

fn invalid(err: json::ConversionError) -> Error {
    log::warn!("malformed backend record: {err}");
    Error::InvalidEnvelope
}

fn profile_update_json(update: &ProfileUpdate) -> json::ProfileUpdate {
    json::ProfileUpdate {
        handle: update.handle.clone(),
        name: update.name.clone(),
        location: update.location.clone().map(Into::into),
        foot: update.foot.clone(),
        positions: update.positions.clone(),
        height_cm: update.height_cm,
        weight_kg: update.weight_kg,
        avatar_url: update.avatar_url.clone(),
    }
}
