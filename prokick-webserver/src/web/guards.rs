use core::ops::Deref;
use std::sync::Arc;

use rocket::request::{FromRequest, Outcome, Request};

use prokick_core::gateways::{
    backend::{AuthForwarding, BackendGateway},
    geolookup::GeoLookupGateway,
};

/// Cookie holding the backend session token, set by the backend on login.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookies expired locally on logout, named as the backend issues them.
pub const LOGOUT_COOKIES: [&str; 2] = ["accessToken", "refreshToken"];

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    let x: Vec<_> = auth_header_val.split(' ').collect();
    if x.len() == 2 && x[0] == "Bearer" {
        Some(x[1])
    } else {
        None
    }
}

/// Collects the credentials of the incoming request for forwarding to the
/// backend: the `access_token` cookie (falling back to the `Authorization`
/// header) as bearer token, plus the raw `Cookie` header.
#[derive(Debug)]
pub struct ForwardedAuth(AuthForwarding);

impl Deref for ForwardedAuth {
    type Target = AuthForwarding;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ForwardedAuth {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let bearer_token = request
            .cookies()
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .or_else(|| {
                request
                    .headers()
                    .get("Authorization")
                    .find_map(get_bearer_token)
                    .map(ToOwned::to_owned)
            });
        let cookie_header = request.headers().get_one("Cookie").map(ToOwned::to_owned);
        Outcome::Success(Self(AuthForwarding {
            bearer_token,
            cookie_header,
        }))
    }
}

pub struct Backend(pub Arc<dyn BackendGateway + Send + Sync>);

impl Deref for Backend {
    type Target = dyn BackendGateway + Send + Sync;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct GeoLookup(pub Arc<dyn GeoLookupGateway + Send + Sync>);

impl Deref for GeoLookup {
    type Target = dyn GeoLookupGateway + Send + Sync;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
