//! Auth and profile endpoints, proxied to the backend with the browser's
//! credentials forwarded verbatim.

use rocket::{
    get,
    http::{Cookie, CookieJar, Status},
    patch, post,
    serde::json::Json,
    State,
};

use prokick_boundary as json;
use prokick_core::gateways::backend::{AuthForwarding, ProfileUpdate};

use super::{
    error::{ApiError, FailureField},
    Result,
};
use crate::web::guards::{Backend, ForwardedAuth, LOGOUT_COOKIES};

/// Replays backend `Set-Cookie` headers into the browser's cookie jar.
pub fn apply_set_cookies(jar: &CookieJar<'_>, set_cookies: Vec<String>) {
    for raw in set_cookies {
        match Cookie::parse(raw) {
            Ok(cookie) => jar.add(cookie),
            Err(err) => log::warn!("Ignoring malformed backend cookie: {err}"),
        }
    }
}

#[post("/auth/login", data = "<credentials>")]
pub fn post_login(
    backend: &State<Backend>,
    jar: &CookieJar<'_>,
    credentials: Json<json::IdTokenCredentials>,
) -> Result<json::LoginData> {
    let id_token = credentials.into_inner().id_token;
    if id_token.trim().is_empty() {
        return Err(ApiError::error(Status::BadRequest, "ID token es requerido"));
    }
    let outcome = backend
        .login(&id_token)
        .map_err(|err| ApiError::from_backend(err, FailureField::Error, "Error al iniciar sesión"))?;
    apply_set_cookies(jar, outcome.set_cookies);
    Ok(Json(json::LoginData {
        user: outcome.user.into(),
        player_profile: outcome.profile.into(),
        is_new_user: outcome.is_new_user,
    }))
}

/// Logout always succeeds towards the browser: the local session cookies are
/// removed even when the backend call fails.
#[post("/auth/logout")]
pub fn post_logout(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    jar: &CookieJar<'_>,
) -> Json<json::Envelope<()>> {
    let message = match backend.logout(&auth) {
        Ok(cookies) => {
            apply_set_cookies(jar, cookies.set_cookies);
            cookies.message
        }
        Err(err) => {
            log::warn!("Backend logout failed: {err}");
            None
        }
    };
    for name in LOGOUT_COOKIES {
        jar.remove(Cookie::build(name).path("/"));
    }
    Json(json::Envelope::message_only(
        message.unwrap_or_else(|| "Sesión cerrada".into()),
    ))
}

#[get("/auth/me")]
pub fn get_current_user(backend: &State<Backend>, auth: ForwardedAuth) -> Result<json::UserData> {
    let data = backend
        .current_user(&auth)
        .map_err(|err| ApiError::from_backend(err, FailureField::Error, "Error obteniendo perfil"))?;
    Ok(Json(json::UserData {
        user: data.user.into(),
        player_profile: data.profile.into(),
    }))
}

#[post("/auth/refresh")]
pub fn post_refresh(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    jar: &CookieJar<'_>,
) -> Result<json::Envelope<()>> {
    let cookies = backend.refresh_session(&auth).map_err(|err| {
        ApiError::from_backend(err, FailureField::Error, "Error al renovar la sesión")
    })?;
    apply_set_cookies(jar, cookies.set_cookies);
    Ok(Json(json::Envelope::message_only(
        cookies.message.unwrap_or_else(|| "Sesión renovada".into()),
    )))
}

#[patch("/auth/profile", data = "<update>")]
pub fn patch_profile(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    update: Json<json::ProfileUpdate>,
) -> Result<json::PlayerProfile> {
    let json::ProfileUpdate {
        handle,
        name,
        location,
        foot,
        positions,
        height_cm,
        weight_kg,
        avatar_url,
    } = update.into_inner();
    let update = ProfileUpdate {
        handle,
        name,
        location: location.map(Into::into),
        foot,
        positions,
        height_cm,
        weight_kg,
        avatar_url,
    };
    let profile = backend.update_profile(&auth, &update).map_err(|err| {
        ApiError::from_backend(err, FailureField::Error, "Error al actualizar el perfil")
    })?;
    Ok(Json(profile.into()))
}

/// Availability probe while typing a handle. Only the `Authorization` header
/// is forwarded; the session cookies stay local.
#[get("/auth/check-handle/<handle>")]
pub fn get_check_handle(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    handle: &str,
) -> Result<json::Envelope<json::HandleAvailability>> {
    let auth = match &auth.bearer_token {
        Some(token) => AuthForwarding::bearer_only(token.clone()),
        None => AuthForwarding::default(),
    };
    let available = backend.check_handle(&auth, handle).map_err(|err| {
        ApiError::from_backend(err, FailureField::Error, "Error al verificar el alias")
    })?;
    Ok(Json(json::Envelope::ok(json::HandleAvailability {
        available,
    })))
}
