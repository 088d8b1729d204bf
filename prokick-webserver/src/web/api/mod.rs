use std::result;

use rocket::{routes, serde::json::Json, Route};

mod auth;
mod error;
mod geo;
mod requests;
mod venues;

pub use self::error::ApiError;

type Result<T> = result::Result<Json<T>, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   auth & profile   --- //
        auth::post_login,
        auth::post_logout,
        auth::get_current_user,
        auth::post_refresh,
        auth::patch_profile,
        auth::get_check_handle,
        // ---   venues   --- //
        venues::get_venues,
        // ---   organizer requests   --- //
        requests::post_organizer_request,
        requests::get_organizer_requests,
        requests::get_organizer_request,
        requests::patch_request_status,
        requests::get_user_requests,
        requests::get_user_request_stats,
        // ---   geography   --- //
        geo::get_provinces,
        geo::get_municipalities,
        geo::get_localities,
        geo::get_streets,
        geo::get_geocode,
        geo::get_map_search,
    ]
}
