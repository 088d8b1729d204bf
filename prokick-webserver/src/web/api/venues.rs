use rocket::{get, http::Status, serde::json::Json, State};

use prokick_boundary as json;
use prokick_core::marker::MarkerStyled;

use super::{error::ApiError, Result};
use crate::web::{
    guards::{Backend, ForwardedAuth},
    venue_cache::VenueCache,
};

/// The venue listing, served from the time-boxed cache and annotated with
/// the derived marker encodings.
#[get("/canchas/get")]
pub fn get_venues(
    backend: &State<Backend>,
    cache: &State<VenueCache>,
    auth: ForwardedAuth,
) -> Result<json::Envelope<Vec<json::Venue>>> {
    let venues = cache.fetch(&***backend, &auth).map_err(|message| {
        let text = if message.is_empty() {
            "Error al obtener las canchas".to_owned()
        } else {
            message
        };
        ApiError::message(Status::InternalServerError, text)
    })?;
    let venues = venues
        .into_iter()
        .map(|venue| {
            let style = venue.marker_style();
            let mut dto = json::Venue::from(venue);
            dto.marker = Some(json::MarkerStyle {
                color: style.color.to_owned(),
                size: style.size,
                opacity: style.opacity,
            });
            dto
        })
        .collect();
    Ok(Json(json::Envelope::ok(venues)))
}
