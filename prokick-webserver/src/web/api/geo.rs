//! Geographic lookup endpoints backed by the Georef client, plus the map
//! search box feed.

use rocket::{get, http::Status, serde::json::Json, State};

use prokick_boundary as json;
use prokick_core::{gateways::geolookup, usecases};

use super::{error::ApiError, Result};
use crate::web::{
    guards::{Backend, ForwardedAuth, GeoLookup},
    venue_cache::VenueCache,
};

const LOOKUP_FAILED: &str = "Error al consultar el servicio geográfico";
const MAX_STREET_RESULTS: usize = 10;

fn regions(regions: Vec<geolookup::Region>) -> Vec<json::Region> {
    regions
        .into_iter()
        .map(|geolookup::Region { id, name }| json::Region { id, name })
        .collect()
}

fn lookup_failed(err: geolookup::Error) -> ApiError {
    log::warn!("Georef lookup failed: {err}");
    ApiError::message(Status::InternalServerError, LOOKUP_FAILED)
}

#[get("/geo/provinces")]
pub fn get_provinces(geo: &State<GeoLookup>) -> Result<json::Envelope<Vec<json::Region>>> {
    let provinces = geo.provinces().map_err(lookup_failed)?;
    Ok(Json(json::Envelope::ok(regions(provinces))))
}

#[get("/geo/municipalities?<provincia>")]
pub fn get_municipalities(
    geo: &State<GeoLookup>,
    provincia: &str,
) -> Result<json::Envelope<Vec<json::Region>>> {
    let municipalities = geo.municipalities(provincia).map_err(lookup_failed)?;
    Ok(Json(json::Envelope::ok(regions(municipalities))))
}

#[get("/geo/localities?<provincia>&<municipio>")]
pub fn get_localities(
    geo: &State<GeoLookup>,
    provincia: &str,
    municipio: Option<&str>,
) -> Result<json::Envelope<Vec<json::Region>>> {
    let localities = geo.localities(provincia, municipio).map_err(lookup_failed)?;
    Ok(Json(json::Envelope::ok(regions(localities))))
}

#[get("/geo/streets?<provincia>&<nombre>")]
pub fn get_streets(
    geo: &State<GeoLookup>,
    provincia: &str,
    nombre: &str,
) -> Result<json::Envelope<Vec<json::Region>>> {
    let streets = geo
        .search_streets(provincia, nombre, MAX_STREET_RESULTS)
        .map_err(lookup_failed)?;
    Ok(Json(json::Envelope::ok(regions(streets))))
}

#[get("/geo/geocode?<provincia>&<municipio>&<address>")]
pub fn get_geocode(
    geo: &State<GeoLookup>,
    provincia: &str,
    municipio: &str,
    address: &str,
) -> Result<json::Envelope<json::Coordinate>> {
    match geo.resolve_address_lat_lng(provincia, municipio, address) {
        Some(pos) => Ok(Json(json::Envelope::ok(pos.into()))),
        None => Err(ApiError::message(
            Status::NotFound,
            "Dirección no encontrada",
        )),
    }
}

/// Suggestions for the map search box: venue matches first, then geocoded
/// places. A failing venue fetch degrades to geocoded results only.
#[get("/map/search?<q>")]
pub fn get_map_search(
    backend: &State<Backend>,
    geo: &State<GeoLookup>,
    cache: &State<VenueCache>,
    auth: ForwardedAuth,
    q: Option<&str>,
) -> Result<json::Envelope<Vec<json::Suggestion>>> {
    let venues = cache.fetch(&***backend, &auth).unwrap_or_default();
    let suggestions = usecases::search_suggestions(&***geo, &venues, q.unwrap_or_default())
        .map_err(|err| {
            log::warn!("Map search failed: {err}");
            ApiError::message(Status::InternalServerError, LOOKUP_FAILED)
        })?;
    let suggestions = suggestions
        .into_iter()
        .map(|s| json::Suggestion {
            label: s.label,
            lat: s.pos.lat_deg(),
            lng: s.pos.lng_deg(),
            venue_id: s.venue_id.map(Into::into),
        })
        .collect();
    Ok(Json(json::Envelope::ok(suggestions)))
}
