//! Organizer-request endpoints: submission, listing, review.

use rocket::{get, http::Status, patch, post, serde::json::Json, FromForm, State};

use prokick_boundary as json;
use prokick_core::{
    gateways::backend::{RequestListQuery, RequestPage, StatusChange},
    usecases::{self, ImageUpload, OrganizerForm},
};
use prokick_entities::request::RequestStatus;

use super::{
    error::{ApiError, FailureField},
    Result,
};
use crate::web::guards::{Backend, ForwardedAuth};

fn parse_status(status: Option<&str>) -> std::result::Result<Option<RequestStatus>, ApiError> {
    status
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::message(Status::BadRequest, "Estado inválido"))
        })
        .transpose()
}

fn paginated(page: RequestPage) -> json::PaginatedResult<json::OrganizerRequest> {
    let RequestPage {
        items,
        total,
        page,
        limit,
        total_pages,
    } = page;
    json::PaginatedResult {
        data: items.into_iter().map(Into::into).collect(),
        total,
        page,
        limit,
        total_pages,
    }
}

/// Reconstructs the upload metadata from a `data:` URL so the form
/// validation can check MIME type and size.
fn image_upload(data_url: String) -> ImageUpload {
    let mime_type = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or_default()
        .to_owned();
    let base64_len = data_url
        .split_once(',')
        .map(|(_, payload)| payload.len())
        .unwrap_or(0);
    ImageUpload {
        mime_type,
        size_bytes: base64_len as u64 * 3 / 4,
        data: data_url,
    }
}

#[post("/organizer-requests", data = "<form>")]
pub fn post_organizer_request(
    backend: &State<Backend>,
    form: Json<json::NewOrganizerRequest>,
) -> Result<json::Envelope<json::OrganizerRequest>> {
    let json::NewOrganizerRequest {
        name,
        email,
        phone,
        location,
        image,
        user_id,
    } = form.into_inner();

    // Authentication travels in the body here, mirroring the submission
    // flow that may complete right after an interactive sign-in.
    let user_id = usecases::authenticated_submitter(user_id.as_deref())
        .map_err(|err| ApiError::message(Status::Unauthorized, err.to_string()))?;
    let email = email.unwrap_or_default();

    let form = OrganizerForm {
        name: name.unwrap_or_default(),
        phone_country_code: phone.as_ref().map(|p| p.country_code.clone()).unwrap_or_default(),
        phone_number: phone.as_ref().map(|p| p.phone_number.clone()).unwrap_or_default(),
        province: location.as_ref().map(|l| l.provincia.clone()).unwrap_or_default(),
        city: location.as_ref().map(|l| l.municipio.clone()).unwrap_or_default(),
        address: location.as_ref().map(|l| l.address.clone()).unwrap_or_default(),
        image: image.map(image_upload),
    };
    usecases::validate_organizer_form(&form).map_err(|errors| {
        log::debug!("Rejecting organizer application: {errors}");
        ApiError::message(Status::BadRequest, "Datos requeridos faltantes")
    })?;

    let payload = usecases::build_submission(&form, &user_id, &email);
    let created = backend.create_organizer_request(&payload).map_err(|err| {
        ApiError::from_backend(err, FailureField::Message, "Error al enviar la solicitud")
    })?;
    Ok(Json(json::Envelope::ok_with_message(
        created.into(),
        "Solicitud enviada correctamente",
    )))
}

#[get("/organizer-requests?<status>&<page>&<limit>")]
pub fn get_organizer_requests(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    status: Option<&str>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<json::Envelope<json::PaginatedResult<json::OrganizerRequest>>> {
    let query = RequestListQuery {
        status: parse_status(status)?,
        page,
        limit,
    };
    let page = backend.organizer_requests(&auth, &query).map_err(|err| {
        ApiError::from_backend(err, FailureField::Message, "Error al obtener las solicitudes")
    })?;
    Ok(Json(json::Envelope::ok(paginated(page))))
}

#[get("/organizer-requests/<id>")]
pub fn get_organizer_request(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    id: &str,
) -> Result<json::Envelope<json::OrganizerRequest>> {
    let request = backend.organizer_request(&auth, &id.into()).map_err(|err| {
        ApiError::from_backend(err, FailureField::Message, "Error al obtener la solicitud")
    })?;
    Ok(Json(json::Envelope::ok(request.into())))
}

/// Review decision. No credentials are forwarded to the backend on this
/// route; the upstream endpoint performs its own checks.
#[patch("/organizer-requests/<id>/status", data = "<change>")]
pub fn patch_request_status(
    backend: &State<Backend>,
    id: &str,
    change: Json<json::StatusChange>,
) -> Result<json::Envelope<json::OrganizerRequest>> {
    let json::StatusChange {
        status,
        rejection_reason,
        notes,
    } = change.into_inner();
    let status = status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::message(Status::BadRequest, "Estado requerido"))?;
    let status: RequestStatus = status
        .parse()
        .map_err(|_| ApiError::message(Status::BadRequest, "Estado inválido"))?;
    let change = StatusChange {
        status,
        rejection_reason,
        notes,
    };
    let updated = backend.update_request_status(&id.into(), &change).map_err(|err| {
        ApiError::from_backend(err, FailureField::Message, "Error al actualizar la solicitud")
    })?;
    Ok(Json(json::Envelope::ok_with_message(
        updated.into(),
        "Solicitud actualizada correctamente",
    )))
}

#[derive(FromForm)]
pub struct UserRequestsQuery<'r> {
    /// Only `organizer` requests exist today.
    #[field(name = "type")]
    kind: Option<&'r str>,
    status: Option<&'r str>,
    page: Option<u32>,
    limit: Option<u32>,
}

#[get("/user-requests?<query..>")]
pub fn get_user_requests(
    backend: &State<Backend>,
    auth: ForwardedAuth,
    query: UserRequestsQuery<'_>,
) -> Result<json::Envelope<json::PaginatedResult<json::OrganizerRequest>>> {
    match query.kind.unwrap_or("organizer") {
        "organizer" => {}
        _ => {
            return Err(ApiError::message(
                Status::BadRequest,
                "Tipo de solicitud inválido",
            ))
        }
    }
    let list_query = RequestListQuery {
        status: parse_status(query.status)?,
        page: query.page,
        limit: query.limit,
    };
    let page = backend.my_requests(&auth, &list_query).map_err(|err| {
        ApiError::from_backend(err, FailureField::Message, "Error al obtener las solicitudes")
    })?;
    Ok(Json(json::Envelope::ok(paginated(page))))
}

/// Aggregate counts for the profile page. Lookup failures degrade to
/// zeroes inside the use case.
#[get("/user-requests/stats")]
pub fn get_user_request_stats(
    backend: &State<Backend>,
    auth: ForwardedAuth,
) -> Json<json::Envelope<json::RequestStats>> {
    let stats = usecases::request_stats(&***backend, &auth);
    Json(json::Envelope::ok(json::RequestStats {
        total: stats.total,
        pending: stats.pending,
    }))
}
