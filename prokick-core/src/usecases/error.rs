use thiserror::Error;

use crate::{gateways, usecases::FieldErrors};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Debes iniciar sesión para enviar una solicitud")]
    Unauthenticated,
    #[error("Datos requeridos faltantes")]
    Invalid(#[from] FieldErrors),
    #[error(transparent)]
    Handle(#[from] prokick_entities::profile::HandleParseError),
    #[error(transparent)]
    Backend(#[from] gateways::backend::Error),
    #[error(transparent)]
    Geo(#[from] gateways::geolookup::Error),
}
