use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
};

use prokick_boundary::Envelope;
use prokick_core::gateways::backend;

/// Which envelope field carries the failure text. The auth endpoints report
/// through `error`, the request endpoints through `message`; both shapes are
/// preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureField {
    Error,
    Message,
}

/// A structured failure rendered as the normalized JSON envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub text: String,
    pub field: FailureField,
    pub should_logout: bool,
}

impl ApiError {
    pub fn error(status: Status, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            field: FailureField::Error,
            should_logout: false,
        }
    }

    pub fn message(status: Status, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            field: FailureField::Message,
            should_logout: false,
        }
    }

    /// Maps a gateway failure onto the envelope: upstream errors keep their
    /// status and text (`fallback` when the backend sent none), everything
    /// else becomes an opaque 500.
    pub fn from_backend(err: backend::Error, field: FailureField, fallback: &str) -> Self {
        match err {
            backend::Error::Upstream {
                status,
                message,
                should_logout,
            } => Self {
                status: Status::new(status),
                text: if message.is_empty() {
                    fallback.to_owned()
                } else {
                    message
                },
                field,
                should_logout,
            },
            backend::Error::InvalidEnvelope => Self {
                status: Status::InternalServerError,
                text: "Respuesta del servidor inválida".into(),
                field,
                should_logout: false,
            },
            backend::Error::Transport(err) => {
                log::warn!("backend request failed: {err}");
                Self {
                    status: Status::InternalServerError,
                    text: "Error interno del servidor".into(),
                    field,
                    should_logout: false,
                }
            }
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, _req: &'r rocket::Request<'_>) -> response::Result<'o> {
        let mut envelope: Envelope<()> = match self.field {
            FailureField::Error => Envelope::failure_error(self.text),
            FailureField::Message => Envelope::failure_message(self.text),
        };
        if self.should_logout {
            envelope.should_logout = Some(true);
        }
        let body = serde_json::to_string(&envelope).map_err(|err| {
            log::error!("Unable to serialize error envelope: {err}");
            Status::InternalServerError
        })?;
        rocket::Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
