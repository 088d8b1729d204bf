//! Organizer application form: validation and the resumable submission flow.

use std::fmt;

use prokick_entities::{
    id::Id,
    location::{Location, COUNTRY_AR},
    phone::PhoneNumber,
};
use thiserror::Error;

use crate::gateways::backend::NewOrganizerRequest;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const ALLOWED_IMAGE_MIME: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];
pub const MAX_IMAGE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Form field identifier, used to attach errors to inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Province,
    City,
    Address,
    Image,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Province => "provincia",
            Self::City => "municipio",
            Self::Address => "address",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field.as_str(), e.message)?;
        }
        Ok(())
    }
}

/// An uploaded image, already transported as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub size_bytes: u64,
    pub data: String,
}

/// Raw form input prior to validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizerForm {
    pub name: String,
    pub phone_country_code: String,
    pub phone_number: String,
    pub province: String,
    pub city: String,
    pub address: String,
    pub image: Option<ImageUpload>,
}

/// Validates the whole form and collects one error per offending field.
pub fn validate_organizer_form(form: &OrganizerForm) -> Result<(), FieldErrors> {
    let mut errors = Vec::new();
    let mut push = |field, message: &str| {
        errors.push(FieldError {
            field,
            message: message.to_owned(),
        });
    };

    let name = form.name.trim();
    if name.is_empty() {
        push(FormField::Name, "El nombre es requerido");
    } else if name.chars().count() < NAME_MIN_LEN {
        push(FormField::Name, "El nombre debe tener al menos 2 caracteres");
    } else if name.chars().count() > NAME_MAX_LEN {
        push(FormField::Name, "El nombre no puede superar los 100 caracteres");
    }

    if let Err(err) = PhoneNumber::new(&form.phone_country_code, &form.phone_number) {
        push(FormField::Phone, &err.to_string());
    }

    if form.province.trim().is_empty() {
        push(FormField::Province, "La provincia es requerida");
    }
    if form.city.trim().is_empty() {
        push(FormField::City, "El municipio es requerido");
    }
    if form.address.trim().is_empty() {
        push(FormField::Address, "La dirección es requerida");
    }

    match &form.image {
        None => push(FormField::Image, "La imagen es requerida"),
        Some(image) => {
            if !ALLOWED_IMAGE_MIME.contains(&image.mime_type.as_str()) {
                push(FormField::Image, "Formato de imagen no soportado");
            } else if image.size_bytes > MAX_IMAGE_SIZE_BYTES {
                push(FormField::Image, "La imagen supera el tamaño máximo permitido");
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors(errors))
    }
}

/// Body-level authentication: the submission itself names the signer.
pub fn authenticated_submitter(user_id: Option<&str>) -> super::Result<Id> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(Id::from)
        .ok_or(super::Error::Unauthenticated)
}

/// Builds the backend payload from a validated form, merging the identity
/// of the (possibly just signed-in) user.
pub fn build_submission(form: &OrganizerForm, user_id: &Id, email: &str) -> NewOrganizerRequest {
    // The form was validated, so the phone must parse.
    let phone_number = PhoneNumber::new(&form.phone_country_code, &form.phone_number)
        .map(|p| p.full_number())
        .unwrap_or_default();
    NewOrganizerRequest {
        user_id: user_id.clone(),
        name: form.name.trim().to_owned(),
        email: email.to_owned(),
        phone_number,
        location: Location {
            country: COUNTRY_AR.into(),
            province: form.province.clone(),
            city: form.city.clone(),
            address: Some(form.address.clone()),
            pos: None,
        },
        image: form.image.as_ref().map(|i| i.data.clone()),
    }
}

/// What the caller must do after handing a form to [`PendingSubmission`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    /// Authenticated: send this payload now.
    Submit(NewOrganizerRequest),
    /// Not signed in: the form was parked; trigger interactive sign-in and
    /// call [`PendingSubmission::signed_in`] afterwards.
    SignInRequired,
}

/// Submission flow that survives an interactive sign-in.
///
/// An unauthenticated submission parks the validated form. Completing the
/// sign-in hands out the payload exactly once; a second call returns `None`
/// so the request cannot be duplicated.
#[derive(Debug, Default)]
pub struct PendingSubmission {
    parked: Option<OrganizerForm>,
}

impl PendingSubmission {
    pub fn is_waiting(&self) -> bool {
        self.parked.is_some()
    }

    /// Validates and either yields the payload or parks the form.
    pub fn submit(
        &mut self,
        form: OrganizerForm,
        session: Option<(&Id, &str)>,
    ) -> Result<SubmitAction, FieldErrors> {
        validate_organizer_form(&form)?;
        match session {
            Some((user_id, email)) => Ok(SubmitAction::Submit(build_submission(
                &form, user_id, email,
            ))),
            None => {
                self.parked = Some(form);
                Ok(SubmitAction::SignInRequired)
            }
        }
    }

    /// Resumes a parked submission with the fresh identity.
    pub fn signed_in(&mut self, user_id: &Id, email: &str) -> Option<NewOrganizerRequest> {
        self.parked
            .take()
            .map(|form| build_submission(&form, user_id, email))
    }

    /// Drops a parked form, e.g. when the sign-in is cancelled.
    pub fn abandon(&mut self) {
        self.parked = None;
    }
}
