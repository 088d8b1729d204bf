use strum::{AsRefStr, EnumIter, EnumString};

use crate::{id::Id, location::Location, time::Timestamp};

/// Review lifecycle of an organizer request.
///
/// All transitions are performed by backend reviewers; clients only observe
/// the current state. A request parked in `PendingFix` is resubmitted through
/// backend channels and never transitions on the client side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    PendingReview,
    Approved,
    Rejected,
    PendingFix,
}

impl RequestStatus {
    pub const fn initial() -> Self {
        Self::PendingReview
    }

    /// Still waiting on a reviewer or on the requester.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::PendingReview | Self::PendingFix)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// The transitions a reviewer may take.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::PendingReview,
                Self::Approved | Self::Rejected | Self::PendingFix
            )
        )
    }

    pub fn label_es(self) -> &'static str {
        match self {
            Self::PendingReview => "Pendiente de revisión",
            Self::Approved => "Aprobada",
            Self::Rejected => "Rechazada",
            Self::PendingFix => "Requiere correcciones",
        }
    }

    pub fn description_es(self) -> &'static str {
        match self {
            Self::PendingReview => "Tu solicitud está siendo revisada por nuestro equipo.",
            Self::Approved => "Tu solicitud fue aprobada. Ya podés publicar canchas.",
            Self::Rejected => "Tu solicitud fue rechazada. Revisá el motivo indicado.",
            Self::PendingFix => "Tu solicitud necesita correcciones antes de ser aprobada.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub id: Id,
    pub name: String,
}

/// Application to become a match organizer, reviewed by the backend staff.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizerRequest {
    pub id: Id,
    pub user_id: Id,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub location: Location,
    pub image: Option<String>,
    pub status: RequestStatus,
    pub reviewed_by: Option<Reviewer>,
    pub reviewed_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(RequestStatus::PendingReview.as_ref(), "pending_review");
        assert_eq!(RequestStatus::PendingFix.as_ref(), "pending_fix");
        assert_eq!(
            "approved".parse::<RequestStatus>(),
            Ok(RequestStatus::Approved)
        );
        assert!("in_review".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn only_pending_review_has_outgoing_transitions() {
        use RequestStatus::*;
        for status in RequestStatus::iter() {
            for next in RequestStatus::iter() {
                let allowed = status == PendingReview && next != PendingReview;
                assert_eq!(status.can_transition_to(next), allowed, "{status} -> {next}");
            }
        }
    }

    #[test]
    fn terminal_and_pending_are_disjoint() {
        for status in RequestStatus::iter() {
            assert_ne!(status.is_pending(), status.is_terminal(), "{status}");
        }
    }
}
