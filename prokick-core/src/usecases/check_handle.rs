//! Availability gate for player handles.

use std::time::Duration;

use prokick_entities::profile::Handle;

use crate::gateways::backend::{AuthForwarding, BackendGateway};

use super::Result;

/// Debounce window applied by callers between keystrokes and the check.
pub const HANDLE_CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleCheck {
    Available,
    Taken,
    /// The candidate is outside the length bounds; no network call is made
    /// and the form simply withholds its verdict.
    Skipped,
}

/// Checks whether `candidate` can be claimed.
///
/// Candidates equal to the caller's current handle are reported available
/// without asking the backend, as are candidates outside the length bounds
/// (skipped). Only the remaining cases hit the network.
pub fn check_handle<G: BackendGateway>(
    gateway: &G,
    auth: &AuthForwarding,
    current: Option<&Handle>,
    candidate: &str,
) -> Result<HandleCheck> {
    let candidate = candidate.trim();
    if let Some(current) = current {
        if current.as_str() == candidate {
            return Ok(HandleCheck::Available);
        }
    }
    let len = candidate.chars().count();
    if !(Handle::MIN_LEN..=Handle::MAX_LEN).contains(&len) {
        return Ok(HandleCheck::Skipped);
    }
    let available = gateway.check_handle(auth, candidate)?;
    Ok(if available {
        HandleCheck::Available
    } else {
        HandleCheck::Taken
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::backend::{
        self, LoginOutcome, RequestListQuery, RequestPage, SessionCookies, UserAndProfile,
    };
    use prokick_entities::{
        id::Id, profile::PlayerProfile, request::OrganizerRequest, venue::Venue,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts `check_handle` calls; no other method is reachable here.
    #[derive(Default)]
    struct HandleBackend {
        taken: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl BackendGateway for HandleBackend {
        fn login(&self, _: &str) -> backend::Result<LoginOutcome> {
            unimplemented!()
        }
        fn logout(&self, _: &AuthForwarding) -> backend::Result<SessionCookies> {
            unimplemented!()
        }
        fn current_user(&self, _: &AuthForwarding) -> backend::Result<UserAndProfile> {
            unimplemented!()
        }
        fn refresh_session(&self, _: &AuthForwarding) -> backend::Result<SessionCookies> {
            unimplemented!()
        }
        fn update_profile(
            &self,
            _: &AuthForwarding,
            _: &backend::ProfileUpdate,
        ) -> backend::Result<PlayerProfile> {
            unimplemented!()
        }
        fn check_handle(&self, _: &AuthForwarding, handle: &str) -> backend::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(!self.taken.iter().any(|t| *t == handle))
        }
        fn all_venues(&self, _: &AuthForwarding) -> backend::Result<Vec<Venue>> {
            unimplemented!()
        }
        fn create_organizer_request(
            &self,
            _: &backend::NewOrganizerRequest,
        ) -> backend::Result<OrganizerRequest> {
            unimplemented!()
        }
        fn organizer_requests(
            &self,
            _: &AuthForwarding,
            _: &RequestListQuery,
        ) -> backend::Result<RequestPage> {
            unimplemented!()
        }
        fn organizer_request(
            &self,
            _: &AuthForwarding,
            _: &Id,
        ) -> backend::Result<OrganizerRequest> {
            unimplemented!()
        }
        fn update_request_status(
            &self,
            _: &Id,
            _: &backend::StatusChange,
        ) -> backend::Result<OrganizerRequest> {
            unimplemented!()
        }
        fn my_requests(
            &self,
            _: &AuthForwarding,
            _: &RequestListQuery,
        ) -> backend::Result<RequestPage> {
            unimplemented!()
        }
    }

    #[test]
    fn out_of_bounds_candidates_skip_the_network() {
        let backend = HandleBackend::default();
        let auth = AuthForwarding::default();
        let check = |c: &str| check_handle(&backend, &auth, None, c).unwrap();

        assert_eq!(check("ab"), HandleCheck::Skipped);
        assert_eq!(check(""), HandleCheck::Skipped);
        assert_eq!(check(&"x".repeat(21)), HandleCheck::Skipped);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn the_current_handle_is_available_without_asking() {
        let backend = HandleBackend {
            taken: vec!["maria07"],
            ..Default::default()
        };
        let auth = AuthForwarding::default();
        let current: Handle = "maria07".parse().unwrap();

        let result = check_handle(&backend, &auth, Some(&current), " maria07 ").unwrap();
        assert_eq!(result, HandleCheck::Available);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remaining_candidates_hit_the_backend_once() {
        let backend = HandleBackend {
            taken: vec!["diego10"],
            ..Default::default()
        };
        let auth = AuthForwarding::default();

        let result = check_handle(&backend, &auth, None, "diego10").unwrap();
        assert_eq!(result, HandleCheck::Taken);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

        let result = check_handle(&backend, &auth, None, "diego11").unwrap();
        assert_eq!(result, HandleCheck::Available);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }
}
