//! Local session snapshot bridging the third-party identity to the backend
//! account record.

use prokick_entities::{profile::PlayerProfile, user::User};

use crate::gateways::backend::{
    AuthForwarding, BackendGateway, LoginOutcome, SessionCookies, UserAndProfile,
};

use super::Result;

/// The signed-in state held by the application.
///
/// The backend record is fetched at most once per process lifetime when a
/// third-party identity is present without local data; the one-shot flag is
/// reset only by a restart.
#[derive(Debug, Default)]
pub struct Session {
    data: Option<UserAndProfile>,
    is_new_user: bool,
    sync_attempted: bool,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.data.as_ref().map(|d| &d.profile)
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    pub fn is_new_user(&self) -> bool {
        self.is_new_user
    }

    /// Whether [`Session::sync`] should run: an identity exists, no backend
    /// data is held, and no sync was attempted yet.
    pub fn needs_sync(&self, identity_present: bool) -> bool {
        identity_present && self.data.is_none() && !self.sync_attempted
    }

    /// Fetches the backend record. Counts as the one attempt even when the
    /// fetch fails, so a broken backend does not cause a request storm.
    pub fn sync<G: BackendGateway>(
        &mut self,
        gateway: &G,
        auth: &AuthForwarding,
    ) -> Result<&UserAndProfile> {
        self.sync_attempted = true;
        match gateway.current_user(auth) {
            Ok(data) => Ok(&*self.data.insert(data)),
            Err(err) => {
                log::warn!("session sync failed: {err}");
                Err(err.into())
            }
        }
    }

    pub fn sign_in(&mut self, outcome: LoginOutcome) {
        let LoginOutcome {
            user,
            profile,
            is_new_user,
            set_cookies: _,
        } = outcome;
        self.data = Some(UserAndProfile { user, profile });
        self.is_new_user = is_new_user;
        self.sync_attempted = true;
    }

    /// Ends the session. Local state is cleared even when the backend call
    /// fails; the failure is still reported so cookies can be expired.
    pub fn logout<G: BackendGateway>(
        &mut self,
        gateway: &G,
        auth: &AuthForwarding,
    ) -> Result<SessionCookies> {
        let result = gateway.logout(auth);
        self.data = None;
        self.is_new_user = false;
        if let Err(err) = &result {
            log::warn!("backend logout failed, local session cleared anyway: {err}");
        }
        Ok(result?)
    }

    pub fn apply_profile(&mut self, profile: PlayerProfile) {
        if let Some(data) = &mut self.data {
            data.profile = profile;
        }
    }

    pub fn replace(&mut self, data: UserAndProfile) {
        self.data = Some(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::backend::{self, Error as BackendError};
    use prokick_entities::{
        id::Id, location::Location, profile::PlayerStats, reputation::ReputationScore,
        request::OrganizerRequest, time::Timestamp, venue::Venue,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn user_and_profile() -> UserAndProfile {
        UserAndProfile {
            user: User {
                id: Id::from("u1"),
                email: Some("a@b.com".into()),
                name: Some("Ana".into()),
                avatar_url: None,
                roles: vec!["player".into()],
                is_verified: true,
                created_at: Timestamp::from_secs(0),
                last_login_at: None,
                subscription: None,
            },
            profile: PlayerProfile {
                id: "p1".into(),
                handle: "ana09".parse().unwrap(),
                name: "Ana".into(),
                location: Location::default(),
                foot: None,
                positions: vec![],
                height_cm: None,
                weight_kg: None,
                avatar_url: None,
                elo: 1000.0,
                reputation: ReputationScore::new(50),
                stats: PlayerStats::default(),
            },
        }
    }

    /// Counts `current_user` calls; fails when `fail` is set.
    #[derive(Default)]
    struct FlakyBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl BackendGateway for FlakyBackend {
        fn login(&self, _: &str) -> backend::Result<LoginOutcome> {
            unimplemented!()
        }
        fn logout(&self, _: &AuthForwarding) -> backend::Result<SessionCookies> {
            if self.fail {
                Err(BackendError::Transport("offline".into()))
            } else {
                Ok(SessionCookies::default())
            }
        }
        fn current_user(&self, _: &AuthForwarding) -> backend::Result<UserAndProfile> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(BackendError::upstream(401, "No autorizado"))
            } else {
                Ok(user_and_profile())
            }
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
        fn check_handle(&self, _: &AuthForwarding, _: &str) -> backend::Result<bool> {
            unimplemented!()
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
            _: &backend::RequestListQuery,
        ) -> backend::Result<backend::RequestPage> {
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
            _: &backend::RequestListQuery,
        ) -> backend::Result<backend::RequestPage> {
            unimplemented!()
        }
    }

    #[test]
    fn sync_runs_exactly_once_even_after_failure() {
        let backend = FlakyBackend {
            fail: true,
            ..Default::default()
        };
        let auth = AuthForwarding::default();
        let mut session = Session::default();

        assert!(session.needs_sync(true));
        assert!(session.sync(&backend, &auth).is_err());
        // The attempt is spent; no automatic retry.
        assert!(!session.needs_sync(true));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_sync_without_identity() {
        let session = Session::default();
        assert!(!session.needs_sync(false));
    }

    #[test]
    fn logout_clears_state_even_when_the_backend_fails() {
        let backend = FlakyBackend {
            fail: true,
            ..Default::default()
        };
        let mut session = Session::default();
        session.replace(user_and_profile());
        assert!(session.is_authenticated());

        let cookies = session.logout(&backend, &AuthForwarding::default());
        assert!(cookies.is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn sign_in_records_new_user_flag() {
        let mut session = Session::default();
        let UserAndProfile { user, profile } = user_and_profile();
        session.sign_in(LoginOutcome {
            user,
            profile,
            is_new_user: true,
            set_cookies: vec![],
        });
        assert!(session.is_new_user());
        assert!(session.is_authenticated());
        assert!(!session.needs_sync(true));
    }
}
