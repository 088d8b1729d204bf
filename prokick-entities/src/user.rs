use crate::{id::Id, subscription::Subscription, time::Timestamp};

/// Account record mirrored from the backend after a third-party sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Id,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub roles: Vec<String>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub last_login_at: Option<Timestamp>,
    pub subscription: Option<Subscription>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
