use std::fmt;

/// How many venues a subscription may register. The backend serializes the
/// unlimited case as the literal string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueLimit {
    Limited(u32),
    Unlimited,
}

impl Default for VenueLimit {
    fn default() -> Self {
        Self::Limited(0)
    }
}

impl VenueLimit {
    pub fn allows(self, current_count: u32) -> bool {
        match self {
            Self::Limited(max) => current_count < max,
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for VenueLimit {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Limited(max) => write!(f, "{max}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub plan: String,
    pub seats_teams: u32,
    pub venues_limit: VenueLimit,
    pub status: String,
}
