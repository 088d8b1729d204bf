use std::fmt;

/// Behavioral trust score owned by the backend, nominally in `0..=100`.
///
/// Values are mirrored as-is. Out-of-range values remain representable and
/// every derived encoding must tolerate them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReputationScore(i16);

impl ReputationScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i16 {
        self.0
    }

    pub fn is_in_range(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self)
    }
}

impl From<i16> for ReputationScore {
    fn from(from: i16) -> Self {
        Self(from)
    }
}

impl From<ReputationScore> for i16 {
    fn from(from: ReputationScore) -> Self {
        from.0
    }
}

impl fmt::Display for ReputationScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}/100", self.0)
    }
}
