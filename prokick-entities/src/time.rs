use std::fmt;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Unix timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000)
    }

    pub const fn as_secs(self) -> i64 {
        self.0 / 1_000
    }

    /// Parses an RFC 3339 string as sent by the backend, e.g.
    /// `2024-06-01T18:30:00.000Z`.
    pub fn parse_rfc3339(s: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(s, &Rfc3339).map(Into::into)
    }

    pub fn format_rfc3339(self) -> Result<String, time::error::Format> {
        OffsetDateTime::from(self).format(&Rfc3339)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        let millis = from.unix_timestamp_nanos() / 1_000_000;
        Self(millis as i64)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        let nanos = i128::from(from.0) * 1_000_000;
        // The nanosecond range of `OffsetDateTime` strictly contains
        // the millisecond range of `Timestamp`.
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.format_rfc3339() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_rfc3339() {
        let ts = Timestamp::parse_rfc3339("2024-06-01T18:30:00.250Z").unwrap();
        assert_eq!(ts.as_secs(), 1_717_266_600);
        assert_eq!(ts.as_millis() % 1_000, 250);
        let formatted = ts.format_rfc3339().unwrap();
        assert_eq!(Timestamp::parse_rfc3339(&formatted).unwrap(), ts);
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = Timestamp::from_secs(100);
        let later = Timestamp::from_millis(100_001);
        assert!(earlier < later);
    }
}
