use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{id::Id, location::Location, reputation::ReputationScore};

/// Unique, user-chosen short name of a player profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HandleParseError {
    #[error("El nombre de usuario debe tener al menos {} caracteres", Handle::MIN_LEN)]
    TooShort,
    #[error("El nombre de usuario no puede superar los {} caracteres", Handle::MAX_LEN)]
    TooLong,
}

impl Handle {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 20;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Handle {
    type Err = HandleParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.chars().count() < Self::MIN_LEN {
            return Err(HandleParseError::TooShort);
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(HandleParseError::TooLong);
        }
        Ok(Self(s.to_owned()))
    }
}

impl From<Handle> for String {
    fn from(from: Handle) -> Self {
        from.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameTally {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: GameTally,
    pub goals: u32,
    pub assists: u32,
    pub mvps: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

/// Public player profile linked 1:1 to a [`crate::user::User`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub id: Id,
    pub handle: Handle,
    pub name: String,
    pub location: Location,
    pub foot: Option<String>,
    pub positions: Vec<String>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub avatar_url: Option<String>,
    pub elo: f64,
    pub reputation: ReputationScore,
    pub stats: PlayerStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_length_bounds() {
        assert_eq!("ab".parse::<Handle>(), Err(HandleParseError::TooShort));
        assert_eq!(
            "a".repeat(21).parse::<Handle>(),
            Err(HandleParseError::TooLong)
        );
        assert_eq!("leo".parse::<Handle>().unwrap().as_str(), "leo");
        assert!("a".repeat(20).parse::<Handle>().is_ok());
    }

    #[test]
    fn handle_is_trimmed() {
        assert_eq!("  diego10 ".parse::<Handle>().unwrap().as_str(), "diego10");
    }
}
