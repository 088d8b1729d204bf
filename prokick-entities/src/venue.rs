use strum::{AsRefStr, EnumString};

use crate::{geo::MapPoint, id::Id, reputation::ReputationScore};

/// Who runs a venue. The wire names are Spanish and kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, strum::Display)]
pub enum VenueKind {
    /// A venue listed by an independent match organizer.
    #[strum(serialize = "organizador")]
    Organizer,
    /// A venue belonging to a first-division club. Rendered with a fixed
    /// visual style regardless of reputation.
    #[strum(serialize = "equipo_primera")]
    FirstTeam,
}

/// A football pitch shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: Id,
    pub name: String,
    pub pos: MapPoint,
    pub kind: VenueKind,
    pub reputation: ReputationScore,
    /// Organizer name or club name, depending on `kind`.
    pub owner: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl Venue {
    /// Case-insensitive substring match over name and address, as used by
    /// the map search box.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.address
            .as_deref()
            .map(|a| a.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::venue;

    #[test]
    fn kind_wire_names() {
        assert_eq!(VenueKind::Organizer.as_ref(), "organizador");
        assert_eq!(VenueKind::FirstTeam.as_ref(), "equipo_primera");
        assert_eq!("equipo_primera".parse::<VenueKind>(), Ok(VenueKind::FirstTeam));
        assert!("gimnasio".parse::<VenueKind>().is_err());
    }

    #[test]
    fn text_match_on_name_and_address() {
        let v = venue("v1", "Complejo El Potrero")
            .address("Av. Freyre 2530, Santa Fe")
            .finish();
        assert!(v.matches_text("potrero"));
        assert!(v.matches_text("FREYRE"));
        assert!(!v.matches_text("palermo"));
    }
}
