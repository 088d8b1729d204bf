//! Partial profile updates: only fields that differ are sent.

use prokick_entities::{location::Location, profile::PlayerProfile};

use crate::gateways::backend::ProfileUpdate;

use super::Result;

/// Editable fields of the profile form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub handle: String,
    pub name: String,
    pub location: Location,
    pub foot: Option<String>,
    pub positions: Vec<String>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub avatar_url: Option<String>,
}

impl ProfileDraft {
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        Self {
            handle: profile.handle.as_str().to_owned(),
            name: profile.name.clone(),
            location: profile.location.clone(),
            foot: profile.foot.clone(),
            positions: profile.positions.clone(),
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

/// Diffs the draft against the held profile. A changed handle is parsed
/// first so invalid ones never reach the backend.
pub fn profile_update_diff(current: &PlayerProfile, draft: &ProfileDraft) -> Result<ProfileUpdate> {
    let mut update = ProfileUpdate::default();

    if draft.handle != current.handle.as_str() {
        let handle = draft.handle.parse::<prokick_entities::profile::Handle>()?;
        update.handle = Some(handle.as_str().to_owned());
    }
    if draft.name != current.name {
        update.name = Some(draft.name.clone());
    }
    if draft.location != current.location {
        update.location = Some(draft.location.clone());
    }
    if draft.foot != current.foot {
        update.foot = draft.foot.clone();
    }
    if draft.positions != current.positions {
        update.positions = Some(draft.positions.clone());
    }
    if draft.height_cm != current.height_cm {
        update.height_cm = draft.height_cm;
    }
    if draft.weight_kg != current.weight_kg {
        update.weight_kg = draft.weight_kg;
    }
    if draft.avatar_url != current.avatar_url {
        update.avatar_url = draft.avatar_url.clone();
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prokick_entities::{profile::PlayerStats, reputation::ReputationScore};

    fn profile() -> PlayerProfile {
        PlayerProfile {
            id: "p1".into(),
            handle: "diego10".parse().unwrap(),
            name: "Diego".into(),
            location: Location {
                country: "AR".into(),
                province: "Santa Fe".into(),
                city: "Santa Fe".into(),
                address: None,
                pos: None,
            },
            foot: Some("left".into()),
            positions: vec!["CAM".into()],
            height_cm: Some(166),
            weight_kg: None,
            avatar_url: None,
            elo: 1200.0,
            reputation: ReputationScore::new(80),
            stats: PlayerStats::default(),
        }
    }

    #[test]
    fn unchanged_draft_yields_empty_update() {
        let profile = profile();
        let draft = ProfileDraft::from_profile(&profile);
        let update = profile_update_diff(&profile, &draft).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn only_changed_fields_are_present() {
        let profile = profile();
        let mut draft = ProfileDraft::from_profile(&profile);
        draft.name = "Diego Armando".into();
        draft.height_cm = Some(167);
        let update = profile_update_diff(&profile, &draft).unwrap();
        assert_eq!(update.name.as_deref(), Some("Diego Armando"));
        assert_eq!(update.height_cm, Some(167));
        assert!(update.handle.is_none());
        assert!(update.location.is_none());
    }

    #[test]
    fn invalid_new_handle_is_rejected_locally() {
        let profile = profile();
        let mut draft = ProfileDraft::from_profile(&profile);
        draft.handle = "xy".into();
        assert!(profile_update_diff(&profile, &draft).is_err());
    }
}
