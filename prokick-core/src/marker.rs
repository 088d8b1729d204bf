//! Visual encoding of venues on the map.
//!
//! Marker color, size, and opacity are pure functions of the venue kind and
//! its reputation score. First-division club venues are always rendered with
//! the same prominent style; organizer venues degrade with reputation.

use prokick_entities::venue::{Venue, VenueKind};

/// Unscaled marker footprint in CSS pixels.
pub const MARKER_BASE_SIZE_PX: f32 = 30.0;

pub const FIRST_TEAM_COLOR: &str = "#8E44AD";

/// Map viewport defaults (Santa Fe, Argentina).
pub const DEFAULT_CENTER_LAT: f64 = -31.6333;
pub const DEFAULT_CENTER_LNG: f64 = -60.7;
pub const DEFAULT_ZOOM: f64 = 13.0;
pub const MIN_ZOOM: f64 = 10.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Zoom level after clicking a venue marker or suggestion.
pub const VENUE_FOCUS_ZOOM: f64 = 16.0;
/// Zoom level after jumping to a geocoded search result.
pub const SEARCH_FOCUS_ZOOM: f64 = 15.0;
pub const FLY_TO_DURATION_MS: u32 = 600;
pub const SEARCH_FLY_TO_DURATION_MS: u32 = 1_000;
pub const TOOLTIP_AUTO_HIDE_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: &'static str,
    /// Multiplier applied to [`MARKER_BASE_SIZE_PX`].
    pub size: f32,
    pub opacity: f32,
}

impl MarkerStyle {
    pub fn size_px(&self) -> f32 {
        MARKER_BASE_SIZE_PX * self.size
    }

    /// Vertical offset anchoring the tooltip above the marker.
    pub fn tooltip_offset_px(&self) -> f32 {
        self.size_px() / 2.0 - 40.0
    }
}

pub trait MarkerStyled {
    fn marker_style(&self) -> MarkerStyle;
}

impl MarkerStyled for Venue {
    fn marker_style(&self) -> MarkerStyle {
        match self.kind {
            VenueKind::FirstTeam => MarkerStyle {
                color: FIRST_TEAM_COLOR,
                size: 1.2,
                opacity: 1.0,
            },
            VenueKind::Organizer => {
                let rep = self.reputation.value();
                MarkerStyle {
                    color: reputation_color(rep),
                    size: reputation_size(rep),
                    opacity: reputation_opacity(rep),
                }
            }
        }
    }
}

fn reputation_color(rep: i16) -> &'static str {
    if rep >= 80 {
        "#2ECC71"
    } else if rep >= 60 {
        "#27AE60"
    } else if rep >= 40 {
        "#F1C40F"
    } else if rep >= 20 {
        "#E67E22"
    } else {
        "#C0392B"
    }
}

fn reputation_size(rep: i16) -> f32 {
    if rep >= 80 {
        1.2
    } else if rep >= 60 {
        1.1
    } else if rep >= 40 {
        1.0
    } else if rep >= 20 {
        0.9
    } else {
        0.6
    }
}

fn reputation_opacity(rep: i16) -> f32 {
    if rep >= 60 {
        1.0
    } else if rep >= 40 {
        0.8
    } else if rep >= 20 {
        0.6
    } else {
        0.4
    }
}

/// Badge color used by the venue detail panel (coarser bands than the
/// marker palette).
pub fn reputation_badge_color(rep: i16) -> &'static str {
    if rep >= 80 {
        "#10B981"
    } else if rep >= 60 {
        "#F59E0B"
    } else if rep >= 40 {
        "#EF4444"
    } else {
        "#6B7280"
    }
}
