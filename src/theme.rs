//! Time-of-day theme labels.
//!
//! A [`Theme`] is derived from the local hour with closed-open buckets:
//!
//! ```text
//!  0 ─────── 6 ─────────── 16 ─────── 20 ──── 24
//!    night      morning       evening    night
//! ```
//!
//! Each label has a marker class (`theme-morning`, ...) that the styling
//! layer keys off. [`ALL_MARKERS`] lists every marker so the apply step can
//! clear them all before adding the current one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every marker class the selector may place on the root surface.
pub const ALL_MARKERS: [&str; 3] = ["theme-morning", "theme-evening", "theme-night"];

/// One of the three time-of-day themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// 06:00 to 15:59. Also the placeholder before the first computation.
    #[default]
    Morning,
    /// 16:00 to 19:59.
    Evening,
    /// 20:00 to 05:59.
    Night,
}

impl Theme {
    /// All themes in stylesheet order.
    pub const ALL: [Theme; 3] = [Theme::Morning, Theme::Evening, Theme::Night];

    /// Classify an hour of the day.
    ///
    /// Total over `u32`: values past 23 wrap modulo 24.
    pub fn for_hour(hour: u32) -> Self {
        match hour % 24 {
            6..16 => Theme::Morning,
            16..20 => Theme::Evening,
            _ => Theme::Night,
        }
    }

    /// Lowercase label, e.g. `"evening"`.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Morning => "morning",
            Theme::Evening => "evening",
            Theme::Night => "night",
        }
    }

    /// Marker class applied to the root surface, e.g. `"theme-evening"`.
    pub fn marker(self) -> &'static str {
        match self {
            Theme::Morning => ALL_MARKERS[0],
            Theme::Evening => ALL_MARKERS[1],
            Theme::Night => ALL_MARKERS[2],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected morning, evening or night)")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Theme::Morning),
            "evening" => Ok(Theme::Evening),
            "night" => Ok(Theme::Night),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
