//! Screen identity types.
//!
//! A screen is one of the fixed logical views of the check-in app. The kind
//! is a closed set; the position of a screen in the stack is its index in
//! the registry, not something the kind knows about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Logical type tag of a screen in the card stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    /// Map of past check-ins.
    Map,
    /// New / edit check-in form.
    Checkin,
    /// Chronological list of check-ins.
    History,
    /// Aggregate statistics.
    Stats,
    /// Settings, import and export.
    Settings,
}

impl ScreenKind {
    /// All kinds in the stack's default order.
    pub const ALL: [ScreenKind; 5] = [
        ScreenKind::Map,
        ScreenKind::Checkin,
        ScreenKind::History,
        ScreenKind::Stats,
        ScreenKind::Settings,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKind::Map => "map",
            ScreenKind::Checkin => "checkin",
            ScreenKind::History => "history",
            ScreenKind::Stats => "stats",
            ScreenKind::Settings => "settings",
        }
    }

    /// Card title shown in the header of the screen.
    pub fn title(self) -> &'static str {
        match self {
            ScreenKind::Map => "Map",
            ScreenKind::Checkin => "New check-in",
            ScreenKind::History => "History",
            ScreenKind::Stats => "Stats",
            ScreenKind::Settings => "Settings",
        }
    }

    /// Resting tilt of the card in degrees.
    ///
    /// The check-in and history cards lean in opposite directions so the
    /// stack reads as a pile of cards; drag rotation is added on top.
    pub fn base_tilt_deg(self) -> f64 {
        match self {
            ScreenKind::Checkin => 1.5,
            ScreenKind::History => -1.5,
            _ => 0.0,
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known screen kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown screen kind: {0:?} (expected one of map, checkin, history, stats, settings)")]
pub struct UnknownScreenKind(pub String);

impl FromStr for ScreenKind {
    type Err = UnknownScreenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ScreenKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| UnknownScreenKind(s.to_string()))
    }
}
