//! Gesture tuning shared by the controller and the config loader.

use crate::config::loader::ConfigError;
use crate::model::InteractionRole;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do with a pointer-down that arrives while a drag is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReentryPolicy {
    /// Keep the running drag; the new pointer is ignored until release.
    #[default]
    IgnoreNew,
    /// Cancel the running drag (never commits) and start over from the new
    /// pointer.
    RestartSession,
}

impl ReentryPolicy {
    /// Identifier used in config files and env vars.
    pub fn as_str(self) -> &'static str {
        match self {
            ReentryPolicy::IgnoreNew => "ignore-new",
            ReentryPolicy::RestartSession => "restart-session",
        }
    }
}

impl FromStr for ReentryPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ignore-new" => Ok(ReentryPolicy::IgnoreNew),
            "restart-session" => Ok(ReentryPolicy::RestartSession),
            other => Err(ConfigError::InvalidValue {
                key: "reentry".to_string(),
                reason: format!("expected ignore-new or restart-session, got {:?}", other),
            }),
        }
    }
}

/// Thresholds and physics for drag handling, in host pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Horizontal travel before a press counts as a drag instead of a tap.
    pub jitter_threshold_px: f64,
    /// Net horizontal travel at release needed to change screen.
    pub commit_threshold_px: f64,
    /// Fraction of the pointer travel applied to the card (elastic damping).
    pub resistance: f64,
    /// Degrees of card rotation per pixel of travel.
    pub rotation_per_px: f64,
    /// Opacity lost per pixel of travel. Zero disables the fade.
    pub opacity_falloff_per_px: f64,
    /// Floor for the fade.
    pub min_opacity: f64,
    /// Policy for a second pointer-down during a drag.
    pub reentry: ReentryPolicy,
    /// Element roles that never start a drag.
    pub excluded_roles: Vec<InteractionRole>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            jitter_threshold_px: 5.0,
            commit_threshold_px: 80.0,
            resistance: 0.7,
            rotation_per_px: 0.03,
            opacity_falloff_per_px: 0.0,
            min_opacity: 0.5,
            reentry: ReentryPolicy::default(),
            excluded_roles: InteractionRole::DEFAULT_EXCLUDED.to_vec(),
        }
    }
}

impl GestureConfig {
    /// Whether a gesture starting on `role` may become a drag.
    pub fn allows_drag_from(&self, role: InteractionRole) -> bool {
        !self.excluded_roles.contains(&role)
    }

    /// Reject values that would make the state machine meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("jitter_threshold_px", self.jitter_threshold_px)?;
        non_negative("commit_threshold_px", self.commit_threshold_px)?;
        non_negative("rotation_per_px", self.rotation_per_px.abs())?;
        non_negative("opacity_falloff_per_px", self.opacity_falloff_per_px)?;

        if !(self.resistance > 0.0 && self.resistance <= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "resistance".to_string(),
                reason: format!("must be in (0, 1], got {}", self.resistance),
            });
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(ConfigError::InvalidValue {
                key: "min_opacity".to_string(),
                reason: format!("must be in [0, 1], got {}", self.min_opacity),
            });
        }
        if self.commit_threshold_px < self.jitter_threshold_px {
            return Err(ConfigError::InvalidValue {
                key: "commit_threshold_px".to_string(),
                reason: format!(
                    "must not be below jitter_threshold_px ({} < {})",
                    self.commit_threshold_px, self.jitter_threshold_px
                ),
            });
        }
        Ok(())
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("must be a finite non-negative number, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GestureConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_excludes_maps_but_not_surface() {
        let config = GestureConfig::default();
        assert!(!config.allows_drag_from(InteractionRole::Map));
        assert!(!config.allows_drag_from(InteractionRole::TextInput));
        assert!(config.allows_drag_from(InteractionRole::Surface));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = GestureConfig {
            commit_threshold_px: f64::NAN,
            ..GestureConfig::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "commit_threshold_px"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn resistance_outside_unit_interval_is_rejected() {
        for resistance in [0.0, -0.5, 1.5] {
            let config = GestureConfig {
                resistance,
                ..GestureConfig::default()
            };
            assert!(config.validate().is_err(), "resistance {} accepted", resistance);
        }
    }

    #[test]
    fn commit_below_jitter_is_rejected() {
        let config = GestureConfig {
            jitter_threshold_px: 10.0,
            commit_threshold_px: 4.0,
            ..GestureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reentry_policy_parses_identifiers() {
        assert_eq!("ignore-new".parse::<ReentryPolicy>(), Ok(ReentryPolicy::IgnoreNew));
        assert_eq!("restart-session".parse::<ReentryPolicy>(), Ok(ReentryPolicy::RestartSession));
        assert!("whatever".parse::<ReentryPolicy>().is_err());
    }

    #[test]
    fn reentry_policy_defaults_to_ignoring_new_pointers() {
        assert_eq!(ReentryPolicy::default(), ReentryPolicy::IgnoreNew);
    }
}
