//! Configuration file loading with precedence handling.

use crate::config::gesture::{GestureConfig, ReentryPolicy};
use crate::model::{InteractionRole, ScreenKind};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CARDSTACK_CONFIG";

/// Environment variable overriding the commit threshold in pixels.
pub const COMMIT_THRESHOLD_ENV_VAR: &str = "CARDSTACK_COMMIT_THRESHOLD";

/// Environment variable overriding the reentry policy.
pub const REENTRY_ENV_VAR: &str = "CARDSTACK_REENTRY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is outside its allowed range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key that failed validation.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cardstack/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Screen shown on startup.
    #[serde(default)]
    pub initial_screen: Option<ScreenKind>,

    /// Acknowledge committed navigation with a bell / vibration.
    #[serde(default)]
    pub haptics: Option<bool>,

    /// Host pixels represented by one terminal column.
    #[serde(default)]
    pub px_per_column: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Gesture tuning section.
    #[serde(default)]
    pub gesture: Option<GestureSection>,
}

/// `[gesture]` table of the config file.
///
/// ```toml
/// [gesture]
/// commit_threshold_px = 100.0
/// reentry = "restart-session"
/// excluded_roles = ["map", "button", "text-input"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GestureSection {
    /// See [`GestureConfig::jitter_threshold_px`].
    #[serde(default)]
    pub jitter_threshold_px: Option<f64>,
    /// See [`GestureConfig::commit_threshold_px`].
    #[serde(default)]
    pub commit_threshold_px: Option<f64>,
    /// See [`GestureConfig::resistance`].
    #[serde(default)]
    pub resistance: Option<f64>,
    /// See [`GestureConfig::rotation_per_px`].
    #[serde(default)]
    pub rotation_per_px: Option<f64>,
    /// See [`GestureConfig::opacity_falloff_per_px`].
    #[serde(default)]
    pub opacity_falloff_per_px: Option<f64>,
    /// See [`GestureConfig::min_opacity`].
    #[serde(default)]
    pub min_opacity: Option<f64>,
    /// See [`GestureConfig::reentry`].
    #[serde(default)]
    pub reentry: Option<ReentryPolicy>,
    /// See [`GestureConfig::excluded_roles`]. Replaces the default list.
    #[serde(default)]
    pub excluded_roles: Option<Vec<InteractionRole>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Screen shown on startup.
    pub initial_screen: ScreenKind,
    /// Acknowledge committed navigation.
    pub haptics: bool,
    /// Host pixels per terminal column.
    pub px_per_column: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Gesture tuning.
    pub gesture: GestureConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            initial_screen: ScreenKind::Map,
            haptics: true,
            px_per_column: 8.0,
            log_file_path: default_log_path(),
            gesture: GestureConfig::default(),
        }
    }
}

impl ResolvedConfig {
    /// Validate the fully resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.px_per_column.is_finite() && self.px_per_column > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "px_per_column".to_string(),
                reason: format!("must be a positive number, got {}", self.px_per_column),
            });
        }
        self.gesture.validate()
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cardstack/cardstack.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cardstack").join("cardstack.log")
    } else {
        PathBuf::from("cardstack.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cardstack").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CARDSTACK_CONFIG` environment variable
/// 3. Default path `~/.config/cardstack/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        initial_screen: config.initial_screen.unwrap_or(defaults.initial_screen),
        haptics: config.haptics.unwrap_or(defaults.haptics),
        px_per_column: config.px_per_column.unwrap_or(defaults.px_per_column),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        gesture: merge_gesture(config.gesture, defaults.gesture),
    }
}

fn merge_gesture(section: Option<GestureSection>, defaults: GestureConfig) -> GestureConfig {
    let Some(section) = section else {
        return defaults;
    };

    GestureConfig {
        jitter_threshold_px: section
            .jitter_threshold_px
            .unwrap_or(defaults.jitter_threshold_px),
        commit_threshold_px: section
            .commit_threshold_px
            .unwrap_or(defaults.commit_threshold_px),
        resistance: section.resistance.unwrap_or(defaults.resistance),
        rotation_per_px: section.rotation_per_px.unwrap_or(defaults.rotation_per_px),
        opacity_falloff_per_px: section
            .opacity_falloff_per_px
            .unwrap_or(defaults.opacity_falloff_per_px),
        min_opacity: section.min_opacity.unwrap_or(defaults.min_opacity),
        reentry: section.reentry.unwrap_or(defaults.reentry),
        excluded_roles: section.excluded_roles.unwrap_or(defaults.excluded_roles),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CARDSTACK_COMMIT_THRESHOLD`: commit threshold in pixels
/// - `CARDSTACK_REENTRY`: `ignore-new` or `restart-session`
///
/// Unparseable values are skipped; validation of the final config catches
/// values that parse but are out of range.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(threshold) = std::env::var(COMMIT_THRESHOLD_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
    {
        config.gesture.commit_threshold_px = threshold;
    }

    if let Some(policy) = std::env::var(REENTRY_ENV_VAR)
        .ok()
        .and_then(|raw| raw.parse::<ReentryPolicy>().ok())
    {
        config.gesture.reentry = policy;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    screen_override: Option<ScreenKind>,
    commit_threshold_override: Option<f64>,
    reentry_override: Option<ReentryPolicy>,
    haptics_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(screen) = screen_override {
        config.initial_screen = screen;
    }

    if let Some(threshold) = commit_threshold_override {
        config.gesture.commit_threshold_px = threshold;
    }

    if let Some(policy) = reentry_override {
        config.gesture.reentry = policy;
    }

    if let Some(haptics) = haptics_override {
        config.haptics = haptics;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_cardstack_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("cardstack.log"),
            "Default log path should end with 'cardstack.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
