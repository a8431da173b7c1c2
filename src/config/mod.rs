//! Configuration module.
//!
//! Defaults → config file → environment → command line, resolved into a
//! single [`ResolvedConfig`].

pub mod gesture;
pub mod keybindings;
pub mod loader;

pub use gesture::{GestureConfig, ReentryPolicy};
pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    GestureSection, ResolvedConfig,
};
