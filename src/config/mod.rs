//! Configuration module for sqlshim.
//!
//! Handles the project file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, ProjectSettings, Settings, SettingsError, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
