//! TOML-based project settings.
//!
//! Supports a project file (sqlshim.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [project]
//! warehouse = "bigquery"
//! default_schema = "analytics"
//! environment = "${DATAFORM_ENV}"
//!
//! [naming]
//! production_environment = "prod"
//!
//! [vars]
//! start_date = "2020-01-01"
//! ```
//!
//! These settings belong to the caller. The template registry and the naming
//! policy never read them; they only receive the values derived here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dialect::{Dialect, DialectTag};
use crate::naming::{NamingContext, NamingError, NamingPolicy};

/// Environment variable pointing at a project file.
pub const CONFIG_ENV_VAR: &str = "SQLSHIM_CONFIG";

/// Project file name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "sqlshim.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Naming(#[from] NamingError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Warehouse, schema and environment of the project.
    pub project: ProjectSettings,

    /// Naming policy overrides.
    pub naming: NamingPolicy,

    /// Named project variables, passed through to callers untouched.
    pub vars: BTreeMap<String, String>,
}

/// Project-wide build target.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Target warehouse tag (supports ${ENV_VAR} expansion).
    pub warehouse: Option<String>,

    /// Schema resources land in when nothing overrides it.
    pub default_schema: Option<String>,

    /// Environment name (supports ${ENV_VAR} expansion).
    pub environment: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SQLSHIM_CONFIG`
    /// 2. `./sqlshim.toml`
    /// 3. `~/.config/sqlshim/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlshim").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.naming.production_environment.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "naming.production_environment must not be empty".to_string(),
            ));
        }
        if let Some(schema) = &self.project.default_schema {
            if schema.trim().is_empty() {
                return Err(SettingsError::InvalidConfig(
                    "project.default_schema must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Target dialect, if the project names one.
    pub fn dialect_tag(&self) -> Result<Option<DialectTag>, SettingsError> {
        match &self.project.warehouse {
            Some(raw) => Ok(Some(DialectTag::new(expand_env_vars(raw)?))),
            None => Ok(None),
        }
    }

    /// Environment with variables expanded. Blank values count as unset.
    pub fn environment(&self) -> Result<Option<String>, SettingsError> {
        match &self.project.environment {
            Some(raw) => {
                let expanded = expand_env_vars(raw)?;
                let trimmed = expanded.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Target dialect: an explicit override, else the project warehouse, else
    /// the default dialect. The warehouse is only expanded without an override.
    pub fn target_dialect(&self, dialect: Option<&str>) -> Result<DialectTag, SettingsError> {
        match dialect {
            Some(dialect) => Ok(DialectTag::new(dialect)),
            None => Ok(self
                .dialect_tag()?
                .unwrap_or_else(|| Dialect::default().tag())),
        }
    }

    /// Naming context for this project.
    pub fn naming_context(&self) -> Result<NamingContext, SettingsError> {
        self.naming_context_with(None, None)
    }

    /// Naming context with caller overrides taking precedence over the
    /// project values. A project value is only read (and expanded) when
    /// its override is absent.
    pub fn naming_context_with(
        &self,
        default_schema: Option<&str>,
        environment: Option<&str>,
    ) -> Result<NamingContext, SettingsError> {
        let default_schema = match default_schema {
            Some(schema) => schema,
            None => self.project.default_schema.as_deref().ok_or_else(|| {
                SettingsError::InvalidConfig("project.default_schema is not set".to_string())
            })?,
        };
        let environment = match environment {
            Some(env) => Some(env.to_string()),
            None => self.environment()?,
        };
        Ok(NamingContext::new(default_schema)?.with_optional_environment(environment))
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            let name: String = std::iter::from_fn(|| chars.next_if(|ch| *ch != '}')).collect();
            if chars.next_if_eq(&'}').is_none() {
                return Err(SettingsError::InvalidConfig(format!(
                    "unterminated variable reference in '{s}'"
                )));
            }
            if name.trim().is_empty() {
                return Err(SettingsError::InvalidConfig(format!(
                    "empty variable reference in '{s}'"
                )));
            }
            name
        } else {
            std::iter::from_fn(|| chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_'))
                .collect()
        };

        if var_name.is_empty() {
            // Just a lone $, keep it
            result.push('$');
            continue;
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
