//! Schema naming policy.
//!
//! Decides the schema a generated resource lands in from its classification,
//! an optional custom schema name, and the naming context. The branches are
//! evaluated in this order and the first match wins:
//!
//! 1. Seed-like resources get their trimmed custom name, or no name at all.
//!    They never fall back to the default schema here.
//! 2. No custom name (or a blank one): the default schema.
//! 3. Production environment: `<default>_<custom>`.
//! 4. Anything else: the default schema.
//!
//! ```
//! use sqlshim::naming::{resolve_name, NamingContext, ResourceClassification};
//!
//! let ctx = NamingContext::new("analytics").unwrap().with_environment("prod");
//! let name = resolve_name(ResourceClassification::ModelLike, Some("marketing"), &ctx).unwrap();
//! assert_eq!(name.as_deref(), Some("analytics_marketing"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment name treated as production unless a policy says otherwise.
pub const DEFAULT_PRODUCTION_ENVIRONMENT: &str = "prod";

/// Error type for naming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown resource classification: {0}")]
    UnknownClassification(String),
}

/// Resource kinds the naming policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceClassification {
    /// Static data loaded from files (dbt seeds, Dataform declarations).
    SeedLike,
    /// Anything built from SQL: tables, views, incrementals, operations.
    ModelLike,
}

impl ResourceClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceClassification::SeedLike => "seed-like",
            ResourceClassification::ModelLike => "model-like",
        }
    }
}

impl FromStr for ResourceClassification {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed-like" | "seed" | "declaration" => Ok(ResourceClassification::SeedLike),
            "model-like" | "model" | "table" | "view" | "incremental" | "operation"
            | "operations" | "assertion" => Ok(ResourceClassification::ModelLike),
            other => Err(NamingError::UnknownClassification(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs shared by every resource in one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingContext {
    pub default_schema: String,
    #[serde(default)]
    pub environment: Option<String>,
}

impl NamingContext {
    /// Build a context, rejecting a blank default schema.
    pub fn new(default_schema: impl Into<String>) -> Result<Self, NamingError> {
        let default_schema = default_schema.into();
        if default_schema.trim().is_empty() {
            return Err(NamingError::Configuration(
                "default schema must not be empty".to_string(),
            ));
        }
        Ok(Self {
            default_schema,
            environment: None,
        })
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_optional_environment(mut self, environment: Option<String>) -> Self {
        self.environment = environment;
        self
    }
}

/// The naming policy, parameterized by what counts as production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    pub production_environment: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            production_environment: DEFAULT_PRODUCTION_ENVIRONMENT.to_string(),
        }
    }
}

impl NamingPolicy {
    pub fn new(production_environment: impl Into<String>) -> Self {
        Self {
            production_environment: production_environment.into(),
        }
    }

    /// Resolve the schema for one resource.
    ///
    /// `Ok(None)` is only possible for seed-like resources without a usable
    /// custom name; the caller decides what an unnamed seed means.
    pub fn resolve(
        &self,
        classification: ResourceClassification,
        custom_name: Option<&str>,
        context: &NamingContext,
    ) -> Result<Option<String>, NamingError> {
        let default_schema = context.default_schema.as_str();
        if default_schema.trim().is_empty() {
            return Err(NamingError::Configuration(
                "naming policy requires a non-empty default schema".to_string(),
            ));
        }

        // Blank custom names are the same as none at all.
        let custom = custom_name.map(str::trim).filter(|name| !name.is_empty());

        if classification == ResourceClassification::SeedLike {
            return Ok(custom.map(str::to_string));
        }

        let Some(custom) = custom else {
            return Ok(Some(default_schema.to_string()));
        };

        if self.is_production(context.environment.as_deref()) {
            Ok(Some(format!("{default_schema}_{custom}")))
        } else {
            Ok(Some(default_schema.to_string()))
        }
    }

    pub fn is_production(&self, environment: Option<&str>) -> bool {
        environment.is_some_and(|env| env.trim() == self.production_environment.trim())
    }
}

/// Resolve with the default policy (`prod` is production).
pub fn resolve_name(
    classification: ResourceClassification,
    custom_name: Option<&str>,
    context: &NamingContext,
) -> Result<Option<String>, NamingError> {
    NamingPolicy::default().resolve(classification, custom_name, context)
}
