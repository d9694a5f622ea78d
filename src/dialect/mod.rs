//! Warehouse dialect identifiers.
//!
//! Two types live here:
//!
//! - [`DialectTag`] - the open, string-keyed identifier the template registry
//!   is keyed by. Any string is a valid tag; tags nobody registered a template
//!   for simply resolve to the operation's fallback.
//! - [`Dialect`] - the closed set of warehouses the built-in rule set knows
//!   about, with canonical names and the aliases build tools commonly use.
//!
//! | Dialect | Canonical tag | Aliases |
//! |---------|---------------|---------|
//! | BigQuery | `bigquery` | `bq` |
//! | PostgreSQL | `postgres` | `postgresql`, `pg` |
//! | SQL Server | `sqlserver` | `mssql`, `tsql`, `sql_server` |
//! | Snowflake | `snowflake` | |
//! | Redshift | `redshift` | |
//! | Databricks | `databricks` | `spark` |
//! | DuckDB | `duckdb` | `duck` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a target SQL backend.
///
/// Tags are normalized on construction: surrounding whitespace is trimmed,
/// ASCII is lower-cased, and aliases of a known [`Dialect`] collapse to its
/// canonical name. Everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DialectTag(String);

impl DialectTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        let normalized = tag.as_ref().trim().to_ascii_lowercase();
        match Dialect::from_name(&normalized) {
            Some(dialect) => Self(dialect.name().to_string()),
            None => Self(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known dialect this tag names, if any.
    pub fn dialect(&self) -> Option<Dialect> {
        Dialect::from_name(&self.0)
    }
}

impl fmt::Display for DialectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DialectTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DialectTag {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<DialectTag> for String {
    fn from(tag: DialectTag) -> Self {
        tag.0
    }
}

impl From<Dialect> for DialectTag {
    fn from(dialect: Dialect) -> Self {
        dialect.tag()
    }
}

impl AsRef<str> for DialectTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Warehouses with built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    BigQuery,
    Postgres,
    SqlServer,
    Snowflake,
    Redshift,
    Databricks,
    DuckDb,
}

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Dialect::BigQuery,
        Dialect::Postgres,
        Dialect::SqlServer,
        Dialect::Snowflake,
        Dialect::Redshift,
        Dialect::Databricks,
        Dialect::DuckDb,
    ];

    /// Canonical tag name.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::BigQuery => "bigquery",
            Dialect::Postgres => "postgres",
            Dialect::SqlServer => "sqlserver",
            Dialect::Snowflake => "snowflake",
            Dialect::Redshift => "redshift",
            Dialect::Databricks => "databricks",
            Dialect::DuckDb => "duckdb",
        }
    }

    /// Match a canonical name or alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bigquery" | "bq" => Some(Dialect::BigQuery),
            "postgres" | "postgresql" | "pg" => Some(Dialect::Postgres),
            "sqlserver" | "sql_server" | "mssql" | "tsql" => Some(Dialect::SqlServer),
            "snowflake" => Some(Dialect::Snowflake),
            "redshift" => Some(Dialect::Redshift),
            "databricks" | "spark" => Some(Dialect::Databricks),
            "duckdb" | "duck" => Some(Dialect::DuckDb),
            _ => None,
        }
    }

    pub fn tag(&self) -> DialectTag {
        DialectTag(self.name().to_string())
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a [`Dialect`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s).ok_or_else(|| UnknownDialect(s.to_string()))
    }
}

impl TryFrom<String> for Dialect {
    type Error = UnknownDialect;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.name().to_string()
    }
}
