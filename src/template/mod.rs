//! Dialect expression resolution.
//!
//! An *operation* is a named, fixed-arity SQL-generating transformation
//! (`cents-to-dollars`, `date-truncate`, ...). Each operation carries one
//! fallback [`Template`] and any number of dialect-specific ones. Resolution
//! picks the template registered for the requested [`DialectTag`] and falls
//! back otherwise:
//!
//! ```text
//! (operation, dialect, operands)
//!         │
//!         ▼  arity check
//!   dialect template ──(missing)──▶ fallback template
//!         │                               │
//!         └──────────────┬────────────────┘
//!                        ▼
//!                   SQL fragment
//! ```
//!
//! # Usage
//!
//! ```
//! use sqlshim::template::{self, ops};
//!
//! let sql = template::resolve(ops::CENTS_TO_DOLLARS, "postgres", &["price"]).unwrap();
//! assert_eq!(sql, "(price::numeric(16,2) / 100)");
//! ```
//!
//! Operands are inserted verbatim. Quoting and escaping are the caller's job.

mod builtin;
mod error;
mod registry;


pub use builtin::ops;
pub use error::{RegistryError, ResolveError};
pub use registry::TemplateRegistry;

use std::fmt;
use std::sync::Arc;

use crate::dialect::{Dialect, DialectTag};

/// Rendering closure shared by every template.
///
/// Receives exactly `arity` operands; the registry checks the count before
/// calling it.
pub type TemplateFn = Arc<dyn Fn(&[&str]) -> String + Send + Sync>;

/// An expression template with a declared arity.
#[derive(Clone)]
pub struct Template {
    arity: usize,
    render: TemplateFn,
}

impl Template {
    pub fn new<F>(arity: usize, render: F) -> Self
    where
        F: Fn(&[&str]) -> String + Send + Sync + 'static,
    {
        Self {
            arity,
            render: Arc::new(render),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Render without checking arity. Prefer [`TemplateRegistry::resolve`].
    pub(crate) fn render(&self, operands: &[&str]) -> String {
        (self.render)(operands)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Resolve against the shared built-in registry.
pub fn resolve<S: AsRef<str>>(
    operation: &str,
    dialect: impl Into<DialectTag>,
    operands: &[S],
) -> Result<String, ResolveError> {
    TemplateRegistry::shared().resolve(operation, &dialect.into(), operands)
}

/// Resolve for a known dialect against the shared built-in registry.
pub fn resolve_for<S: AsRef<str>>(
    operation: &str,
    dialect: Dialect,
    operands: &[S],
) -> Result<String, ResolveError> {
    TemplateRegistry::shared().resolve(operation, &dialect.tag(), operands)
}
