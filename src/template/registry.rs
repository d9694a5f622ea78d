//! Template registry keyed by (operation, dialect).

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use super::builtin;
use super::error::{RegistryError, ResolveError};
use super::Template;
use crate::dialect::DialectTag;

static SHARED: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::builtin);

#[derive(Debug, Clone)]
struct OperationEntry {
    arity: usize,
    fallback: Template,
    dialects: BTreeMap<DialectTag, Template>,
}

/// Registry of expression templates.
///
/// Every declared operation owns exactly one fallback template, so lookup is
/// total over declared operations. Registration is additive only: an existing
/// (operation, dialect) pair can never be replaced, which keeps resolution for
/// already-supported dialects stable when new ones are added.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    operations: HashMap<String, OperationEntry>,
}

impl TemplateRegistry {
    /// An empty registry with no operations declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding the built-in rule set.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin::OPERATIONS {
            let dialects = spec
                .dialects
                .iter()
                .map(|(dialect, render)| (dialect.tag(), Template::new(spec.arity, *render)))
                .collect();
            registry.operations.insert(
                spec.name.to_string(),
                OperationEntry {
                    arity: spec.arity,
                    fallback: Template::new(spec.arity, spec.fallback),
                    dialects,
                },
            );
        }
        registry
    }

    /// The process-wide built-in registry.
    pub fn shared() -> &'static TemplateRegistry {
        &SHARED
    }

    /// Declare an operation together with its fallback template.
    ///
    /// The fallback's arity becomes the operation's arity.
    pub fn declare(&mut self, operation: &str, fallback: Template) -> Result<(), RegistryError> {
        if self.operations.contains_key(operation) {
            return Err(RegistryError::DuplicateOperation(operation.to_string()));
        }
        debug!(operation, arity = fallback.arity(), "declaring operation");
        self.operations.insert(
            operation.to_string(),
            OperationEntry {
                arity: fallback.arity(),
                fallback,
                dialects: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Register a dialect-specific template for a declared operation.
    pub fn register(
        &mut self,
        operation: &str,
        dialect: impl Into<DialectTag>,
        template: Template,
    ) -> Result<(), RegistryError> {
        let dialect = dialect.into();
        let entry = self
            .operations
            .get_mut(operation)
            .ok_or_else(|| RegistryError::UnknownOperation(operation.to_string()))?;

        if template.arity() != entry.arity {
            return Err(RegistryError::ArityMismatch {
                operation: operation.to_string(),
                expected: entry.arity,
                actual: template.arity(),
            });
        }
        if entry.dialects.contains_key(&dialect) {
            return Err(RegistryError::DuplicateTemplate {
                operation: operation.to_string(),
                dialect: dialect.to_string(),
            });
        }

        debug!(operation, dialect = %dialect, "registering template");
        entry.dialects.insert(dialect, template);
        Ok(())
    }

    /// Render `operation` for `dialect`.
    pub fn resolve<S: AsRef<str>>(
        &self,
        operation: &str,
        dialect: &DialectTag,
        operands: &[S],
    ) -> Result<String, ResolveError> {
        let entry = self
            .operations
            .get(operation)
            .ok_or_else(|| ResolveError::UnknownOperation(operation.to_string()))?;

        if operands.len() != entry.arity {
            return Err(ResolveError::Arity {
                operation: operation.to_string(),
                expected: entry.arity,
                actual: operands.len(),
            });
        }

        let template = match entry.dialects.get(dialect) {
            Some(template) => template,
            None => {
                trace!(operation, dialect = %dialect, "no dialect template, using fallback");
                &entry.fallback
            }
        };

        let operands: Vec<&str> = operands.iter().map(AsRef::as_ref).collect();
        Ok(template.render(&operands))
    }

    /// Whether a dialect-specific template exists (the fallback doesn't count).
    pub fn supports(&self, operation: &str, dialect: &DialectTag) -> bool {
        self.operations
            .get(operation)
            .is_some_and(|entry| entry.dialects.contains_key(dialect))
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    pub fn arity(&self, operation: &str) -> Option<usize> {
        self.operations.get(operation).map(|entry| entry.arity)
    }

    /// Declared operation names, sorted.
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Dialects with a specific template for `operation`, sorted.
    pub fn dialects_for(&self, operation: &str) -> Vec<&DialectTag> {
        self.operations
            .get(operation)
            .map(|entry| entry.dialects.keys().collect())
            .unwrap_or_default()
    }
}
