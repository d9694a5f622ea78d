//! Error types for template registration and resolution.

/// Errors raised while resolving an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Operation '{operation}' expects {expected} operand(s), got {actual}")]
    Arity {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Operation already declared: {0}")]
    DuplicateOperation(String),

    #[error("Template already registered for operation '{operation}' and dialect '{dialect}'")]
    DuplicateTemplate { operation: String, dialect: String },

    #[error("Template for '{operation}' takes {actual} operand(s) but the operation declares {expected}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot register a dialect template for undeclared operation: {0}")]
    UnknownOperation(String),
}
