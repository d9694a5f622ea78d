//! Crate-level error type.

use crate::config::SettingsError;
use crate::naming::NamingError;
use crate::template::{RegistryError, ResolveError};

/// Any error sqlshim can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, Error>;
