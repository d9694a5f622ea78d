//! # sqlshim
//!
//! Dialect-aware SQL expression templates and schema naming policy for
//! warehouse build tooling.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        Build layer (template expansion, out of crate)    │
//! │   reads sqlshim.toml → warehouse, schema, environment    │
//! └──────────────────────────────────────────────────────────┘
//!            │                                │
//!            ▼ per expression site            ▼ per resource
//! ┌────────────────────────────┐  ┌───────────────────────────┐
//! │ template::TemplateRegistry │  │ naming::NamingPolicy      │
//! │ (operation, dialect)       │  │ (classification, custom   │
//! │   → SQL fragment           │  │  name, context) → schema  │
//! └────────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! Both halves are pure: no I/O, no global configuration, no shared mutable
//! state. Settings are loaded by the caller and passed in as plain values.

pub mod config;
pub mod dialect;
pub mod error;
pub mod naming;
pub mod template;

pub use dialect::{Dialect, DialectTag};
pub use error::{Error, Result};
pub use naming::{resolve_name, NamingContext, NamingPolicy, ResourceClassification};
pub use template::{resolve, resolve_for, Template, TemplateRegistry};
