//! Code generation building blocks
//!
//! Naming helpers and the template registry shared by the schema and
//! controller compilers.

pub mod helpers;
pub mod templates;

pub use helpers::TemplateHelpers;
pub use templates::{TemplateKind, TemplateRegistry};
