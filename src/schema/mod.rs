//! Schema assets: embedded schemas and contexts, document checks, templates

pub mod checker;
pub mod registry;
pub mod template;

pub use checker::{DocumentCheckError, DocumentChecker};
pub use registry::SchemaRegistry;
pub use template::{ReviewRenderer, TemplateError};
