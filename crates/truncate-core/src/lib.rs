//! Relationship model for truncation planning.
//!
//! This crate defines the table and index descriptors produced by schema
//! discovery, the table selection policy, and consistency checks shared by
//! catalog sources and their callers.

pub mod error;
pub mod model;
pub mod redaction;
pub mod selection;
pub mod validation;

pub use error::{Error, Result};
pub use model::{
    retain_selected_indexes, DeleteAction, IndexDescriptor, SchemaRelationships, TableDescriptor,
};
pub use redaction::redact_connection_string;
pub use selection::TableSelection;
pub use validation::validate_relationships;
