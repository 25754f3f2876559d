//! Catalog discovery of table and index relationships.

pub mod context;
pub mod decode;
pub mod discover;
pub mod options;
pub mod postgres;
pub mod source;

pub use context::{CancelHandle, DiscoveryContext};
pub use discover::{discover_indexes, discover_tables};
pub use options::{CatalogScope, ConnectOptions};
pub use postgres::PostgresCatalog;
pub use source::{CatalogSource, IndexRow, TableRow};

pub use truncate_core::{
    DeleteAction, IndexDescriptor, SchemaRelationships, TableDescriptor, TableSelection,
};
