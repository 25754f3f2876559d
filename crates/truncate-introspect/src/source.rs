use futures::stream::BoxStream;

use truncate_core::Result;

/// Raw catalog row describing one base table.
///
/// Nullable catalog columns stay optional here; decoding into the model
/// happens in [`crate::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub parent_name: Option<String>,
    pub on_delete_action: Option<String>,
    pub referenced_by: Option<Vec<String>>,
}

/// Raw catalog row describing one secondary index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRow {
    pub name: String,
    pub base_table_name: String,
    pub parent_table_name: Option<String>,
}

/// Read-only access to the catalog views discovery depends on.
///
/// Each stream is backed by a single statement, so every row of one stream
/// observes the same snapshot. Two streams may observe different snapshots.
pub trait CatalogSource: Send + Sync {
    /// Returns the engine identifier (e.g. `spanner-pg`).
    fn engine(&self) -> &'static str;

    /// Base tables of the scoped schema ordered by name, with their
    /// interleaving parent and the tables referencing them by foreign key.
    fn table_rows(&self) -> BoxStream<'_, Result<TableRow>>;

    /// Secondary indexes of the scoped schema, primary keys excluded.
    fn index_rows(&self) -> BoxStream<'_, Result<IndexRow>>;
}
