use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::validate_relationships;

/// What deleting a parent row does to the interleaved child rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteAction {
    /// No parent, or the catalog did not report an action.
    #[default]
    Undefined,
    /// Child rows are removed together with the parent row.
    CascadeDelete,
    /// Deleting a parent row with children is rejected.
    NoAction,
}

impl DeleteAction {
    /// Map the catalog's `ON_DELETE_ACTION` text onto the model.
    ///
    /// Unrecognized text decodes to [`DeleteAction::Undefined`] rather than failing.
    pub fn from_catalog(value: Option<&str>) -> Self {
        match value {
            Some("CASCADE") => DeleteAction::CascadeDelete,
            Some("NO ACTION") => DeleteAction::NoAction,
            _ => DeleteAction::Undefined,
        }
    }
}

/// Hierarchy and foreign-key relationships of one base table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableDescriptor {
    pub name: String,
    /// Table this one is interleaved in; `None` for a root table.
    pub parent_name: Option<String>,
    pub parent_on_delete_action: DeleteAction,
    /// Tables holding a foreign key that targets this table, sorted and distinct.
    ///
    /// Rows of these tables must be removed before this table can be emptied.
    pub referenced_by: Vec<String>,
}

impl TableDescriptor {
    pub fn is_root(&self) -> bool {
        self.parent_name.is_none()
    }

    /// Whether deleting rows of the parent table also removes rows of this table.
    pub fn cascades_from_parent(&self) -> bool {
        self.parent_name.is_some() && self.parent_on_delete_action == DeleteAction::CascadeDelete
    }
}

/// A secondary index and the tables it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexDescriptor {
    pub name: String,
    pub base_table_name: String,
    /// Table the index is interleaved in; `None` for a global index.
    pub parent_table_name: Option<String>,
}

impl IndexDescriptor {
    pub fn is_global(&self) -> bool {
        self.parent_table_name.is_none()
    }
}

/// Result of table and index discovery held together by the caller.
///
/// The two collections come from independent snapshot reads; use
/// [`SchemaRelationships::validate`] to detect a schema change between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SchemaRelationships {
    pub tables: Vec<TableDescriptor>,
    pub indexes: Vec<IndexDescriptor>,
}

impl SchemaRelationships {
    pub fn new(tables: Vec<TableDescriptor>, indexes: Vec<IndexDescriptor>) -> Self {
        Self { tables, indexes }
    }

    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Tables interleaved directly in `parent`.
    pub fn children<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a TableDescriptor> + 'a {
        self.tables
            .iter()
            .filter(move |table| table.parent_name.as_deref() == Some(parent))
    }

    /// Indexes defined on `table`, global and interleaved alike.
    pub fn indexes_on<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a IndexDescriptor> + 'a {
        self.indexes
            .iter()
            .filter(move |index| index.base_table_name == table)
    }

    pub fn validate(&self) -> Result<()> {
        validate_relationships(&self.tables, &self.indexes)
    }
}

/// Keep the indexes whose base table is part of a table-discovery result.
///
/// Index discovery does not apply table selection; callers intersect with
/// the selected tables through this helper.
pub fn retain_selected_indexes(
    indexes: Vec<IndexDescriptor>,
    tables: &[TableDescriptor],
) -> Vec<IndexDescriptor> {
    let selected: BTreeSet<&str> = tables.iter().map(|table| table.name.as_str()).collect();
    indexes
        .into_iter()
        .filter(|index| selected.contains(index.base_table_name.as_str()))
        .collect()
}
