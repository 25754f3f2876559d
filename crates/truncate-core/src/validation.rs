use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::{IndexDescriptor, TableDescriptor};

/// Validate that table and index metadata describe one schema.
///
/// Intended for unfiltered discovery results. This checks:
/// - duplicate table and index names
/// - interleaving parents name a discovered table
/// - index base tables and index parents name a discovered table
///
/// A failure on results that came from two separate discovery calls usually
/// means the schema changed between the two reads.
pub fn validate_relationships(tables: &[TableDescriptor], indexes: &[IndexDescriptor]) -> Result<()> {
    let mut names = BTreeSet::new();
    for table in tables {
        if !names.insert(table.name.as_str()) {
            return Err(Error::Inconsistent(format!(
                "duplicate table name: {}",
                table.name
            )));
        }
    }

    for table in tables {
        if let Some(parent) = &table.parent_name {
            if !names.contains(parent.as_str()) {
                return Err(Error::Inconsistent(format!(
                    "parent table not found: {} is interleaved in {}",
                    table.name, parent
                )));
            }
        }
    }

    let mut index_names = BTreeSet::new();
    for index in indexes {
        if !index_names.insert(index.name.as_str()) {
            return Err(Error::Inconsistent(format!(
                "duplicate index name: {}",
                index.name
            )));
        }

        if !names.contains(index.base_table_name.as_str()) {
            return Err(Error::Inconsistent(format!(
                "index base table not found: {} is defined on {}",
                index.name, index.base_table_name
            )));
        }

        if let Some(parent) = &index.parent_table_name {
            if !names.contains(parent.as_str()) {
                return Err(Error::Inconsistent(format!(
                    "index parent table not found: {} is interleaved in {}",
                    index.name, parent
                )));
            }
        }
    }

    Ok(())
}
