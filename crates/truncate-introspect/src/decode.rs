use truncate_core::{DeleteAction, Error, IndexDescriptor, Result, TableDescriptor};

use crate::source::{IndexRow, TableRow};

/// Decode a raw table row into a descriptor.
///
/// A missing parent forces [`DeleteAction::Undefined`], whatever the catalog
/// reports for the action. Referencing tables are sorted and deduplicated.
pub fn decode_table_row(row: TableRow) -> Result<TableDescriptor> {
    let name = required_name(row.name, "table name")?;
    let parent_name = optional_name(row.parent_name);
    let parent_on_delete_action = match parent_name {
        Some(_) => DeleteAction::from_catalog(row.on_delete_action.as_deref()),
        None => DeleteAction::Undefined,
    };

    let mut referenced_by = row.referenced_by.unwrap_or_default();
    if referenced_by.iter().any(|referencing| referencing.is_empty()) {
        return Err(Error::Decode(format!(
            "empty referencing table name for {name}"
        )));
    }
    referenced_by.sort();
    referenced_by.dedup();

    Ok(TableDescriptor {
        name,
        parent_name,
        parent_on_delete_action,
        referenced_by,
    })
}

pub fn decode_index_row(row: IndexRow) -> Result<IndexDescriptor> {
    let name = required_name(row.name, "index name")?;
    if row.base_table_name.is_empty() {
        return Err(Error::Decode(format!(
            "catalog returned an empty base table name for index {name}"
        )));
    }

    Ok(IndexDescriptor {
        name,
        base_table_name: row.base_table_name,
        parent_table_name: optional_name(row.parent_table_name),
    })
}

fn required_name(value: String, what: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::Decode(format!("catalog returned an empty {what}")));
    }
    Ok(value)
}

// The catalog reports "not interleaved" as NULL in some views and '' in others.
fn optional_name(value: Option<String>) -> Option<String> {
    value.filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, parent: Option<&str>, action: Option<&str>) -> TableRow {
        TableRow {
            name: name.to_string(),
            parent_name: parent.map(str::to_string),
            on_delete_action: action.map(str::to_string),
            referenced_by: None,
        }
    }

    #[test]
    fn root_table_has_no_parent_and_undefined_action() {
        let table = decode_table_row(row("Singers", None, None)).unwrap();
        assert_eq!(table.parent_name, None);
        assert_eq!(table.parent_on_delete_action, DeleteAction::Undefined);
        assert!(table.referenced_by.is_empty());
    }

    #[test]
    fn action_without_parent_is_undefined() {
        let table = decode_table_row(row("Singers", None, Some("CASCADE"))).unwrap();
        assert_eq!(table.parent_on_delete_action, DeleteAction::Undefined);
    }

    #[test]
    fn decodes_parent_actions() {
        let cascade = decode_table_row(row("Albums", Some("Singers"), Some("CASCADE"))).unwrap();
        assert_eq!(cascade.parent_name.as_deref(), Some("Singers"));
        assert_eq!(cascade.parent_on_delete_action, DeleteAction::CascadeDelete);

        let no_action =
            decode_table_row(row("Albums", Some("Singers"), Some("NO ACTION"))).unwrap();
        assert_eq!(no_action.parent_on_delete_action, DeleteAction::NoAction);

        let unknown = decode_table_row(row("Albums", Some("Singers"), Some("RESTRICT"))).unwrap();
        assert_eq!(unknown.parent_on_delete_action, DeleteAction::Undefined);

        let absent = decode_table_row(row("Albums", Some("Singers"), None)).unwrap();
        assert_eq!(absent.parent_on_delete_action, DeleteAction::Undefined);
    }

    #[test]
    fn empty_parent_means_root() {
        let table = decode_table_row(row("Singers", Some(""), Some("CASCADE"))).unwrap();
        assert_eq!(table.parent_name, None);
        assert_eq!(table.parent_on_delete_action, DeleteAction::Undefined);
    }

    #[test]
    fn referencing_tables_are_sorted_and_distinct() {
        let mut raw = row("Singers", None, None);
        raw.referenced_by = Some(vec![
            "Tickets".to_string(),
            "Concerts".to_string(),
            "Tickets".to_string(),
        ]);
        let table = decode_table_row(raw).unwrap();
        assert_eq!(table.referenced_by, vec!["Concerts", "Tickets"]);
    }

    #[test]
    fn self_reference_is_kept() {
        let mut raw = row("Employees", None, None);
        raw.referenced_by = Some(vec!["Employees".to_string()]);
        let table = decode_table_row(raw).unwrap();
        assert_eq!(table.referenced_by, vec!["Employees"]);
    }

    #[test]
    fn empty_names_fail_to_decode() {
        assert!(matches!(
            decode_table_row(row("", None, None)),
            Err(Error::Decode(_))
        ));

        let mut raw = row("Singers", None, None);
        raw.referenced_by = Some(vec![String::new()]);
        assert!(matches!(decode_table_row(raw), Err(Error::Decode(_))));

        let index = IndexRow {
            name: "SingersByName".to_string(),
            base_table_name: String::new(),
            parent_table_name: None,
        };
        match decode_index_row(index) {
            Err(Error::Decode(message)) => assert!(message.contains("SingersByName")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn index_parent_is_optional() {
        let global = decode_index_row(IndexRow {
            name: "SingersByName".to_string(),
            base_table_name: "Singers".to_string(),
            parent_table_name: Some(String::new()),
        })
        .unwrap();
        assert!(global.is_global());

        let local = decode_index_row(IndexRow {
            name: "AlbumsByTitle".to_string(),
            base_table_name: "Albums".to_string(),
            parent_table_name: Some("Singers".to_string()),
        })
        .unwrap();
        assert_eq!(local.parent_table_name.as_deref(), Some("Singers"));
    }
}
