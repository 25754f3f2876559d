use futures::stream::{BoxStream, StreamExt};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use truncate_core::{Error, Result};

use crate::options::CatalogScope;
use crate::source::{IndexRow, TableRow};

// Foreign keys are aggregated per referenced table so each base table row
// carries the tables that must be emptied before it.
const LIST_TABLES: &str = r#"
    with fk_references as (
      select
        ccu.table_name as referenced,
        array_agg(tc.table_name) as referencing
      from information_schema.table_constraints as tc
      join information_schema.constraint_column_usage as ccu
        on tc.constraint_name = ccu.constraint_name
      where tc.table_schema = $1
        and tc.constraint_type = 'FOREIGN KEY'
        and ccu.table_schema = $1
      group by ccu.table_name
    )
    select
      t.table_name as name,
      t.parent_table_name as parent_name,
      t.on_delete_action as on_delete_action,
      f.referencing as referenced_by
    from information_schema.tables as t
    left join fk_references as f on t.table_name = f.referenced
    where t.table_schema = $1
      and t.table_type = 'BASE TABLE'
    order by t.table_name
"#;

const LIST_INDEXES: &str = r#"
    select
      index_name as name,
      table_name as base_table_name,
      parent_table_name
    from information_schema.indexes
    where table_schema = $1
      and index_type = 'INDEX'
"#;

pub fn table_rows<'a>(pool: &'a PgPool, scope: &'a CatalogScope) -> BoxStream<'a, Result<TableRow>> {
    sqlx::query(LIST_TABLES)
        .bind(scope.schema.as_str())
        .fetch(pool)
        .map(|row| match row {
            Ok(row) => map_table_row(&row),
            Err(err) => Err(Error::Fetch(err.to_string())),
        })
        .boxed()
}

pub fn index_rows<'a>(pool: &'a PgPool, scope: &'a CatalogScope) -> BoxStream<'a, Result<IndexRow>> {
    sqlx::query(LIST_INDEXES)
        .bind(scope.schema.as_str())
        .fetch(pool)
        .map(|row| match row {
            Ok(row) => map_index_row(&row),
            Err(err) => Err(Error::Fetch(err.to_string())),
        })
        .boxed()
}

fn map_table_row(row: &PgRow) -> Result<TableRow> {
    Ok(TableRow {
        name: column(row, "name")?,
        parent_name: column(row, "parent_name")?,
        on_delete_action: column(row, "on_delete_action")?,
        referenced_by: column(row, "referenced_by")?,
    })
}

fn map_index_row(row: &PgRow) -> Result<IndexRow> {
    Ok(IndexRow {
        name: column(row, "name")?,
        base_table_name: column(row, "base_table_name")?,
        parent_table_name: column(row, "parent_table_name")?,
    })
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|err| Error::Decode(format!("column {name}: {err}")))
}
