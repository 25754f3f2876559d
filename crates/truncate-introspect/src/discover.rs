use std::collections::HashSet;

use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, info, warn};

use truncate_core::{Error, IndexDescriptor, Result, TableDescriptor, TableSelection};

use crate::context::DiscoveryContext;
use crate::decode::{decode_index_row, decode_table_row};
use crate::source::CatalogSource;

/// Discover the selected base tables with their interleaving and
/// foreign-key relationships.
///
/// Tables are returned in the order the catalog streams them, ascending by
/// name. Any fetch or decode error, cancellation or elapsed deadline fails
/// the whole call; a partial list is never returned.
pub async fn discover_tables<S>(
    ctx: &DiscoveryContext,
    source: &S,
    selection: &TableSelection,
) -> Result<Vec<TableDescriptor>>
where
    S: CatalogSource + ?Sized,
{
    info!(
        event = "discovery_started",
        kind = "tables",
        engine = source.engine(),
        selects_all = selection.selects_all()
    );

    let mut seen = HashSet::new();
    let result = collect_rows(ctx, source.table_rows(), |row| {
        let table = decode_table_row(row)?;
        if !seen.insert(table.name.clone()) {
            return Err(Error::Decode(format!(
                "table {} returned more than once",
                table.name
            )));
        }
        if !selection.is_selected(&table.name) {
            debug!(event = "table_skipped", table = %table.name);
            return Ok(None);
        }
        Ok(Some(table))
    })
    .await;

    log_outcome("tables", source.engine(), &result);
    result
}

/// Discover every secondary index of the scoped schema.
///
/// No table selection is applied; see [`truncate_core::retain_selected_indexes`].
pub async fn discover_indexes<S>(ctx: &DiscoveryContext, source: &S) -> Result<Vec<IndexDescriptor>>
where
    S: CatalogSource + ?Sized,
{
    info!(
        event = "discovery_started",
        kind = "indexes",
        engine = source.engine()
    );

    let result = collect_rows(ctx, source.index_rows(), |row| decode_index_row(row).map(Some)).await;

    log_outcome("indexes", source.engine(), &result);
    result
}

async fn collect_rows<R, T, F>(
    ctx: &DiscoveryContext,
    mut rows: BoxStream<'_, Result<R>>,
    mut decode: F,
) -> Result<Vec<T>>
where
    F: FnMut(R) -> Result<Option<T>>,
{
    ctx.check()?;

    let done = ctx.done();
    tokio::pin!(done);

    let mut collected = Vec::new();
    loop {
        // Dropping `rows` on an early return abandons the in-flight read.
        let next = tokio::select! {
            biased;
            reason = &mut done => return Err(reason),
            next = rows.next() => next,
        };

        let Some(row) = next else {
            break;
        };
        if let Some(item) = decode(row?)? {
            collected.push(item);
        }
    }

    Ok(collected)
}

fn log_outcome<T>(kind: &'static str, engine: &'static str, result: &Result<Vec<T>>) {
    match result {
        Ok(items) => info!(
            event = "discovery_finished",
            kind,
            engine,
            count = items.len()
        ),
        Err(err) => warn!(event = "discovery_failed", kind, engine, error = %err),
    }
}
