//! In-memory catalog source shared by the discovery tests.
//!
//! Serves rows from a mutable catalog state the way the store would: tables
//! ordered by name, each call reading a copy of the state taken when the
//! stream is created. Failures and stalls can be injected after a number of
//! rows to exercise error propagation and cancellation.

#![allow(dead_code)]

use std::sync::{PoisonError, RwLock};

use futures::stream::{self, BoxStream, StreamExt};
use truncate_core::{Error, Result};
use truncate_introspect::{CatalogSource, IndexRow, TableRow};

/// Catalog contents served by [`MemoryCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub tables: Vec<TableRow>,
    pub indexes: Vec<IndexRow>,
}

/// What a stream does once it has yielded the configured number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Yield a fetch error and end the stream.
    FailAfter(usize),
    /// Never yield another row.
    StallAfter(usize),
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
    table_fault: Option<Fault>,
    index_fault: Option<Fault>,
}

impl MemoryCatalog {
    pub fn new(state: CatalogState) -> Self {
        Self {
            state: RwLock::new(state),
            table_fault: None,
            index_fault: None,
        }
    }

    pub fn with_table(self, row: TableRow) -> Self {
        self.alter(|state| state.tables.push(row));
        self
    }

    pub fn with_index(self, row: IndexRow) -> Self {
        self.alter(|state| state.indexes.push(row));
        self
    }

    pub fn with_table_fault(mut self, fault: Fault) -> Self {
        self.table_fault = Some(fault);
        self
    }

    pub fn with_index_fault(mut self, fault: Fault) -> Self {
        self.index_fault = Some(fault);
        self
    }

    /// Change the catalog in place, as a schema migration would.
    ///
    /// Streams created before the change keep serving the old contents.
    pub fn alter<F>(&self, change: F)
    where
        F: FnOnce(&mut CatalogState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut state);
    }

    fn snapshot(&self) -> CatalogState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CatalogSource for MemoryCatalog {
    fn engine(&self) -> &'static str {
        "memory"
    }

    fn table_rows(&self) -> BoxStream<'_, Result<TableRow>> {
        let mut tables = self.snapshot().tables;
        tables.sort_by(|left, right| left.name.cmp(&right.name));
        serve(tables, self.table_fault)
    }

    fn index_rows(&self) -> BoxStream<'_, Result<IndexRow>> {
        serve(self.snapshot().indexes, self.index_fault)
    }
}

fn serve<T>(rows: Vec<T>, fault: Option<Fault>) -> BoxStream<'static, Result<T>>
where
    T: Send + 'static,
{
    let Some(fault) = fault else {
        return stream::iter(rows.into_iter().map(Ok)).boxed();
    };

    match fault {
        Fault::FailAfter(count) => {
            let served = rows.into_iter().take(count).map(Ok);
            let failure = Error::Fetch(format!("catalog stream failed after {count} rows"));
            stream::iter(served)
                .chain(stream::once(async move { Err(failure) }))
                .boxed()
        }
        Fault::StallAfter(count) => {
            let served = rows.into_iter().take(count).map(Ok);
            stream::iter(served).chain(stream::pending()).boxed()
        }
    }
}
