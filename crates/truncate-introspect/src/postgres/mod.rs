use futures::stream::BoxStream;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use truncate_core::{redact_connection_string, Error, Result};

use crate::options::{CatalogScope, ConnectOptions};
use crate::source::{CatalogSource, IndexRow, TableRow};

mod queries;

/// Catalog source for Cloud Spanner databases reached through the
/// PostgreSQL interface.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
    scope: CatalogScope,
}

impl PostgresCatalog {
    /// Create a source using a pre-configured pool and the default scope.
    pub fn new(pool: PgPool) -> Self {
        Self::with_scope(pool, CatalogScope::default())
    }

    pub fn with_scope(pool: PgPool, scope: CatalogScope) -> Self {
        Self { pool, scope }
    }

    /// Open a pool for `url` and wrap it in a source.
    pub async fn connect(url: &str, opts: &ConnectOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(opts.max_connections)
            .acquire_timeout(opts.acquire_timeout)
            .connect(url)
            .await
            .map_err(|err| Error::Fetch(err.to_string()))?;

        tracing::info!(
            event = "catalog_connected",
            connection = %redact_connection_string(url),
            schema = %opts.scope.schema
        );

        Ok(Self::with_scope(pool, opts.scope.clone()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CatalogSource for PostgresCatalog {
    fn engine(&self) -> &'static str {
        "spanner-pg"
    }

    fn table_rows(&self) -> BoxStream<'_, Result<TableRow>> {
        queries::table_rows(&self.pool, &self.scope)
    }

    fn index_rows(&self) -> BoxStream<'_, Result<IndexRow>> {
        queries::index_rows(&self.pool, &self.scope)
    }
}
