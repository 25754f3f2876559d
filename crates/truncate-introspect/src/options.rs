use std::time::Duration;

/// Catalog schema whose tables and indexes are discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogScope {
    /// `information_schema` schema name; `public` is the default schema of
    /// a PostgreSQL-dialect database.
    pub schema: String,
}

impl Default for CatalogScope {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
        }
    }
}

/// Options used when opening a catalog connection pool.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub scope: CatalogScope,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            scope: CatalogScope::default(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}
