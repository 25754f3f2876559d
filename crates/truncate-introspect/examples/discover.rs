use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use truncate_core::{retain_selected_indexes, SchemaRelationships};
use truncate_introspect::{
    discover_indexes, discover_tables, ConnectOptions, DiscoveryContext, PostgresCatalog,
    TableSelection,
};

fn name_list(var: &str) -> Vec<String> {
    env::var(var)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let db_url = env::var("DATABASE_URL").context("set DATABASE_URL")?;
    let selection = TableSelection::new(name_list("TRUNCATE_INCLUDE"), name_list("TRUNCATE_EXCLUDE"));

    let catalog = PostgresCatalog::connect(&db_url, &ConnectOptions::default())
        .await
        .context("failed to connect to the catalog")?;

    let ctx = DiscoveryContext::background().with_timeout(Duration::from_secs(30));
    let (tables, indexes) = tokio::try_join!(
        discover_tables(&ctx, &catalog, &selection),
        discover_indexes(&ctx, &catalog),
    )?;

    let indexes = retain_selected_indexes(indexes, &tables);
    let snapshot = SchemaRelationships::new(tables, indexes);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
