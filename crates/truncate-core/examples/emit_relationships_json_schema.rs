use schemars::schema_for;
use truncate_core::SchemaRelationships;

fn main() {
    let schema = schema_for!(SchemaRelationships);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
