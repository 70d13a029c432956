use std::path::Path;

use anyhow::{Context, Result};
use relgraph_model::DynAccessor;
use serde_json::Value;
use tracing::info;

use super::{load_model, schema_builder};
use crate::config::AppConfig;
use crate::output::print_json;

pub async fn execute(
    model: &Path,
    data: Option<&Path>,
    query: &str,
    config: &AppConfig,
) -> Result<()> {
    let response = run_query(model, data, query, config).await?;
    print_json(&response)?;

    let error_count = response
        .get("errors")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if error_count > 0 {
        anyhow::bail!("query returned {error_count} error(s)");
    }
    Ok(())
}

/// Builds the schema over a seeded in-memory store and runs one query.
///
/// Returns the serialized GraphQL response.
pub async fn run_query(
    model: &Path,
    data: Option<&Path>,
    query: &str,
    config: &AppConfig,
) -> Result<Value> {
    let catalog = load_model(model)?;
    let store = relgraph_db_memory::create_accessor(catalog.entities().to_vec());

    if let Some(path) = data {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed data {}", path.display()))?;
        let rows = store
            .seed_json_str(&source)
            .await
            .with_context(|| format!("failed to seed {}", path.display()))?;
        info!(rows, "Seeded in-memory store");
    }

    let accessor: DynAccessor = store;
    let schema = schema_builder(catalog, config)
        .with_accessor(accessor)
        .build()?;

    let response = schema.execute(async_graphql::Request::new(query)).await;
    Ok(serde_json::to_value(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MODEL: &str = r#"
        [[entity]]
        name = "API.Entity.User"

        [[entity.property]]
        name = "Id"
        type = "int"

        [[entity.property]]
        name = "Username"
        type = "string"

        [[entity]]
        name = "API.Entity.Review"

        [[entity.property]]
        name = "Id"
        type = "int"

        [[entity.property]]
        name = "AuthorId"
        type = "int?"

        [[entity.navigation]]
        name = "Author"
        target = "API.Entity.User"
        cardinality = "to-one"
        foreign_key = "AuthorId"
    "#;

    const SEED: &str = r#"{
        "User": [{"Id": 1, "Username": "alice"}],
        "Review": [{"Id": 7, "AuthorId": 1}]
    }"#;

    #[tokio::test]
    async fn test_run_query_against_seed_data() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.toml");
        let data = dir.path().join("seed.json");
        std::fs::write(&model, MODEL).unwrap();
        std::fs::write(&data, SEED).unwrap();

        let response = run_query(
            &model,
            Some(&data),
            "{ Review(id: 7) { Id Author { Username } } }",
            &AppConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            response["data"],
            json!({ "Review": { "Id": 7, "Author": { "Username": "alice" } } })
        );
    }

    #[tokio::test]
    async fn test_run_query_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.toml");
        std::fs::write(&model, MODEL).unwrap();

        let response = run_query(&model, None, "{ Users { Id } }", &AppConfig::default())
            .await
            .unwrap();
        assert_eq!(response["data"], json!({ "Users": [] }));
    }

    #[tokio::test]
    async fn test_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_query(
            &dir.path().join("absent.toml"),
            None,
            "{ Users { Id } }",
            &AppConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("failed to load model"));
    }
}
