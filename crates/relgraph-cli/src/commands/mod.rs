pub mod query;
pub mod schema;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use relgraph_graphql::RelationalSchemaBuilder;
use relgraph_model::ModelCatalog;

use crate::config::AppConfig;

pub fn load_model(path: &Path) -> Result<ModelCatalog> {
    ModelCatalog::load(path).with_context(|| format!("failed to load model {}", path.display()))
}

pub fn schema_builder(catalog: ModelCatalog, config: &AppConfig) -> RelationalSchemaBuilder {
    RelationalSchemaBuilder::new(Arc::new(catalog), config.graphql.to_schema_builder_config())
}
