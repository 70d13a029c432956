//! CLI configuration.
//!
//! Read from `relgraph.toml` (or `--config`) with `RELGRAPH__*` environment
//! overrides, e.g. `RELGRAPH__GRAPHQL__MAX_DEPTH=8`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use relgraph_graphql::GraphQLConfig;
use serde::Deserialize;
use tracing::debug;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "relgraph.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub graphql: GraphQLConfig,
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder();
    match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            builder = builder.add_source(File::from(p.to_path_buf()));
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                builder = builder.add_source(File::from(default_path));
            }
        }
    }
    // Environment variable overrides, e.g., RELGRAPH__GRAPHQL__INTROSPECTION=false
    builder = builder.add_source(
        Environment::with_prefix("RELGRAPH")
            .try_parsing(true)
            .separator("__"),
    );

    let merged: AppConfig = builder
        .build()
        .context("config build error")?
        .try_deserialize()
        .context("config deserialize error")?;
    merged
        .graphql
        .validate()
        .map_err(|e| anyhow::anyhow!(e))?;

    debug!(graphql = ?merged.graphql, "Loaded configuration");
    Ok(merged)
}
