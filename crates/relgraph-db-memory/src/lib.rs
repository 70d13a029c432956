//! In-memory runtime accessor for relgraph.
//!
//! This crate provides an in-memory implementation of the `RuntimeAccessor`
//! trait from `relgraph-model`. It is used by the CLI and by tests, and
//! doubles as a reference for how navigations are loaded through foreign keys.
//!
//! # Example
//!
//! ```ignore
//! use relgraph_model::{ModelCatalog, RuntimeAccessor};
//!
//! let catalog = ModelCatalog::load("model.toml")?;
//! let store = relgraph_db_memory::create_accessor(catalog.entities().to_vec());
//! store.seed_json_str(r#"{"User": [{"Id": 1, "Username": "alice"}]}"#).await?;
//!
//! let alice = store.find_by_id("User", 1).await?;
//! ```

mod storage;

pub use storage::InMemoryStore;

// Re-export the accessor trait for convenience
pub use relgraph_model::{ModelError, RuntimeAccessor};

/// Creates a shareable in-memory accessor for the given entity types.
pub fn create_accessor(
    entities: impl IntoIterator<Item = relgraph_model::EntityDescriptor>,
) -> std::sync::Arc<InMemoryStore> {
    std::sync::Arc::new(InMemoryStore::new(entities))
}
