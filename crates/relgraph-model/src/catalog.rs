//! In-memory metadata provider.
//!
//! `ModelCatalog` holds the entity descriptors of a model, either built in
//! code or loaded from a TOML/JSON model file:
//!
//! ```toml
//! [[entity]]
//! name = "API.Entity.Review"
//!
//! [[entity.property]]
//! name = "Id"
//! type = "int"
//!
//! [[entity.navigation]]
//! name = "Author"
//! target = "API.Entity.User"
//! cardinality = "to-one"
//! foreign_key = "AuthorId"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{EntityDescriptor, short_name};
use crate::error::ModelError;
use crate::traits::MetadataProvider;

/// Metadata provider backed by a list of descriptors held in memory.
///
/// Entities keep the order in which they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default, rename = "entity")]
    entities: Vec<EntityDescriptor>,
}

impl ModelCatalog {
    /// Creates a catalog from descriptors.
    #[must_use]
    pub fn new(entities: Vec<EntityDescriptor>) -> Self {
        Self { entities }
    }

    /// Adds an entity and returns the catalog.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }

    /// Parses a TOML model definition.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` if the document does not parse.
    pub fn from_toml_str(source: &str) -> Result<Self, ModelError> {
        toml::from_str(source)
            .map_err(|e| ModelError::invalid_model(format!("failed to parse TOML model: {e}")))
    }

    /// Parses a JSON model definition (`{"entity": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` if the document does not parse.
    pub fn from_json_str(source: &str) -> Result<Self, ModelError> {
        serde_json::from_str(source)
            .map_err(|e| ModelError::invalid_model(format!("failed to parse JSON model: {e}")))
    }

    /// Loads a model file, choosing the format from its extension.
    ///
    /// Files ending in `.json` are read as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ModelError::invalid_model(format!("failed to read {}: {e}", path.display()))
        })?;

        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source)?,
            _ => Self::from_toml_str(&source)?,
        };

        debug!(
            path = %path.display(),
            entity_count = catalog.entities.len(),
            "Loaded model catalog"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// Finds an entity by fully qualified or short name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .or_else(|| {
                let short = short_name(name);
                self.entities.iter().find(|e| e.short_name() == short)
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl MetadataProvider for ModelCatalog {
    fn entity_types(&self) -> Result<Vec<EntityDescriptor>, ModelError> {
        if self.entities.is_empty() {
            return Err(ModelError::metadata_unavailable(
                "no entity types registered",
            ));
        }
        Ok(self.entities.clone())
    }
}
