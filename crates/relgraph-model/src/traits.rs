//! Collaborator traits: where metadata and entity data come from.

use async_trait::async_trait;

use crate::descriptor::EntityDescriptor;
use crate::error::ModelError;
use crate::instance::{EntityInstance, PropertyValue};

/// Enumerates the entity types of a relational model.
///
/// Implementations must return entities in the same order on every call
/// within one process, so generated fields attach deterministically.
pub trait MetadataProvider: Send + Sync {
    /// Returns every entity type of the model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MetadataUnavailable` if the types cannot be
    /// enumerated.
    fn entity_types(&self) -> Result<Vec<EntityDescriptor>, ModelError>;
}

/// Reads entity data at query time.
///
/// Entity types may be addressed by fully qualified name (`API.Entity.Review`)
/// or by short name (`Review`); the generated resolvers pass the fully
/// qualified name. Implementations must be thread-safe; resolvers call them
/// concurrently.
///
/// # Example
///
/// ```ignore
/// use relgraph_model::{ModelError, PropertyValue, RuntimeAccessor};
///
/// async fn author_name(accessor: &dyn RuntimeAccessor) -> Result<Option<String>, ModelError> {
///     let Some(review) = accessor.find_by_id("Review", 1).await? else {
///         return Ok(None);
///     };
///     let author = accessor.get_property(&review, "Author").await?;
///     Ok(match author {
///         PropertyValue::Entity(user) => user.get("Username").and_then(|v| v.as_str()).map(String::from),
///         _ => None,
///     })
/// }
/// ```
#[async_trait]
pub trait RuntimeAccessor: Send + Sync {
    /// Fetches a single entity by primary key.
    ///
    /// Returns `None` if no row matches.
    async fn find_by_id(&self, entity: &str, id: i64)
    -> Result<Option<EntityInstance>, ModelError>;

    /// Fetches every entity of a type, in the store's order.
    async fn find_all(&self, entity: &str) -> Result<Vec<EntityInstance>, ModelError>;

    /// Reads a named property or navigation off an instance.
    ///
    /// The default implementation only sees values carried by the instance.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MissingProperty` if the instance has no such
    /// property.
    async fn get_property(
        &self,
        instance: &EntityInstance,
        property: &str,
    ) -> Result<PropertyValue, ModelError> {
        instance
            .get(property)
            .cloned()
            .ok_or_else(|| ModelError::missing_property(instance.entity(), property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    struct FixedAccessor;

    #[async_trait]
    impl RuntimeAccessor for FixedAccessor {
        async fn find_by_id(
            &self,
            _entity: &str,
            _id: i64,
        ) -> Result<Option<EntityInstance>, ModelError> {
            Ok(None)
        }

        async fn find_all(&self, _entity: &str) -> Result<Vec<EntityInstance>, ModelError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_get_property_reads_instance() {
        let review = EntityInstance::new("API.Entity.Review")
            .with("Id", 1)
            .with("Author", EntityInstance::new("User").with("Id", 4));

        let author = block_on(FixedAccessor.get_property(&review, "Author")).unwrap();
        assert!(matches!(author, PropertyValue::Entity(user) if user.int("Id") == Some(4)));

        let err = block_on(FixedAccessor.get_property(&review, "Content")).unwrap_err();
        assert!(err.is_missing_property());
        assert_eq!(
            err.to_string(),
            "The property: Content does not exist on parent type: Review"
        );
    }
}
