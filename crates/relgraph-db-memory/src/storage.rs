use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use relgraph_model::{
    Cardinality, EntityDescriptor, EntityInstance, ModelError, ModelResult,
    NavigationDescriptor, PropertyValue, RuntimeAccessor, short_name,
};
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// Rows of one entity type keyed by primary key, in insertion order.
type Table = IndexMap<i64, EntityInstance>;

/// In-memory runtime accessor.
///
/// Rows are kept per entity type in insertion order, so `find_all` returns
/// entities in the order they were inserted. Navigations that an instance
/// does not carry are loaded lazily through the navigation's foreign key:
///
/// - to-one: the key value on the parent selects a target row by primary key
/// - to-many: target rows whose foreign key equals the parent's primary key
#[derive(Debug)]
pub struct InMemoryStore {
    /// Entity metadata indexed by short name.
    entities: HashMap<String, EntityDescriptor>,
    /// Row storage indexed by short name.
    tables: RwLock<HashMap<String, Table>>,
}

impl InMemoryStore {
    /// Creates an empty store for the given entity types.
    pub fn new(entities: impl IntoIterator<Item = EntityDescriptor>) -> Self {
        let entities: HashMap<String, EntityDescriptor> = entities
            .into_iter()
            .map(|e| (e.short_name().to_string(), e))
            .collect();
        let tables = entities
            .keys()
            .map(|name| (name.clone(), Table::new()))
            .collect();

        Self {
            entities,
            tables: RwLock::new(tables),
        }
    }

    fn descriptor(&self, entity: &str) -> ModelResult<&EntityDescriptor> {
        self.entities
            .get(short_name(entity))
            .ok_or_else(|| ModelError::unknown_entity(entity))
    }

    /// Inserts or replaces a row, keyed by the entity's primary key.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownEntity` for an unregistered entity type and
    /// `ModelError::InvalidModel` if the row has no integer primary key.
    pub async fn insert(&self, instance: EntityInstance) -> ModelResult<()> {
        let descriptor = self.descriptor(instance.entity())?;
        let key = instance.int(&descriptor.key).ok_or_else(|| {
            ModelError::invalid_model(format!(
                "{} row is missing integer key {}",
                instance.entity(),
                descriptor.key
            ))
        })?;

        let mut tables = self.tables.write().await;
        tables
            .entry(descriptor.short_name().to_string())
            .or_default()
            .insert(key, instance);
        Ok(())
    }

    /// Inserts rows from a JSON document mapping entity names to row arrays.
    ///
    /// ```json
    /// { "User": [{ "Id": 1, "Username": "alice" }] }
    /// ```
    ///
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` for malformed documents and
    /// `ModelError::UnknownEntity` for unregistered entity names.
    pub async fn seed_json(&self, document: &JsonValue) -> ModelResult<usize> {
        let JsonValue::Object(by_entity) = document else {
            return Err(ModelError::invalid_model(
                "seed document must be an object of entity arrays",
            ));
        };

        let mut inserted = 0;
        for (entity, rows) in by_entity {
            let JsonValue::Array(rows) = rows else {
                return Err(ModelError::invalid_model(format!(
                    "seed rows for {entity} must be an array"
                )));
            };
            for row in rows {
                self.insert(EntityInstance::from_json(entity, row)?).await?;
                inserted += 1;
            }
        }

        debug!(rows = inserted, "Seeded in-memory store");
        Ok(inserted)
    }

    /// Parses and inserts a JSON seed document.
    ///
    /// # Errors
    ///
    /// See [`InMemoryStore::seed_json`].
    pub async fn seed_json_str(&self, source: &str) -> ModelResult<usize> {
        let document: JsonValue = serde_json::from_str(source)
            .map_err(|e| ModelError::invalid_model(format!("failed to parse seed data: {e}")))?;
        self.seed_json(&document).await
    }

    /// Returns the number of rows stored for an entity type.
    pub async fn count(&self, entity: &str) -> usize {
        self.tables
            .read()
            .await
            .get(short_name(entity))
            .map_or(0, IndexMap::len)
    }

    async fn load_navigation(
        &self,
        parent: &EntityInstance,
        parent_descriptor: &EntityDescriptor,
        navigation: &NavigationDescriptor,
    ) -> ModelResult<PropertyValue> {
        let Some(foreign_key) = navigation.foreign_key.as_deref() else {
            return Err(ModelError::missing_property(parent.entity(), &navigation.name));
        };
        let target = navigation.target_short_name();

        trace!(
            entity = %parent.entity(),
            navigation = %navigation.name,
            target = %target,
            "Loading navigation through foreign key"
        );

        let tables = self.tables.read().await;
        let rows = tables
            .get(target)
            .ok_or_else(|| ModelError::unknown_entity(target))?;

        match navigation.cardinality {
            Cardinality::ToOne => match parent.get(foreign_key) {
                Some(PropertyValue::Int(key)) => Ok(rows.get(key).cloned().into()),
                Some(PropertyValue::Null) => Ok(PropertyValue::Null),
                _ => Err(ModelError::missing_property(parent.entity(), foreign_key)),
            },
            Cardinality::ToMany => {
                let key = parent.int(&parent_descriptor.key).ok_or_else(|| {
                    ModelError::missing_property(parent.entity(), &parent_descriptor.key)
                })?;
                let related = rows
                    .values()
                    .filter(|row| row.int(foreign_key) == Some(key))
                    .cloned()
                    .collect::<Vec<_>>();
                Ok(PropertyValue::Entities(related))
            }
        }
    }
}

#[async_trait]
impl RuntimeAccessor for InMemoryStore {
    async fn find_by_id(&self, entity: &str, id: i64) -> ModelResult<Option<EntityInstance>> {
        let descriptor = self.descriptor(entity)?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(descriptor.short_name())
            .and_then(|rows| rows.get(&id))
            .cloned())
    }

    async fn find_all(&self, entity: &str) -> ModelResult<Vec<EntityInstance>> {
        let descriptor = self.descriptor(entity)?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(descriptor.short_name())
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_property(
        &self,
        instance: &EntityInstance,
        property: &str,
    ) -> ModelResult<PropertyValue> {
        if let Some(value) = instance.get(property) {
            return Ok(value.clone());
        }

        let descriptor = self.descriptor(instance.entity())?;
        match descriptor.navigation(property) {
            Some(navigation) => self.load_navigation(instance, descriptor, navigation).await,
            None => Err(ModelError::missing_property(instance.entity(), property)),
        }
    }
}
