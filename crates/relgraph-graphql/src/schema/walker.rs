//! Metadata walker.
//!
//! Takes one snapshot of the provider's entity types per build and answers
//! the builder's questions about them. Navigation targets are resolved up
//! front so that an unknown target aborts the build before any type is built.

use std::collections::HashMap;

use relgraph_model::{
    EntityDescriptor, MetadataProvider, ModelError, NavigationDescriptor, ScalarPropertyDescriptor,
    short_name,
};
use tracing::debug;

use crate::error::GraphQLError;

/// A navigation together with its resolved target entity.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedNavigation<'a> {
    pub descriptor: &'a NavigationDescriptor,
    pub target: &'a EntityDescriptor,
}

/// Read-only view over the entity types of one build.
#[derive(Debug)]
pub struct MetadataWalker {
    entities: Vec<EntityDescriptor>,
    /// Fully qualified name to index.
    by_name: HashMap<String, usize>,
    /// Short name to index; the last entity with a given short name wins.
    by_short_name: HashMap<String, usize>,
}

impl MetadataWalker {
    /// Snapshots the provider's entity types.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::MetadataUnavailable` if the provider fails or
    /// enumerates no types, and `GraphQLError::UnknownRelationTarget` if a
    /// navigation targets an entity that was not enumerated.
    pub fn new(provider: &dyn MetadataProvider) -> Result<Self, GraphQLError> {
        let entities = provider.entity_types().map_err(|e| match e {
            ModelError::MetadataUnavailable { message } => GraphQLError::MetadataUnavailable(message),
            other => GraphQLError::MetadataUnavailable(other.to_string()),
        })?;
        if entities.is_empty() {
            return Err(GraphQLError::MetadataUnavailable(
                "provider enumerated no entity types".into(),
            ));
        }

        let mut by_name = HashMap::with_capacity(entities.len());
        let mut by_short_name = HashMap::with_capacity(entities.len());
        for (index, entity) in entities.iter().enumerate() {
            by_name.insert(entity.name.clone(), index);
            by_short_name.insert(entity.short_name().to_string(), index);
        }

        let walker = Self {
            entities,
            by_name,
            by_short_name,
        };

        for entity in &walker.entities {
            for navigation in &entity.navigations {
                if walker.lookup(&navigation.target).is_none() {
                    return Err(GraphQLError::UnknownRelationTarget {
                        entity: entity.name.clone(),
                        navigation: navigation.name.clone(),
                        target: navigation.target.clone(),
                    });
                }
            }
        }

        debug!(entity_count = walker.entities.len(), "Walked relational metadata");
        Ok(walker)
    }

    /// Entity types in provider order.
    #[must_use]
    pub fn entity_types(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// Scalar properties of an entity in declaration order.
    #[must_use]
    pub fn scalar_properties<'a>(
        &self,
        entity: &'a EntityDescriptor,
    ) -> &'a [ScalarPropertyDescriptor] {
        &entity.properties
    }

    /// Navigations of an entity in declaration order, with resolved targets.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::UnknownRelationTarget` for a target outside this
    /// snapshot, which can only happen for descriptors not taken from it.
    pub fn navigations<'a>(
        &'a self,
        entity: &'a EntityDescriptor,
    ) -> Result<Vec<ResolvedNavigation<'a>>, GraphQLError> {
        entity
            .navigations
            .iter()
            .map(|descriptor| {
                self.lookup(&descriptor.target)
                    .map(|target| ResolvedNavigation { descriptor, target })
                    .ok_or_else(|| GraphQLError::UnknownRelationTarget {
                        entity: entity.name.clone(),
                        navigation: descriptor.name.clone(),
                        target: descriptor.target.clone(),
                    })
            })
            .collect()
    }

    /// Finds an entity by fully qualified name, then by short name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&EntityDescriptor> {
        self.by_name
            .get(name)
            .or_else(|| self.by_short_name.get(short_name(name)))
            .map(|&index| &self.entities[index])
    }
}
