//! Type builder.
//!
//! Converts entity metadata into object type definitions. Every definition is
//! registered under the entity's short name as soon as its construction
//! starts, and relation targets are only ever built shallowly, so cyclic
//! relations (`User.Reviews` / `Review.Author`) terminate.

use indexmap::IndexMap;
use relgraph_model::EntityDescriptor;
use tracing::{debug, trace};

use super::accessors::AccessorTable;
use super::definition::{FieldDefinition, FieldResolver, ObjectTypeDefinition};
use super::walker::MetadataWalker;
use crate::error::GraphQLError;

/// Object type definitions of one build, keyed by entity short name.
///
/// Definitions are boxed so each keeps its address while the registry grows.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Box<ObjectTypeDefinition>>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once construction of the named type has started.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectTypeDefinition> {
        self.types.get(name).map(Box::as_ref)
    }

    /// Returns a registered definition.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the type is not registered.
    pub fn require(&self, name: &str) -> Result<&ObjectTypeDefinition, GraphQLError> {
        self.get(name)
            .ok_or_else(|| GraphQLError::SchemaBuildFailed(format!("type {name} is not registered")))
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut ObjectTypeDefinition, GraphQLError> {
        self.types
            .get_mut(name)
            .map(Box::as_mut)
            .ok_or_else(|| GraphQLError::SchemaBuildFailed(format!("type {name} is not registered")))
    }

    fn register(&mut self, definition: ObjectTypeDefinition) {
        trace!(type_name = %definition.name, "Registering object type");
        self.types
            .entry(definition.name.clone())
            .or_insert_with(|| Box::new(definition));
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.types.values().map(Box::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builds object type definitions for the entities of one walker snapshot.
pub struct TypeBuilder<'a> {
    walker: &'a MetadataWalker,
    accessors: &'a AccessorTable,
    registry: TypeRegistry,
}

impl<'a> TypeBuilder<'a> {
    #[must_use]
    pub fn new(walker: &'a MetadataWalker, accessors: &'a AccessorTable) -> Self {
        Self {
            walker,
            accessors,
            registry: TypeRegistry::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns the entity's definition with its scalar fields.
    ///
    /// A registered definition is returned as is, even if it was registered
    /// for another entity sharing the short name.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if a scalar has no accessor.
    pub fn ensure_shallow(
        &mut self,
        entity: &EntityDescriptor,
    ) -> Result<&ObjectTypeDefinition, GraphQLError> {
        let short = entity.short_name();
        if !self.registry.contains(short) {
            self.registry.register(new_definition(entity));
            let accessors = self.accessors;
            let walker = self.walker;
            add_scalar_fields(self.registry.require_mut(short)?, entity, walker, accessors)?;
            debug!(type_name = %short, "Built object type");
        }
        self.registry.require(short)
    }

    /// Returns the entity's definition with scalar and relation fields.
    ///
    /// Reuses a registered definition and adds only the fields it lacks.
    /// Relation targets are ensured shallowly.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::UnknownRelationTarget` for an unresolvable
    /// navigation and `GraphQLError::SchemaBuildFailed` if a field has no
    /// accessor.
    pub fn ensure_full(
        &mut self,
        entity: &EntityDescriptor,
    ) -> Result<&ObjectTypeDefinition, GraphQLError> {
        let short = entity.short_name();
        let accessors = self.accessors;
        let walker = self.walker;

        if !self.registry.contains(short) {
            self.registry.register(new_definition(entity));
        }
        add_scalar_fields(self.registry.require_mut(short)?, entity, walker, accessors)?;

        // To-one relations come before to-many ones
        let (to_many, to_one): (Vec<_>, Vec<_>) = walker
            .navigations(entity)?
            .into_iter()
            .partition(|navigation| navigation.descriptor.cardinality.is_collection());

        for navigation in to_one.into_iter().chain(to_many) {
            self.ensure_shallow(navigation.target)?;

            let name = &navigation.descriptor.name;
            let getter = accessors.require(short, name)?;
            let field = FieldDefinition::new(
                name.clone(),
                getter.output_type(),
                FieldResolver::Property(getter),
            )
            .with_description(format!(
                "Auto generated field: {name} for type: {}",
                entity.name
            ));

            if !self.registry.require_mut(short)?.add_field(field) {
                trace!(type_name = %short, field = %name, "Skipped existing relation field");
            }
        }

        debug!(type_name = %short, "Built object type with relations");
        self.registry.require(short)
    }

    /// Finishes the build and hands over the registry.
    #[must_use]
    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }
}

fn new_definition(entity: &EntityDescriptor) -> ObjectTypeDefinition {
    ObjectTypeDefinition::new(entity.short_name())
        .with_description(format!("Auto generated item type for: {}", entity.name))
}

fn add_scalar_fields(
    definition: &mut ObjectTypeDefinition,
    entity: &EntityDescriptor,
    walker: &MetadataWalker,
    accessors: &AccessorTable,
) -> Result<(), GraphQLError> {
    for property in walker.scalar_properties(entity) {
        if definition.contains_field(&property.name) {
            continue;
        }
        let getter = accessors.require(entity.short_name(), &property.name)?;
        definition.add_field(FieldDefinition::new(
            property.name.clone(),
            getter.output_type(),
            FieldResolver::Property(getter),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relgraph_model::{ModelCatalog, NavigationDescriptor, ValueType};

    fn catalog() -> ModelCatalog {
        ModelCatalog::default()
            .with_entity(
                EntityDescriptor::new("API.Entity.User")
                    .with_property("Id", ValueType::Int)
                    .with_property("Username", ValueType::String)
                    .with_navigation(NavigationDescriptor::to_many(
                        "Reviews",
                        "API.Entity.Review",
                    )),
            )
            .with_entity(
                EntityDescriptor::new("API.Entity.Review")
                    .with_property("Id", ValueType::Int)
                    .with_property("AuthorId", ValueType::NullableInt)
                    .with_navigation(NavigationDescriptor::to_one("Author", "API.Entity.User")),
            )
    }

    fn fields(definition: &ObjectTypeDefinition) -> Vec<String> {
        definition.fields().map(ToString::to_string).collect()
    }

    #[test]
    fn test_shallow_has_scalars_only() {
        let walker = MetadataWalker::new(&catalog()).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        let review = builder.ensure_shallow(&walker.entity_types()[1]).unwrap();
        assert_eq!(review.name, "Review");
        assert_eq!(
            review.description.as_deref(),
            Some("Auto generated item type for: API.Entity.Review")
        );
        assert_eq!(fields(review), vec!["Id: Int!", "AuthorId: Int"]);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let walker = MetadataWalker::new(&catalog()).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);
        let user = &walker.entity_types()[0];

        let first: *const ObjectTypeDefinition = builder.ensure_shallow(user).unwrap();
        let second: *const ObjectTypeDefinition = builder.ensure_shallow(user).unwrap();
        let full: *const ObjectTypeDefinition = builder.ensure_full(user).unwrap();

        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, full));
        assert_eq!(builder.registry().len(), 2);
    }

    #[test]
    fn test_cycle_terminates() {
        let walker = MetadataWalker::new(&catalog()).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        for entity in walker.entity_types() {
            builder.ensure_full(entity).unwrap();
        }
        let registry = builder.into_registry();

        let user = registry.require("User").unwrap();
        assert_eq!(
            fields(user),
            vec!["Id: Int!", "Username: String!", "Reviews: [Review]"]
        );
        assert_eq!(
            user.field("Reviews").unwrap().description.as_deref(),
            Some("Auto generated field: Reviews for type: API.Entity.User")
        );

        let review = registry.require("Review").unwrap();
        assert_eq!(fields(review), vec!["Id: Int!", "AuthorId: Int", "Author: User"]);
    }

    #[test]
    fn test_self_reference() {
        let catalog = ModelCatalog::default().with_entity(
            EntityDescriptor::new("API.Entity.Node")
                .with_property("Id", ValueType::Int)
                .with_navigation(NavigationDescriptor::to_one("Parent", "API.Entity.Node"))
                .with_navigation(NavigationDescriptor::to_many("Children", "API.Entity.Node")),
        );
        let walker = MetadataWalker::new(&catalog).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        let node = builder.ensure_full(&walker.entity_types()[0]).unwrap();
        assert_eq!(fields(node), vec!["Id: Int!", "Parent: Node", "Children: [Node]"]);
        assert_eq!(builder.registry().len(), 1);
    }

    #[test]
    fn test_to_one_relations_precede_to_many() {
        let catalog = ModelCatalog::default()
            .with_entity(
                EntityDescriptor::new("API.Entity.User")
                    .with_property("Id", ValueType::Int)
                    .with_navigation(NavigationDescriptor::to_many(
                        "Reviews",
                        "API.Entity.Review",
                    ))
                    .with_navigation(NavigationDescriptor::to_one("Manager", "API.Entity.User")),
            )
            .with_entity(
                EntityDescriptor::new("API.Entity.Review").with_property("Id", ValueType::Int),
            );
        let walker = MetadataWalker::new(&catalog).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        let user = builder.ensure_full(&walker.entity_types()[0]).unwrap();
        assert_eq!(user.field_names(), vec!["Id", "Manager", "Reviews"]);
    }

    #[test]
    fn test_shared_short_name_extends_existing_type() {
        let catalog = ModelCatalog::default()
            .with_entity(EntityDescriptor::new("Legacy.User").with_property("Id", ValueType::Int))
            .with_entity(
                EntityDescriptor::new("API.User")
                    .with_property("Id", ValueType::NullableInt)
                    .with_property("Email", ValueType::String),
            );
        let walker = MetadataWalker::new(&catalog).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        for entity in walker.entity_types() {
            builder.ensure_full(entity).unwrap();
        }
        let user = builder.registry().require("User").unwrap();

        assert_eq!(
            user.description.as_deref(),
            Some("Auto generated item type for: Legacy.User")
        );
        assert_eq!(fields(user), vec!["Id: Int!", "Email: String!"]);
    }
}
