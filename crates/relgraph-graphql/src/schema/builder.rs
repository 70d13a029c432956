//! Relational schema builder.
//!
//! Runs one build over a metadata provider: walker, accessor table, type
//! builder, root query. The resulting definitions are then materialized with
//! async-graphql's dynamic schema API.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, InputValue, Object, Schema, TypeRef};
use relgraph_model::{DynAccessor, DynMetadataProvider};
use tracing::{debug, info};

use super::accessors::AccessorTable;
use super::definition::{FieldDefinition, FieldResolver, ObjectTypeDefinition};
use super::query::{QUERY_TYPE_NAME, build_root_query};
use super::type_builder::{TypeBuilder, TypeRegistry};
use super::walker::MetadataWalker;
use crate::context::GraphQLContext;
use crate::error::GraphQLError;
use crate::resolvers::{ListResolver, PropertyResolver, ReadResolver};

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Output of one build before materialization.
#[derive(Debug)]
pub struct SchemaDefinitions {
    /// The root query type.
    pub query: ObjectTypeDefinition,

    /// Item types keyed by entity short name.
    pub types: TypeRegistry,
}

/// Builds a GraphQL schema from relational metadata.
///
/// # Example
///
/// ```ignore
/// let schema = RelationalSchemaBuilder::new(Arc::new(catalog), SchemaBuilderConfig::default())
///     .with_accessor(store)
///     .build()?;
///
/// let response = schema.execute("{ Review(id: 1) { Id Author { Username } } }").await;
/// ```
pub struct RelationalSchemaBuilder {
    /// Source of entity metadata.
    provider: DynMetadataProvider,

    /// Accessor attached to the schema for resolvers, if any.
    accessor: Option<DynAccessor>,

    /// Configuration options.
    config: SchemaBuilderConfig,
}

impl RelationalSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(provider: DynMetadataProvider, config: SchemaBuilderConfig) -> Self {
        Self {
            provider,
            accessor: None,
            config,
        }
    }

    /// Attaches a runtime accessor to every execution of the built schema.
    ///
    /// Without one, a [`GraphQLContext`] has to be attached to each request.
    #[must_use]
    pub fn with_accessor(mut self, accessor: DynAccessor) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Builds the intermediate type definitions.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`GraphQLError`] if the metadata cannot be walked or
    /// contains a property that cannot be mapped.
    pub fn build_definitions(&self) -> Result<SchemaDefinitions, GraphQLError> {
        debug!("Starting relational schema build");

        let walker = MetadataWalker::new(self.provider.as_ref())?;
        let accessors = AccessorTable::build(&walker)?;
        let mut builder = TypeBuilder::new(&walker, &accessors);
        let query = build_root_query(&mut builder, walker.entity_types())?;
        let types = builder.into_registry();

        if types.contains(QUERY_TYPE_NAME) {
            return Err(GraphQLError::SchemaBuildFailed(format!(
                "entity type name {QUERY_TYPE_NAME} collides with the root query type"
            )));
        }

        debug!(
            type_count = types.len(),
            root_field_count = query.len(),
            "Built schema definitions"
        );
        Ok(SchemaDefinitions { query, types })
    }

    /// Builds the GraphQL schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the definitions cannot be built or async-graphql
    /// rejects the assembled schema.
    pub fn build(&self) -> Result<Schema, GraphQLError> {
        let definitions = self.build_definitions()?;

        let mut schema_builder = Schema::build(QUERY_TYPE_NAME, None, None);
        for definition in definitions.types.iter() {
            schema_builder = schema_builder.register(materialize_object(definition));
        }
        schema_builder = schema_builder.register(materialize_object(&definitions.query));

        // Configure limits
        let mut schema_builder = schema_builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);

        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        if let Some(accessor) = &self.accessor {
            schema_builder = schema_builder.data(GraphQLContext::new(Arc::clone(accessor)));
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        info!(
            type_count = definitions.types.len(),
            "GraphQL schema build complete"
        );
        Ok(schema)
    }
}

fn materialize_object(definition: &ObjectTypeDefinition) -> Object {
    let mut object = Object::new(&definition.name);
    if let Some(description) = &definition.description {
        object = object.description(description);
    }

    for field in definition.fields() {
        object = object.field(materialize_field(field));
    }

    // GraphQL objects need at least one field
    if definition.is_empty() {
        object = object.field(Field::new(
            "_placeholder",
            TypeRef::named(TypeRef::STRING),
            |_| FieldFuture::new(async { Ok(None::<Value>) }),
        ));
    }

    object
}

fn materialize_field(definition: &FieldDefinition) -> Field {
    let type_ref = definition.output.to_type_ref();
    let mut field = match &definition.resolver {
        FieldResolver::Property(getter) => Field::new(
            &definition.name,
            type_ref,
            PropertyResolver::resolve(Arc::clone(getter)),
        ),
        FieldResolver::FindById { entity } => {
            Field::new(&definition.name, type_ref, ReadResolver::resolve(entity.clone()))
        }
        FieldResolver::FindAll { entity } => {
            Field::new(&definition.name, type_ref, ListResolver::resolve(entity.clone()))
        }
    };

    for argument in &definition.arguments {
        let mut input = InputValue::new(&argument.name, argument.to_type_ref());
        if let Some(description) = &argument.description {
            input = input.description(description);
        }
        field = field.argument(input);
    }

    if let Some(description) = &definition.description {
        field = field.description(description);
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use relgraph_model::{EntityDescriptor, ModelCatalog, NavigationDescriptor, ValueType};

    fn builder(catalog: ModelCatalog) -> RelationalSchemaBuilder {
        RelationalSchemaBuilder::new(Arc::new(catalog), SchemaBuilderConfig::default())
    }

    #[test]
    fn test_default_config() {
        let config = SchemaBuilderConfig::default();
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection_enabled);
    }

    #[test]
    fn test_builds_valid_schema() {
        let catalog = ModelCatalog::default()
            .with_entity(
                EntityDescriptor::new("API.Entity.User")
                    .with_property("Id", ValueType::Int)
                    .with_navigation(NavigationDescriptor::to_many(
                        "Reviews",
                        "API.Entity.Review",
                    )),
            )
            .with_entity(
                EntityDescriptor::new("API.Entity.Review")
                    .with_property("Id", ValueType::Int)
                    .with_navigation(NavigationDescriptor::to_one("Author", "API.Entity.User")),
            );

        let schema = builder(catalog).build().unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("type Review"));
        assert!(sdl.contains("Author: User"));
        assert!(sdl.contains("Reviews: [Review]"));
        assert!(sdl.contains("Auto generated for: API.Entity.Review"));
    }

    #[test]
    fn test_empty_entity_gets_placeholder() {
        let catalog = ModelCatalog::default().with_entity(EntityDescriptor::new("API.Marker"));
        let schema = builder(catalog).build().unwrap();
        assert!(schema.sdl().contains("_placeholder: String"));
    }

    #[test]
    fn test_query_name_collision() {
        let catalog = ModelCatalog::default()
            .with_entity(EntityDescriptor::new("API.Query").with_property("Id", ValueType::Int));
        let err = builder(catalog).build_definitions().unwrap_err();
        assert!(matches!(err, GraphQLError::SchemaBuildFailed(_)));
    }

    #[test]
    fn test_build_errors_are_fatal() {
        let catalog = ModelCatalog::default().with_entity(
            EntityDescriptor::new("API.Entity.User").with_property("Active", ValueType::Bool),
        );
        let Err(err) = builder(catalog).build() else {
            panic!("expected the build to fail");
        };
        assert!(err.is_fatal());
        assert_eq!(err.error_code(), "UNSUPPORTED_SCALAR_TYPE");
    }
}
