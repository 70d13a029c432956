//! GraphQL schema induction from relational metadata.
//!
//! ## Components
//!
//! - [`MetadataWalker`] - Snapshot of the provider's entity types
//! - [`AccessorTable`] - Typed property getters bound into field resolvers
//! - [`TypeBuilder`] - Cycle-safe construction of item types
//! - [`build_root_query`] - Root item and collection fields per entity
//! - [`RelationalSchemaBuilder`] - Runs a build and materializes the schema
//!
//! ## Build order
//!
//! 1. The walker enumerates entity types and resolves navigation targets
//! 2. The accessor table maps every property to a typed getter
//! 3. The root query assembler ensures each entity's full type, which in
//!    turn ensures the shallow type of every relation target
//! 4. The registry and root query are materialized into dynamic objects

mod accessors;
mod builder;
mod definition;
mod query;
mod scalar;
mod type_builder;
mod walker;

pub use accessors::{AccessorTable, PropertyGetter};
pub use builder::{RelationalSchemaBuilder, SchemaBuilderConfig, SchemaDefinitions};
pub use definition::{
    ArgumentDefinition, FieldDefinition, FieldResolver, ObjectTypeDefinition, OutputType,
};
pub use query::{QUERY_TYPE_NAME, build_root_query, collection_field_name};
pub use scalar::{ScalarMapping, ScalarType};
pub use type_builder::{TypeBuilder, TypeRegistry};
pub use walker::{MetadataWalker, ResolvedNavigation};
