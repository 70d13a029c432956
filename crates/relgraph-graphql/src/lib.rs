//! # relgraph-graphql
//!
//! GraphQL schema induction from relational metadata.
//!
//! Given a [`MetadataProvider`] describing entity types, their scalar
//! properties and their navigations, this crate builds a read-only GraphQL
//! schema with async-graphql's dynamic schema API:
//!
//! - one object type per entity, named by the entity's short name
//! - a scalar field per property (`string` → `String!`, `int` → `Int!`,
//!   `int?` → `Int`)
//! - an object field per to-one navigation and a list field per to-many
//!   navigation, including cyclic relations
//! - root fields `X(id: Int!): X` and `Xs: [X]` per entity
//!
//! Resolvers read through a [`RuntimeAccessor`] attached to the schema or to
//! each request via [`GraphQLContext`].
//!
//! ## Configuration
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`schema`] - Metadata walking, type building and materialization
//! - [`resolvers`] - Field resolvers
//! - [`context`] - GraphQL execution context
//! - [`error`] - Error types for schema construction and resolution
//!
//! [`MetadataProvider`]: relgraph_model::MetadataProvider
//! [`RuntimeAccessor`]: relgraph_model::RuntimeAccessor

pub mod config;
pub mod context;
pub mod error;
pub mod resolvers;
pub mod schema;

pub use config::GraphQLConfig;
pub use context::{ContextBuilderError, GraphQLContext, GraphQLContextBuilder};
pub use error::GraphQLError;
pub use schema::{RelationalSchemaBuilder, SchemaBuilderConfig, SchemaDefinitions};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
