//! GraphQL execution context.
//!
//! Holds what the generated resolvers need at execution time. The schema
//! builder attaches a context as schema data when it is given an accessor;
//! a context attached to an individual request takes precedence.
//!
//! # Example
//!
//! ```ignore
//! use relgraph_graphql::GraphQLContextBuilder;
//!
//! let context = GraphQLContextBuilder::new()
//!     .with_accessor(accessor.clone())
//!     .with_request_id("req-123")
//!     .build()?;
//!
//! let response = schema.execute(Request::new(query).data(context)).await;
//! ```

use relgraph_model::DynAccessor;

/// GraphQL execution context.
#[derive(Clone)]
pub struct GraphQLContext {
    /// Runtime accessor used to load entities and read their properties.
    pub accessor: DynAccessor,

    /// Request ID for tracing and correlation.
    pub request_id: Option<String>,
}

impl GraphQLContext {
    /// Creates a context around an accessor.
    #[must_use]
    pub fn new(accessor: DynAccessor) -> Self {
        Self {
            accessor,
            request_id: None,
        }
    }

    #[must_use]
    pub fn builder() -> GraphQLContextBuilder {
        GraphQLContextBuilder::default()
    }
}

impl std::fmt::Debug for GraphQLContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLContext")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing GraphQLContext.
#[derive(Default)]
pub struct GraphQLContextBuilder {
    accessor: Option<DynAccessor>,
    request_id: Option<String>,
}

impl GraphQLContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime accessor.
    #[must_use]
    pub fn with_accessor(mut self, accessor: DynAccessor) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Builds the GraphQLContext.
    ///
    /// # Errors
    ///
    /// Returns an error if no accessor was provided.
    pub fn build(self) -> Result<GraphQLContext, ContextBuilderError> {
        let accessor = self
            .accessor
            .ok_or(ContextBuilderError::MissingField("accessor"))?;

        Ok(GraphQLContext {
            accessor,
            request_id: self.request_id,
        })
    }
}

/// Errors that can occur when building a GraphQLContext.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_accessor() {
        let result = GraphQLContextBuilder::new()
            .with_request_id("req-123")
            .build();

        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("accessor"))
        ));
    }

    #[test]
    fn test_builder_with_accessor() {
        let accessor: DynAccessor = relgraph_db_memory::create_accessor(Vec::new());
        let context = GraphQLContext::builder()
            .with_accessor(accessor)
            .with_request_id("req-7")
            .build()
            .unwrap();

        assert_eq!(context.request_id.as_deref(), Some("req-7"));
    }
}
