//! Field resolvers for the generated schema.
//!
//! - `read`: root item fields (e.g. `Review(id: 1)`)
//! - `list`: root collection fields (e.g. `Reviews`)
//! - `property`: scalar and relation fields of item types
//!
//! Entity values travel between resolvers as owned [`EntityInstance`]s.
//!
//! [`EntityInstance`]: relgraph_model::EntityInstance

mod list;
mod property;
mod read;

pub use list::ListResolver;
pub use property::PropertyResolver;
pub use read::ReadResolver;

use async_graphql::dynamic::ResolverContext;

use crate::context::GraphQLContext;

/// Helper to extract the GraphQL context from the resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, async_graphql::Error> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| async_graphql::Error::new("GraphQL context not available"))
}
