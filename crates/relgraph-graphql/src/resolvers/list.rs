//! Collection resolver.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::{debug, warn};

use super::get_graphql_context;
use crate::error::GraphQLError;

/// Resolver for root collection fields such as `Reviews`.
pub struct ListResolver;

impl ListResolver {
    /// Creates a resolver returning every entity of a type, in the order the
    /// accessor yields them.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let instances = gql_ctx.accessor.find_all(&entity).await.map_err(|e| {
                    warn!(error = %e, "Accessor error listing entities");
                    GraphQLError::from(e).into_field_error()
                })?;

                debug!(entity = %entity, count = instances.len(), "Resolved entity collection");
                Ok(Some(FieldValue::list(
                    instances.into_iter().map(FieldValue::owned_any),
                )))
            })
        }
    }
}
