//! Single entity read resolver.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::{debug, warn};

use super::get_graphql_context;
use crate::error::GraphQLError;

/// Resolver for root item fields such as `Review(id: Int!)`.
pub struct ReadResolver;

impl ReadResolver {
    /// Creates a resolver loading one entity by its `id` argument.
    ///
    /// An entity that does not exist resolves to `null` without an error.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                let id = ctx
                    .args
                    .get("id")
                    .and_then(|v| v.i64().ok())
                    .ok_or_else(|| async_graphql::Error::new("Missing required argument 'id'"))?;

                debug!(entity = %entity, id, "Resolving single entity read");

                let gql_ctx = get_graphql_context(&ctx)?;
                let result = gql_ctx
                    .accessor
                    .find_by_id(&entity, id)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "Accessor error reading entity");
                        GraphQLError::from(e).into_field_error()
                    })?;

                if result.is_none() {
                    debug!(entity = %entity, id, "Entity not found");
                }
                Ok(result.map(FieldValue::owned_any))
            })
        }
    }
}
