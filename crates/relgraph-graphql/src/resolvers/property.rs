//! Property resolver for fields of generated item types.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use relgraph_model::{Cardinality, EntityInstance, PropertyValue};
use tracing::{trace, warn};

use super::get_graphql_context;
use crate::error::GraphQLError;
use crate::schema::{PropertyGetter, ScalarType};

/// Resolver reading a property or navigation off the parent entity.
pub struct PropertyResolver;

impl PropertyResolver {
    /// Creates a resolver bound to a getter from the accessor table.
    pub fn resolve(
        getter: Arc<PropertyGetter>,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let getter = Arc::clone(&getter);
            FieldFuture::new(async move {
                let parent = ctx.parent_value.try_downcast_ref::<EntityInstance>()?;
                let gql_ctx = get_graphql_context(&ctx)?;

                trace!(
                    entity = %parent.entity(),
                    property = %getter.property(),
                    "Resolving property"
                );

                let value = gql_ctx
                    .accessor
                    .get_property(parent, getter.property())
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "Failed to read property");
                        GraphQLError::from(e).into_field_error()
                    })?;

                into_field_value(&getter, parent.entity(), value)
                    .map_err(GraphQLError::into_field_error)
            })
        }
    }
}

/// Converts a property value into the shape the getter's field expects.
pub(crate) fn into_field_value<'a>(
    getter: &PropertyGetter,
    entity: &str,
    value: PropertyValue,
) -> Result<Option<FieldValue<'a>>, GraphQLError> {
    let mismatch = |expected: &'static str, actual: &PropertyValue| GraphQLError::ValueMismatch {
        entity: entity.to_string(),
        property: getter.property().to_string(),
        expected,
        actual: actual.kind(),
    };

    match (getter, value) {
        (_, PropertyValue::Null) => Ok(None),

        (PropertyGetter::Scalar { mapping, .. }, value) => match (mapping.scalar, value) {
            (ScalarType::Int, PropertyValue::Int(i)) => {
                Ok(Some(FieldValue::value(Value::Number(i.into()))))
            }
            (ScalarType::String, PropertyValue::String(s)) => {
                Ok(Some(FieldValue::value(Value::String(s))))
            }
            (ScalarType::Int, other) => Err(mismatch("int", &other)),
            (ScalarType::String, other) => Err(mismatch("string", &other)),
        },

        (
            PropertyGetter::Navigation {
                cardinality: Cardinality::ToOne,
                ..
            },
            PropertyValue::Entity(instance),
        ) => Ok(Some(FieldValue::owned_any(*instance))),

        (
            PropertyGetter::Navigation {
                cardinality: Cardinality::ToMany,
                ..
            },
            PropertyValue::Entities(instances),
        ) => Ok(Some(FieldValue::list(
            instances.into_iter().map(FieldValue::owned_any),
        ))),

        (
            PropertyGetter::Navigation {
                cardinality: Cardinality::ToOne,
                ..
            },
            other,
        ) => Err(mismatch("entity", &other)),

        (
            PropertyGetter::Navigation {
                cardinality: Cardinality::ToMany,
                ..
            },
            other,
        ) => Err(mismatch("entity list", &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarMapping;

    fn scalar(scalar: ScalarType) -> PropertyGetter {
        PropertyGetter::Scalar {
            entity: "User".into(),
            property: "Username".into(),
            mapping: ScalarMapping {
                scalar,
                nullable: false,
            },
        }
    }

    fn navigation(cardinality: Cardinality) -> PropertyGetter {
        PropertyGetter::Navigation {
            entity: "Review".into(),
            navigation: "Author".into(),
            target: "User".into(),
            cardinality,
        }
    }

    #[test]
    fn test_scalar_values() {
        let value = into_field_value(&scalar(ScalarType::String), "User", "alice".into())
            .unwrap()
            .unwrap();
        assert_eq!(value.as_value(), Some(&Value::String("alice".into())));

        let value = into_field_value(&scalar(ScalarType::Int), "User", 7.into())
            .unwrap()
            .unwrap();
        assert_eq!(value.as_value(), Some(&Value::Number(7.into())));

        assert!(
            into_field_value(&scalar(ScalarType::Int), "User", PropertyValue::Null)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_entity_value() {
        let author = EntityInstance::new("User").with("Id", 2);
        let value = into_field_value(&navigation(Cardinality::ToOne), "Review", author.into())
            .unwrap()
            .unwrap();

        let instance = value.try_downcast_ref::<EntityInstance>().unwrap();
        assert_eq!(instance.int("Id"), Some(2));
    }

    #[test]
    fn test_mismatch() {
        let Err(err) = into_field_value(&scalar(ScalarType::Int), "User", "seven".into()) else {
            panic!("expected a mismatch");
        };
        assert_eq!(err.error_code(), "VALUE_MISMATCH");

        let Err(err) = into_field_value(&navigation(Cardinality::ToMany), "Review", 3.into()) else {
            panic!("expected a mismatch");
        };
        assert!(matches!(
            err,
            GraphQLError::ValueMismatch {
                expected: "entity list",
                ..
            }
        ));
    }
}
