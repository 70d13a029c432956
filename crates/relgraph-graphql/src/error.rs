//! Error types for schema construction and field resolution.
//!
//! Construction-time errors abort the schema build. Resolution-time errors
//! are reported on the field that raised them while the rest of the response
//! completes.

use std::fmt;

use async_graphql::ErrorExtensions;
use relgraph_model::ModelError;

/// Errors that can occur while building or executing the generated schema.
#[derive(Debug)]
pub enum GraphQLError {
    /// The metadata provider cannot enumerate entity types.
    MetadataUnavailable(String),

    /// A scalar property has a type with no GraphQL mapping.
    UnsupportedScalarType {
        /// Fully qualified entity name.
        entity: String,
        /// Property name.
        property: String,
        /// Source type name.
        value_type: String,
    },

    /// A navigation points at an entity the provider did not enumerate.
    UnknownRelationTarget {
        /// Fully qualified name of the declaring entity.
        entity: String,
        /// Navigation name.
        navigation: String,
        /// Target entity name.
        target: String,
    },

    /// A resolver did not find its property on the runtime instance.
    MissingProperty {
        /// Entity type of the instance.
        entity: String,
        /// Property or navigation name.
        property: String,
    },

    /// A property held a value of the wrong shape for its field.
    ValueMismatch {
        /// Entity type of the instance.
        entity: String,
        /// Property or navigation name.
        property: String,
        /// What the field expects.
        expected: &'static str,
        /// What the accessor returned.
        actual: &'static str,
    },

    /// The runtime accessor failed.
    Accessor(String),

    /// Schema assembly failed.
    SchemaBuildFailed(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetadataUnavailable(msg) => {
                write!(f, "Relational metadata unavailable: {msg}")
            }
            Self::UnsupportedScalarType {
                entity,
                property,
                value_type,
            } => {
                write!(
                    f,
                    "Unable to map type: {value_type} of {entity}.{property} to a GraphQL scalar"
                )
            }
            Self::UnknownRelationTarget {
                entity,
                navigation,
                target,
            } => {
                write!(
                    f,
                    "Navigation {entity}.{navigation} targets unknown entity {target}"
                )
            }
            Self::MissingProperty { entity, property } => {
                write!(
                    f,
                    "The property: {property} does not exist on parent type: {entity}"
                )
            }
            Self::ValueMismatch {
                entity,
                property,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{entity}.{property} expected {expected} but the accessor returned {actual}"
                )
            }
            Self::Accessor(msg) => {
                write!(f, "Runtime accessor error: {msg}")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "Failed to build GraphQL schema: {msg}")
            }
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable(_) => "METADATA_UNAVAILABLE",
            Self::UnsupportedScalarType { .. } => "UNSUPPORTED_SCALAR_TYPE",
            Self::UnknownRelationTarget { .. } => "UNKNOWN_RELATION_TARGET",
            Self::MissingProperty { .. } => "MISSING_PROPERTY",
            Self::ValueMismatch { .. } => "VALUE_MISMATCH",
            Self::Accessor(_) => "ACCESSOR_ERROR",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
        }
    }

    /// Returns `true` for errors that make the schema unusable.
    ///
    /// Fatal errors are raised during construction and are not retried.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MetadataUnavailable(_)
                | Self::UnsupportedScalarType { .. }
                | Self::UnknownRelationTarget { .. }
                | Self::SchemaBuildFailed(_)
        )
    }

    /// Converts the error into a per-field GraphQL error with a `code` extension.
    #[must_use]
    pub fn into_field_error(self) -> async_graphql::Error {
        let code = self.error_code();
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, ext| ext.set("code", code.to_string()))
    }
}

impl From<ModelError> for GraphQLError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MetadataUnavailable { message } => Self::MetadataUnavailable(message),
            ModelError::MissingProperty { entity, property } => {
                Self::MissingProperty { entity, property }
            }
            other => Self::Accessor(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GraphQLError::MetadataUnavailable("x".into()).error_code(),
            "METADATA_UNAVAILABLE"
        );
        assert_eq!(
            GraphQLError::MissingProperty {
                entity: "Review".into(),
                property: "Author".into()
            }
            .error_code(),
            "MISSING_PROPERTY"
        );
    }

    #[test]
    fn test_fatality() {
        assert!(
            GraphQLError::UnsupportedScalarType {
                entity: "API.Entity.User".into(),
                property: "CreatedAt".into(),
                value_type: "datetime".into(),
            }
            .is_fatal()
        );
        assert!(!GraphQLError::Accessor("down".into()).is_fatal());
        assert!(
            !GraphQLError::MissingProperty {
                entity: "Review".into(),
                property: "Author".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_from_model_error() {
        let err = GraphQLError::from(ModelError::missing_property("Review", "Author"));
        assert_eq!(
            err.to_string(),
            "The property: Author does not exist on parent type: Review"
        );

        let err = GraphQLError::from(ModelError::metadata_unavailable("empty"));
        assert!(matches!(err, GraphQLError::MetadataUnavailable(_)));

        let err = GraphQLError::from(ModelError::backend("connection reset"));
        assert!(matches!(err, GraphQLError::Accessor(_)));
    }

    #[test]
    fn test_field_error_carries_code() {
        let err = GraphQLError::Accessor("down".into()).into_field_error();
        assert_eq!(err.message, "Runtime accessor error: down");
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(
            code,
            Some(async_graphql::Value::String("ACCESSOR_ERROR".into()))
        );
    }
}
