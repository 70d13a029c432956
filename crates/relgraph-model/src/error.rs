//! Error types for the relational model layer.
//!
//! These errors are produced by metadata providers and runtime accessors.

/// Errors that can occur while reading metadata or entity data.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The provider cannot enumerate entity types.
    #[error("Metadata unavailable: {message}")]
    MetadataUnavailable {
        /// Why the metadata could not be enumerated.
        message: String,
    },

    /// A property was requested that the entity instance does not carry.
    #[error("The property: {property} does not exist on parent type: {entity}")]
    MissingProperty {
        /// Short name of the entity type of the instance.
        entity: String,
        /// The requested property or navigation name.
        property: String,
    },

    /// The accessor does not know the requested entity type.
    #[error("Unknown entity type: {entity}")]
    UnknownEntity {
        /// The entity type name that was requested.
        entity: String,
    },

    /// A model or seed file could not be parsed.
    #[error("Invalid model: {message}")]
    InvalidModel {
        /// Description of the problem.
        message: String,
    },

    /// The backing store failed.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl ModelError {
    /// Creates a new `MetadataUnavailable` error.
    #[must_use]
    pub fn metadata_unavailable(message: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            message: message.into(),
        }
    }

    /// Creates a new `MissingProperty` error.
    #[must_use]
    pub fn missing_property(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingProperty {
            entity: entity.into(),
            property: property.into(),
        }
    }

    /// Creates a new `UnknownEntity` error.
    #[must_use]
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
        }
    }

    /// Creates a new `InvalidModel` error.
    #[must_use]
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a missing property error.
    #[must_use]
    pub fn is_missing_property(&self) -> bool {
        matches!(self, Self::MissingProperty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::missing_property("Review", "Author");
        assert_eq!(
            err.to_string(),
            "The property: Author does not exist on parent type: Review"
        );

        let err = ModelError::metadata_unavailable("no entity types registered");
        assert_eq!(
            err.to_string(),
            "Metadata unavailable: no entity types registered"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(ModelError::missing_property("User", "Reviews").is_missing_property());
        assert!(!ModelError::backend("down").is_missing_property());
    }
}
