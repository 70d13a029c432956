//! Accessor table.
//!
//! Built once per schema build from the walker output. Every property a
//! generated field can read gets a typed getter here, and field resolvers
//! capture their getter when the field is defined.

use std::collections::HashMap;
use std::sync::Arc;

use relgraph_model::Cardinality;
use tracing::trace;

use super::definition::OutputType;
use super::scalar::ScalarMapping;
use super::walker::MetadataWalker;
use crate::error::GraphQLError;

/// Typed read access to one property of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyGetter {
    /// A scalar property.
    Scalar {
        /// Entity short name.
        entity: String,
        property: String,
        mapping: ScalarMapping,
    },
    /// A navigation to another entity type.
    Navigation {
        /// Entity short name.
        entity: String,
        navigation: String,
        /// Target short name.
        target: String,
        cardinality: Cardinality,
    },
}

impl PropertyGetter {
    /// Short name of the entity the property belongs to.
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::Scalar { entity, .. } | Self::Navigation { entity, .. } => entity,
        }
    }

    /// Name of the property as exposed on the instance.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Scalar { property, .. } => property,
            Self::Navigation { navigation, .. } => navigation,
        }
    }

    /// The GraphQL output type of a field reading this property.
    #[must_use]
    pub fn output_type(&self) -> OutputType {
        match self {
            Self::Scalar { mapping, .. } => OutputType::Scalar(*mapping),
            Self::Navigation {
                target,
                cardinality: Cardinality::ToOne,
                ..
            } => OutputType::Object(target.clone()),
            Self::Navigation {
                target,
                cardinality: Cardinality::ToMany,
                ..
            } => OutputType::ObjectList(target.clone()),
        }
    }
}

/// Getters indexed by entity short name, then property name.
#[derive(Debug, Default)]
pub struct AccessorTable {
    getters: HashMap<String, HashMap<String, Arc<PropertyGetter>>>,
}

impl AccessorTable {
    /// Builds getters for every property and navigation the walker yields.
    ///
    /// When two entities share a short name, the first getter registered for
    /// a property is kept.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::UnsupportedScalarType` for a scalar property
    /// whose type has no GraphQL mapping.
    pub fn build(walker: &MetadataWalker) -> Result<Self, GraphQLError> {
        let mut table = Self::default();

        for entity in walker.entity_types() {
            let short = entity.short_name();

            for property in walker.scalar_properties(entity) {
                let mapping = ScalarMapping::for_value_type(&property.value_type).ok_or_else(
                    || GraphQLError::UnsupportedScalarType {
                        entity: entity.name.clone(),
                        property: property.name.clone(),
                        value_type: property.value_type.to_string(),
                    },
                )?;
                table.insert(PropertyGetter::Scalar {
                    entity: short.to_string(),
                    property: property.name.clone(),
                    mapping,
                });
            }

            for navigation in walker.navigations(entity)? {
                table.insert(PropertyGetter::Navigation {
                    entity: short.to_string(),
                    navigation: navigation.descriptor.name.clone(),
                    target: navigation.target.short_name().to_string(),
                    cardinality: navigation.descriptor.cardinality,
                });
            }
        }

        trace!(entity_count = table.getters.len(), "Built accessor table");
        Ok(table)
    }

    fn insert(&mut self, getter: PropertyGetter) {
        self.getters
            .entry(getter.entity().to_string())
            .or_default()
            .entry(getter.property().to_string())
            .or_insert_with(|| Arc::new(getter));
    }

    #[must_use]
    pub fn get(&self, entity: &str, property: &str) -> Option<&Arc<PropertyGetter>> {
        self.getters.get(entity).and_then(|props| props.get(property))
    }

    /// Returns the getter for a property that the walker yielded.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if no getter was built.
    pub fn require(&self, entity: &str, property: &str) -> Result<Arc<PropertyGetter>, GraphQLError> {
        self.get(entity, property).cloned().ok_or_else(|| {
            GraphQLError::SchemaBuildFailed(format!("no accessor for {entity}.{property}"))
        })
    }
}
