//! Entity, scalar property and navigation descriptors.
//!
//! Descriptors are a read-only projection of the relational model: which
//! entity types exist, which scalar columns they carry and how they relate
//! to each other.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default name of the primary key property.
pub const DEFAULT_KEY: &str = "Id";

/// Returns the short form of a fully qualified entity name.
///
/// `API.Entity.User` becomes `User`; a name without dots is returned as-is.
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Underlying value type of a scalar property.
///
/// Parsed from the names used in model files (`string`, `int`, `int?`, ...).
/// Types without a dedicated variant are kept as [`ValueType::Other`] so the
/// schema builder can reject them with a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    String,
    Int,
    NullableInt,
    Bool,
    Long,
    Decimal,
    DateTime,
    Guid,
    Other(String),
}

impl ValueType {
    /// Parses a source type name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "string" => Self::String,
            "int" | "int32" => Self::Int,
            "int?" | "nullable int" => Self::NullableInt,
            "bool" | "boolean" => Self::Bool,
            "long" | "int64" => Self::Long,
            "decimal" => Self::Decimal,
            "datetime" => Self::DateTime,
            "guid" | "uuid" => Self::Guid,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the canonical source type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::NullableInt => "int?",
            Self::Bool => "bool",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Guid => "guid",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.as_str().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar (column) property of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarPropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl ScalarPropertyDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Cardinality of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Many-to-one or one-to-one: the navigation yields a single entity.
    ToOne,
    /// One-to-many: the navigation yields a collection.
    ToMany,
}

impl Cardinality {
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(self, Self::ToMany)
    }
}

/// A relation from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDescriptor {
    pub name: String,
    /// Fully qualified name of the target entity.
    pub target: String,
    pub cardinality: Cardinality,
    /// Foreign key backing the relation.
    ///
    /// For [`Cardinality::ToOne`] the key lives on the declaring entity
    /// (`Review.AuthorId`); for [`Cardinality::ToMany`] it lives on the target
    /// (`Review.AuthorId` for `User.Reviews`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

impl NavigationDescriptor {
    /// Creates a to-one navigation.
    #[must_use]
    pub fn to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToOne,
            foreign_key: None,
        }
    }

    /// Creates a to-many navigation.
    #[must_use]
    pub fn to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToMany,
            foreign_key: None,
        }
    }

    /// Sets the foreign key backing this navigation.
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    /// Short name of the target entity.
    #[must_use]
    pub fn target_short_name(&self) -> &str {
        short_name(&self.target)
    }
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

/// Metadata of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Fully qualified name, e.g. `API.Entity.Review`.
    pub name: String,

    /// Primary key property used for `find_by_id`.
    #[serde(default = "default_key")]
    pub key: String,

    #[serde(default, rename = "property")]
    pub properties: Vec<ScalarPropertyDescriptor>,

    #[serde(default, rename = "navigation")]
    pub navigations: Vec<NavigationDescriptor>,
}

impl EntityDescriptor {
    /// Creates an entity descriptor with no properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: default_key(),
            properties: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// Short name of the entity, e.g. `Review`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// Adds a scalar property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.properties
            .push(ScalarPropertyDescriptor::new(name, value_type));
        self
    }

    /// Adds a navigation.
    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationDescriptor) -> Self {
        self.navigations.push(navigation);
        self
    }

    /// Looks up a scalar property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ScalarPropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Looks up a navigation by name.
    #[must_use]
    pub fn navigation(&self, name: &str) -> Option<&NavigationDescriptor> {
        self.navigations.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("API.Entity.User"), "User");
        assert_eq!(short_name("User"), "User");
        assert_eq!(EntityDescriptor::new("A.B.Review").short_name(), "Review");
    }

    #[test]
    fn test_value_type_parse() {
        assert_eq!(ValueType::parse("string"), ValueType::String);
        assert_eq!(ValueType::parse("int"), ValueType::Int);
        assert_eq!(ValueType::parse("int?"), ValueType::NullableInt);
        assert_eq!(ValueType::parse(" bool "), ValueType::Bool);
        assert_eq!(
            ValueType::parse("geometry"),
            ValueType::Other("geometry".to_string())
        );
        assert_eq!(ValueType::NullableInt.to_string(), "int?");
    }

    #[test]
    fn test_navigation_builders() {
        let nav = NavigationDescriptor::to_many("Reviews", "API.Entity.Review")
            .with_foreign_key("AuthorId");
        assert!(nav.cardinality.is_collection());
        assert_eq!(nav.target_short_name(), "Review");
        assert_eq!(nav.foreign_key.as_deref(), Some("AuthorId"));
    }

    #[test]
    fn test_entity_lookup() {
        let user = EntityDescriptor::new("API.Entity.User")
            .with_property("Id", ValueType::Int)
            .with_property("Username", ValueType::String)
            .with_navigation(NavigationDescriptor::to_many("Reviews", "API.Entity.Review"));

        assert_eq!(user.key, "Id");
        assert!(user.property("Username").is_some());
        assert!(user.property("Reviews").is_none());
        assert!(user.navigation("Reviews").is_some());
    }
}
