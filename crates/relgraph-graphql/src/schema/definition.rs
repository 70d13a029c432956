//! Intermediate type definitions.
//!
//! The builder produces these plain definitions first and materializes them
//! into `async_graphql::dynamic` objects at the end of a build. Keeping an
//! intermediate form makes the generated shape inspectable and testable
//! without executing queries.

use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::TypeRef;
use indexmap::IndexMap;

use super::accessors::PropertyGetter;
use super::scalar::ScalarMapping;

/// Output type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    /// A scalar with its nullability.
    Scalar(ScalarMapping),
    /// A nullable reference to a named object type.
    Object(String),
    /// A nullable list of a named object type.
    ObjectList(String),
}

impl OutputType {
    #[must_use]
    pub fn to_type_ref(&self) -> TypeRef {
        match self {
            Self::Scalar(mapping) => mapping.to_type_ref(),
            Self::Object(name) => TypeRef::named(name),
            Self::ObjectList(name) => TypeRef::named_list(name),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(mapping) => write!(f, "{mapping}"),
            Self::Object(name) => f.write_str(name),
            Self::ObjectList(name) => write!(f, "[{name}]"),
        }
    }
}

/// Field argument. Only `id: Int!` is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub description: Option<String>,
}

impl ArgumentDefinition {
    /// The `id: Int!` argument of a root item field.
    #[must_use]
    pub fn id(entity_name: &str) -> Self {
        Self {
            name: "id".to_string(),
            description: Some(format!("Auto generated for: {entity_name}")),
        }
    }

    #[must_use]
    pub fn to_type_ref(&self) -> TypeRef {
        TypeRef::named_nn(TypeRef::INT)
    }
}

/// How a field obtains its value, bound when the field is defined.
#[derive(Debug, Clone)]
pub enum FieldResolver {
    /// Reads a property off the parent instance.
    Property(Arc<PropertyGetter>),
    /// Loads a single entity by the `id` argument.
    FindById { entity: String },
    /// Loads every entity of a type.
    FindAll { entity: String },
}

/// A field of an object type.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub output: OutputType,
    pub arguments: Vec<ArgumentDefinition>,
    pub resolver: FieldResolver,
}

impl FieldDefinition {
    /// Creates a field without arguments or description.
    #[must_use]
    pub fn new(name: impl Into<String>, output: OutputType, resolver: FieldResolver) -> Self {
        Self {
            name: name.into(),
            description: None,
            output,
            arguments: Vec::new(),
            resolver,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Renders the field the way it appears in SDL, e.g. `Review(id: Int!): Review`.
impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", arg.name, arg.to_type_ref())?;
            }
            f.write_str(")")?;
        }
        write!(f, ": {}", self.output)
    }
}

/// An object type under construction.
///
/// Fields keep insertion order and names are unique.
#[derive(Debug, Clone)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    fields: IndexMap<String, FieldDefinition>,
}

impl ObjectTypeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field. A field whose name is already present is skipped.
    ///
    /// Returns `true` if the field was added.
    pub fn add_field(&mut self, field: FieldDefinition) -> bool {
        if self.fields.contains_key(&field.name) {
            return false;
        }
        self.fields.insert(field.name.clone(), field);
        true
    }

    /// Inserts a field, replacing one of the same name in place.
    ///
    /// Used only on the root query, where a later entity sharing a short name
    /// takes over the earlier entity's root fields.
    pub fn set_field(&mut self, field: FieldDefinition) -> Option<FieldDefinition> {
        self.fields.insert(field.name.clone(), field)
    }

    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
